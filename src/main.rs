//! Course Report Desk - report a course from the terminal
//!
//! This is the binary entry point. All logic lives in the library.

use clap::Parser;
use course_report::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let filed = course_report::run(args).await?;

    if !filed {
        std::process::exit(1);
    }
    Ok(())
}
