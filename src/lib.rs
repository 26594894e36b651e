//! Course Report Desk
//!
//! A "report this course" dialog for the terminal, with a headless mode for
//! scripts. The dialog logic lives in `report-app`, drawing in `report-tui`
//! and the review service client in `report-client`.

pub mod app;
pub mod cli;
pub mod headless;

pub use app::run;
pub use cli::Args;
