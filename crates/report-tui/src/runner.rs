//! TUI runner - entry point and event loop

use report_app::{Engine, LoginService, ReportService};
use report_core::prelude::*;

use crate::{event, render, terminal};

/// Run the dialog in the terminal until the user quits
pub async fn run<R, L>(mut engine: Engine<R, L>) -> Result<()>
where
    R: ReportService + Send + Sync + 'static,
    L: LoginService + Send + Sync + 'static,
{
    terminal::install_panic_hook();
    let mut term = ratatui::init();

    engine.spawn_signal_handler();
    info!(
        "Report dialog for course {} ({})",
        engine.state.course.course_id, engine.state.course.course_name
    );

    let result = run_loop(&mut term, &mut engine);

    engine.shutdown().await;
    ratatui::restore();

    result
}

/// Main event loop
fn run_loop<R, L>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<R, L>) -> Result<()>
where
    R: ReportService + Send + Sync + 'static,
    L: LoginService + Send + Sync + 'static,
{
    while !engine.should_quit() {
        // Results from background submissions, signal handler
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    Ok(())
}
