//! Application entry: configuration, wiring and the choice of frontend

use std::path::Path;
use std::sync::Arc;

use report_app::config::{apply_env_overrides, init_config_dir, load_settings, Settings};
use report_app::i18n::load_catalog;
use report_app::{http_services, AppState, CourseProps, Engine, SessionStore};
use report_client::ApiClient;
use report_core::prelude::*;

use crate::cli::Args;
use crate::headless;

/// Run the program; `Ok(false)` means a headless report was not filed
pub async fn run(args: Args) -> Result<bool> {
    let config_dir = args.config_dir();

    if args.init_config {
        let path = init_config_dir(&config_dir)?;
        println!("Config file: {}", path.display());
        return Ok(true);
    }

    // Log to file, the terminal belongs to the TUI or the event stream
    report_core::logging::init()?;

    info!("═══════════════════════════════════════════════════════");
    info!("Course Report Desk starting");
    info!("Config dir: {}", config_dir.display());
    info!("═══════════════════════════════════════════════════════");

    let result = run_with_config(&args, &config_dir).await;

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }

    info!("Course Report Desk exiting");
    result
}

async fn run_with_config(args: &Args, config_dir: &Path) -> Result<bool> {
    let settings = resolve_settings(args, config_dir);

    let course_id = args
        .course_id
        .ok_or_else(|| Error::config("--course-id is required"))?;

    let catalog = load_catalog(config_dir, &settings.ui.language);
    let session = SessionStore::with_token(settings.session.token());
    let client = ApiClient::new(&settings.api.client_config())?;
    let services = http_services(client, session.clone());

    let course = CourseProps {
        course_id,
        course_name: args.course_name.clone(),
        open: args.headless || !args.closed,
    };
    let state = AppState::new(course, catalog, Arc::new(session));
    let engine = Engine::new(state, services);

    if args.headless {
        let options = args.headless_options()?;
        let outcome = headless::run_headless(engine, options).await?;
        Ok(outcome.is_success())
    } else {
        report_tui::run(engine).await?;
        Ok(true)
    }
}

/// config.toml, then environment, then flags
fn resolve_settings(args: &Args, config_dir: &Path) -> Settings {
    let mut settings = load_settings(config_dir);
    apply_env_overrides(&mut settings);
    args.apply_to(&mut settings);
    debug!(
        "Settings: api={} lang={} session={}",
        settings.api.base_url,
        settings.ui.language,
        settings.session.token().is_some()
    );
    settings
}
