//! Settings loader for `<config_dir>/course-report/config.toml`

use std::path::{Path, PathBuf};

use super::types::Settings;
use report_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const APP_DIR: &str = "course-report";

pub const ENV_API_URL: &str = "COURSE_REPORT_API_URL";
pub const ENV_TOKEN: &str = "COURSE_REPORT_TOKEN";
pub const ENV_LANG: &str = "COURSE_REPORT_LANG";

/// Platform config directory for the app, `./.course-report` if unknown
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR)))
}

/// Load settings from `config_dir/config.toml`.
///
/// Missing or malformed files fall back to defaults.
pub fn load_settings(config_dir: &Path) -> Settings {
    let config_path = config_dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create `config_dir` and a commented default `config.toml`.
/// An existing file is left alone.
pub fn init_config_dir(config_dir: &Path) -> Result<PathBuf> {
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", config_dir, e)))?;
        info!("Created config directory {:?}", config_dir);
    }

    let config_path = config_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        std::fs::write(&config_path, generate_default_config())
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config.toml");
    }

    Ok(config_path)
}

fn generate_default_config() -> &'static str {
    r#"# Course Report Desk configuration

[api]
# Review service root; endpoint paths are appended to it
base_url = "http://localhost:1337/api"
report_path = "/course-reports"
login_path = "/auth/local"
timeout_secs = 30

[ui]
# Locale overrides are read from locales/<language>.toml next to this file
language = "en"

[session]
# Session token; leave empty to sign in from the dialog
token = ""
"#
}

/// Apply `COURSE_REPORT_*` environment variables
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides_from(settings, |key| std::env::var(key).ok());
}

fn apply_overrides_from(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = lookup(ENV_API_URL) {
        debug!("{} overrides api.base_url", ENV_API_URL);
        settings.api.base_url = url;
    }
    if let Some(token) = lookup(ENV_TOKEN) {
        debug!("{} provides a session token", ENV_TOKEN);
        settings.session.token = token;
    }
    if let Some(lang) = lookup(ENV_LANG) {
        settings.ui.language = lang;
    }
}
