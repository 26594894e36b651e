//! Configuration for Course Report Desk
//!
//! Supports:
//! - `<config_dir>/course-report/config.toml` - Service location, language, session
//! - `COURSE_REPORT_*` environment overrides

pub mod settings;
pub mod types;

pub use settings::{
    apply_env_overrides, default_config_dir, init_config_dir, load_settings, ENV_API_URL,
    ENV_LANG, ENV_TOKEN,
};
pub use types::*;
