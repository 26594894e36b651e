//! Configuration types for Course Report Desk
//!
//! Defines:
//! - `Settings` - Contents of `config.toml`
//! - `ApiSettings`, `UiSettings`, `SessionSettings` - Its sections

use std::time::Duration;

use report_client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_LOGIN_PATH, DEFAULT_REPORT_PATH};
use serde::{Deserialize, Serialize};

use crate::i18n::DEFAULT_LANGUAGE;

/// Global settings from `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub ui: UiSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

/// Review service location
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_report_path")]
    pub report_path: String,

    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Request timeout in seconds (0 is treated as 1)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            report_path: default_report_path(),
            login_path: default_login_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiSettings {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            report_path: self.report_path.clone(),
            login_path: self.login_path.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiSettings {
    /// Locale code for dialog text
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

/// Pre-seeded session, e.g. a token from a previous sign-in
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionSettings {
    #[serde(default)]
    pub token: String,
}

impl SessionSettings {
    pub fn token(&self) -> Option<String> {
        let token = self.token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_report_path() -> String {
    DEFAULT_REPORT_PATH.to_string()
}

fn default_login_path() -> String {
    DEFAULT_LOGIN_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}
