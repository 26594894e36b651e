//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

use report_app::config::Settings;
use report_client::Credentials;
use report_core::prelude::*;
use report_core::{CourseId, ReportReason};

use crate::headless::HeadlessOptions;

/// Course Report Desk - report a course to its moderators
#[derive(Parser, Debug, Clone)]
#[command(name = "course-report")]
#[command(about = "Report a course to its moderators", long_about = None)]
pub struct Args {
    /// Course to report
    #[arg(long, value_name = "ID", required_unless_present = "init_config")]
    pub course_id: Option<CourseId>,

    /// Course title shown in the dialog
    #[arg(long, value_name = "NAME", default_value = "")]
    pub course_name: String,

    /// Review service base URL (overrides config and environment)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Session token (JWT)
    #[arg(long, value_name = "JWT")]
    pub token: Option<String>,

    /// Language code for labels
    #[arg(long, value_name = "CODE")]
    pub lang: Option<String>,

    /// Configuration directory
    #[arg(long, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Start with the dialog closed, on the course card
    #[arg(long)]
    pub closed: bool,

    /// Write a default config.toml and exit
    #[arg(long)]
    pub init_config: bool,

    /// Submit without a TUI, printing JSON events
    #[arg(long)]
    pub headless: bool,

    /// Reason code: misguiding, spam, misplacement, harmful, other
    #[arg(long, value_name = "CODE", requires = "headless")]
    pub reason: Option<String>,

    /// Free-text details
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub details: String,

    /// Accept the terms checkbox
    #[arg(long)]
    pub accept_terms: bool,

    /// Sign-in identifier used if the login prompt appears
    #[arg(long, value_name = "USER", requires = "headless", requires = "password")]
    pub identifier: Option<String>,

    /// Sign-in password used if the login prompt appears
    #[arg(long, value_name = "PASS", requires = "identifier")]
    pub password: Option<String>,
}

impl Args {
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir
            .clone()
            .unwrap_or_else(report_app::config::default_config_dir)
    }

    /// Flags win over the config file and environment
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(url) = &self.api_url {
            settings.api.base_url = url.clone();
        }
        if let Some(token) = &self.token {
            settings.session.token = token.clone();
        }
        if let Some(lang) = &self.lang {
            settings.ui.language = lang.clone();
        }
    }

    pub fn headless_options(&self) -> Result<HeadlessOptions> {
        let reason = self
            .reason
            .as_deref()
            .map(str::parse::<ReportReason>)
            .transpose()?;

        let credentials = match (&self.identifier, &self.password) {
            (Some(identifier), Some(password)) => {
                Some(Credentials::new(identifier.as_str(), password.as_str()))
            }
            _ => None,
        };

        Ok(HeadlessOptions {
            reason,
            details: self.details.clone(),
            accept_terms: self.accept_terms,
            credentials,
        })
    }
}
