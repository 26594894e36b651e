//! Headless mode - scripted report submission with JSON event output
//!
//! Instead of drawing the dialog, the runner fills it in from command-line
//! options, posts it and prints what happened to stdout as NDJSON, one event
//! per line. Useful for scripts and end-to-end checks against a real service.
//!
//! # Example Output
//!
//! ```json
//! {"event":"submission_started","course_id":42,"timestamp":1704700001000}
//! {"event":"login_required","timestamp":1704700001020}
//! {"event":"login_succeeded","username":"ada","timestamp":1704700001300}
//! {"event":"submission_started","course_id":42,"timestamp":1704700001310}
//! {"event":"report_filed","course_id":42,"report_id":17,"reason":"spam","timestamp":1704700001500}
//! {"event":"dialog_closed","course_id":42,"timestamp":1704700001500}
//! ```

pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use serde::Serialize;
use tracing::error;

use report_app::EngineEvent;
use report_core::CourseId;

pub use runner::{run_headless, run_headless_with_output, HeadlessOptions, HeadlessOutcome};

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    SubmissionStarted {
        course_id: CourseId,
        timestamp: i64,
    },

    /// Submit was attempted without a session
    LoginRequired { timestamp: i64 },

    LoginSucceeded {
        username: Option<String>,
        timestamp: i64,
    },

    LoginFailed { message: String, timestamp: i64 },

    ReportFiled {
        course_id: CourseId,
        report_id: Option<u64>,
        reason: Option<String>,
        timestamp: i64,
    },

    SubmissionFailed { message: String, timestamp: i64 },

    DialogClosed {
        course_id: CourseId,
        timestamp: i64,
    },

    /// The run could not go on
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let mut stdout = io::stdout().lock();
        self.write_to(&mut stdout);
    }

    /// Write this event as one NDJSON line
    pub fn write_to(&self, out: &mut dyn Write) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        if let Err(e) = writeln!(out, "{}", json) {
            error!("Failed to write headless event: {}", e);
            return;
        }

        if let Err(e) = out.flush() {
            error!("Failed to flush headless output: {}", e);
        }
    }

    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn error(message: impl Into<String>, fatal: bool) -> Self {
        Self::Error {
            message: message.into(),
            fatal,
            timestamp: Self::now(),
        }
    }

    /// Map an engine event to its headless counterpart.
    ///
    /// `dialog_opened` and `shutdown` have no output.
    pub fn from_engine_event(event: &EngineEvent, course_id: CourseId) -> Option<Self> {
        let timestamp = Self::now();
        let mapped = match event {
            EngineEvent::SubmissionStarted { course_id } => Self::SubmissionStarted {
                course_id: *course_id,
                timestamp,
            },
            EngineEvent::LoginRequired => Self::LoginRequired { timestamp },
            EngineEvent::LoginSucceeded { username } => Self::LoginSucceeded {
                username: username.clone(),
                timestamp,
            },
            EngineEvent::LoginFailed { message } => Self::LoginFailed {
                message: message.clone(),
                timestamp,
            },
            EngineEvent::ReportFiled { report } => Self::ReportFiled {
                course_id: report.course_id.unwrap_or(course_id),
                report_id: report.id,
                reason: report.reason.clone(),
                timestamp,
            },
            EngineEvent::SubmissionFailed { message } => Self::SubmissionFailed {
                message: message.clone(),
                timestamp,
            },
            EngineEvent::DialogClosed { course_id } => Self::DialogClosed {
                course_id: *course_id,
                timestamp,
            },
            EngineEvent::DialogOpened { .. } | EngineEvent::Shutdown => return None,
        };
        Some(mapped)
    }
}
