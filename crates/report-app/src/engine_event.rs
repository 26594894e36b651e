//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner turns them into NDJSON.

use report_core::{CourseId, CourseReport};

/// Domain events emitted by the Engine for external consumers.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Dialog Visibility
    // ─────────────────────────────────────────────────────────
    DialogOpened { course_id: CourseId },
    DialogClosed { course_id: CourseId },

    // ─────────────────────────────────────────────────────────
    // Submission
    // ─────────────────────────────────────────────────────────
    SubmissionStarted { course_id: CourseId },

    /// The success callback ran with this report
    ReportFiled { report: CourseReport },

    SubmissionFailed { message: String },

    // ─────────────────────────────────────────────────────────
    // Login
    // ─────────────────────────────────────────────────────────
    /// Submit was attempted without a session
    LoginRequired,
    LoginSucceeded { username: Option<String> },
    LoginFailed { message: String },

    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Snake-case name used in event streams
    pub fn event_type(&self) -> &'static str {
        match self {
            EngineEvent::DialogOpened { .. } => "dialog_opened",
            EngineEvent::DialogClosed { .. } => "dialog_closed",
            EngineEvent::SubmissionStarted { .. } => "submission_started",
            EngineEvent::ReportFiled { .. } => "report_filed",
            EngineEvent::SubmissionFailed { .. } => "submission_failed",
            EngineEvent::LoginRequired => "login_required",
            EngineEvent::LoginSucceeded { .. } => "login_succeeded",
            EngineEvent::LoginFailed { .. } => "login_failed",
            EngineEvent::Shutdown => "shutdown",
        }
    }
}
