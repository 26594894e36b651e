//! Message types for the application (TEA pattern)

use crate::input_key::InputKey;
use report_core::{CourseReport, ReportReason};

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Animation tick for the submission spinner
    Tick,

    Quit,

    // ─────────────────────────────────────────────────────────
    // Host Messages (the dialog's parent)
    // ─────────────────────────────────────────────────────────
    /// Make the report dialog visible
    OpenReportDialog,
    /// Parent's close callback
    CloseReportDialog,
    /// Parent's success callback, carries the service's report untouched
    ReportFiled { report: CourseReport },

    // ─────────────────────────────────────────────────────────
    // Report Dialog Messages
    // ─────────────────────────────────────────────────────────
    ReportSelectReason { reason: ReportReason },
    ReportSetDetails { text: String },
    ReportToggleTerms { accepted: bool },
    ReportFocusNext,
    ReportFocusPrev,
    ReportHighlightUp,
    ReportHighlightDown,
    /// Post pressed
    ReportSubmit,
    /// Cancel pressed: reset draft, then close
    ReportCancel,
    /// Submission task finished successfully
    ReportSubmitted { report: CourseReport },
    /// Submission task failed with a displayable message
    ReportSubmissionFailed { message: String },

    // ─────────────────────────────────────────────────────────
    // Login Prompt Messages
    // ─────────────────────────────────────────────────────────
    LoginPromptClose,
    LoginSetIdentifier { text: String },
    LoginSetPassword { text: String },
    LoginFocusNext,
    LoginFocusPrev,
    LoginSubmit,
    /// Session stored by the login task
    LoginSucceeded { username: Option<String> },
    LoginFailed { message: String },
}
