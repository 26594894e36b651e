//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::AppState;

use super::{keys::handle_key, login, report, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => {
            if state.is_busy() {
                state.tick = state.tick.wrapping_add(1);
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Host Messages
        // ─────────────────────────────────────────────────────────
        Message::OpenReportDialog => report::handle_open(state),
        Message::CloseReportDialog => report::handle_close(state),
        Message::ReportFiled { report } => report::handle_filed(state, report),

        // ─────────────────────────────────────────────────────────
        // Report Dialog Messages
        // ─────────────────────────────────────────────────────────
        Message::ReportSelectReason { reason } => report::handle_select_reason(state, reason),
        Message::ReportSetDetails { text } => report::handle_set_details(state, text),
        Message::ReportToggleTerms { accepted } => report::handle_toggle_terms(state, accepted),
        Message::ReportFocusNext => {
            state.report_dialog.focus_next();
            UpdateResult::none()
        }
        Message::ReportFocusPrev => {
            state.report_dialog.focus_prev();
            UpdateResult::none()
        }
        Message::ReportHighlightUp => {
            state.report_dialog.highlight_up();
            UpdateResult::none()
        }
        Message::ReportHighlightDown => {
            state.report_dialog.highlight_down();
            UpdateResult::none()
        }
        Message::ReportSubmit => report::handle_submit(state),
        Message::ReportCancel => report::handle_cancel(state),
        Message::ReportSubmitted { report } => report::handle_submitted(state, report),
        Message::ReportSubmissionFailed { message } => {
            report::handle_submission_failed(state, message)
        }

        // ─────────────────────────────────────────────────────────
        // Login Prompt Messages
        // ─────────────────────────────────────────────────────────
        Message::LoginPromptClose => login::handle_close(state),
        Message::LoginSetIdentifier { text } => {
            state.login_dialog.identifier = text;
            UpdateResult::none()
        }
        Message::LoginSetPassword { text } => {
            state.login_dialog.password = text;
            UpdateResult::none()
        }
        Message::LoginFocusNext => {
            state.login_dialog.focus_next();
            UpdateResult::none()
        }
        Message::LoginFocusPrev => {
            state.login_dialog.focus_prev();
            UpdateResult::none()
        }
        Message::LoginSubmit => login::handle_submit(state),
        Message::LoginSucceeded { username } => login::handle_succeeded(state, username),
        Message::LoginFailed { message } => login::handle_failed(state, message),
    }
}
