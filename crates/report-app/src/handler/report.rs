//! Report dialog handlers
//!
//! The dialog never closes itself: success and cancel both end in
//! `CloseReportDialog`, which the host handles.

use report_core::prelude::*;
use report_core::{CourseReport, ReportReason};

use crate::message::Message;
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

pub fn handle_open(state: &mut AppState) -> UpdateResult {
    if !state.report_dialog.open {
        debug!("Opening report dialog for course {}", state.course.course_id);
        state.open_report_dialog();
    }
    UpdateResult::none()
}

pub fn handle_close(state: &mut AppState) -> UpdateResult {
    if state.report_dialog.open {
        debug!("Closing report dialog");
        state.close_report_dialog();
    }
    UpdateResult::none()
}

/// Host success callback: remember the report, then close
pub fn handle_filed(state: &mut AppState, report: CourseReport) -> UpdateResult {
    info!("Report filed for course {} (id {:?})", state.course.course_id, report.id);
    state.record_report(report);
    UpdateResult::message(Message::CloseReportDialog)
}

pub fn handle_select_reason(state: &mut AppState, reason: ReportReason) -> UpdateResult {
    state.report_dialog.select_reason(reason);
    UpdateResult::none()
}

pub fn handle_set_details(state: &mut AppState, text: String) -> UpdateResult {
    state.report_dialog.set_details(text);
    UpdateResult::none()
}

pub fn handle_toggle_terms(state: &mut AppState, accepted: bool) -> UpdateResult {
    state.report_dialog.toggle_terms(accepted);
    UpdateResult::none()
}

pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    let dialog = &mut state.report_dialog;

    if !dialog.validate() {
        debug!("Submit ignored: no reason selected");
        return UpdateResult::none();
    }
    if !dialog.terms_accepted {
        debug!("Submit ignored: terms not accepted");
        return UpdateResult::none();
    }
    if dialog.is_in_flight() {
        debug!("Submit ignored: submission already in flight");
        return UpdateResult::none();
    }

    if !state.auth.has_session() {
        info!("No session, showing login prompt");
        dialog.show_login_prompt();
        state.login_dialog.dismiss();
        return UpdateResult::none();
    }

    let draft = dialog.begin_submission();
    info!(
        "Submitting report for course {} (reason {:?})",
        draft.course_id, draft.reason
    );
    UpdateResult::action(UpdateAction::SubmitReport { draft })
}

/// Reset the draft and close. Terms and status are left as they are.
pub fn handle_cancel(state: &mut AppState) -> UpdateResult {
    state.report_dialog.reset_draft();
    UpdateResult::message(Message::CloseReportDialog)
}

pub fn handle_submitted(state: &mut AppState, report: CourseReport) -> UpdateResult {
    if !state.report_dialog.is_in_flight() {
        warn!("Submission result arrived with no submission in flight");
    }
    state.report_dialog.complete_submission();
    UpdateResult::message(Message::ReportFiled { report })
}

pub fn handle_submission_failed(state: &mut AppState, message: String) -> UpdateResult {
    warn!("Report submission failed: {}", message);
    state.report_dialog.fail_submission(message);
    UpdateResult::none()
}
