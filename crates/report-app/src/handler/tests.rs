//! Tests for handler module

use std::sync::Arc;

use super::*;
use crate::auth::MockAuthAccessor;
use crate::i18n::Catalog;
use crate::input_key::InputKey;
use crate::report_dialog::ReportField;
use crate::state::{AppState, CourseProps, LoginOutcome, UiMode};
use report_client::{ApiError, GENERIC_ERROR_MESSAGE};
use report_core::{CourseReport, ReportDraft, ReportReason, SubmissionStatus};
use serde_json::json;

const COURSE_ID: u64 = 42;

fn auth(signed_in: bool) -> Arc<MockAuthAccessor> {
    let mut mock = MockAuthAccessor::new();
    mock.expect_has_session().return_const(signed_in);
    mock.expect_session_token()
        .returning(move || signed_in.then(|| "jwt".to_string()));
    Arc::new(mock)
}

fn test_state(signed_in: bool) -> AppState {
    AppState::new(
        CourseProps {
            course_id: COURSE_ID,
            course_name: "Ownership in Practice".to_string(),
            open: true,
        },
        Catalog::english(),
        auth(signed_in),
    )
}

fn ready_state(signed_in: bool) -> AppState {
    let mut state = test_state(signed_in);
    update(
        &mut state,
        Message::ReportSelectReason {
            reason: ReportReason::Misguiding,
        },
    );
    update(
        &mut state,
        Message::ReportSetDetails {
            text: "Half the lessons are about Go".to_string(),
        },
    );
    update(&mut state, Message::ReportToggleTerms { accepted: true });
    state
}

/// Run a message and all its follow-ups, the way `process_message` does.
/// Returns the follow-up messages and the actions produced.
fn run(state: &mut AppState, message: Message) -> (Vec<Message>, Vec<UpdateAction>) {
    let mut followups = Vec::new();
    let mut actions = Vec::new();
    let mut next = Some(message);
    let mut first = true;

    while let Some(msg) = next {
        if !first {
            followups.push(msg.clone());
        }
        first = false;

        let result = update(state, msg);
        actions.extend(result.action);
        next = result.message;
    }
    (followups, actions)
}

fn submitted_drafts(actions: &[UpdateAction]) -> Vec<ReportDraft> {
    actions
        .iter()
        .filter_map(|action| match action {
            UpdateAction::SubmitReport { draft } => Some(draft.clone()),
            _ => None,
        })
        .collect()
}

// ─────────────────────────────────────────────────────────
// Validation and gating
// ─────────────────────────────────────────────────────────

#[test]
fn test_no_reason_never_submits() {
    let mut state = test_state(true);
    update(&mut state, Message::ReportToggleTerms { accepted: true });
    update(
        &mut state,
        Message::ReportSetDetails {
            text: "something".to_string(),
        },
    );
    assert!(!state.report_dialog.validate());

    let (_, actions) = run(&mut state, Message::ReportSubmit);
    assert!(actions.is_empty());
    assert_eq!(state.report_dialog.status, SubmissionStatus::Idle);
}

#[test]
fn test_every_reason_validates_with_course() {
    for reason in ReportReason::ALL {
        let mut state = test_state(true);
        update(&mut state, Message::ReportSelectReason { reason });
        assert!(state.report_dialog.validate(), "{} should validate", reason);
    }
}

#[test]
fn test_terms_not_accepted_disables_submit() {
    let mut state = test_state(true);
    update(
        &mut state,
        Message::ReportSelectReason {
            reason: ReportReason::Spam,
        },
    );
    assert!(state.report_dialog.validate());
    assert!(!state.report_dialog.can_submit());

    // Neither the Post control nor a direct submit gets through
    state.report_dialog.focus = ReportField::Post;
    assert!(handle_key(&state, InputKey::Enter).is_none());
    assert!(handle_key(&state, InputKey::CharCtrl('s')).is_none());

    let (_, actions) = run(&mut state, Message::ReportSubmit);
    assert!(actions.is_empty());
}

// ─────────────────────────────────────────────────────────
// Auth gate
// ─────────────────────────────────────────────────────────

#[test]
fn test_no_session_shows_login_prompt() {
    let mut state = ready_state(false);

    let (followups, actions) = run(&mut state, Message::ReportSubmit);

    assert!(followups.is_empty());
    assert!(actions.is_empty());
    assert!(state.report_dialog.login_prompt_visible);
    assert_eq!(state.ui_mode(), UiMode::LoginPrompt);
    assert_eq!(state.report_dialog.status, SubmissionStatus::Idle);
}

#[test]
fn test_session_submits_current_draft_once() {
    let mut state = ready_state(true);
    let expected = state.report_dialog.draft.clone();

    let (_, actions) = run(&mut state, Message::ReportSubmit);

    assert_eq!(submitted_drafts(&actions), vec![expected]);
    assert!(state.report_dialog.is_in_flight());
    assert!(!state.report_dialog.login_prompt_visible);
}

#[test]
fn test_submit_while_in_flight_is_noop() {
    let mut state = ready_state(true);
    let (_, first) = run(&mut state, Message::ReportSubmit);
    let (_, second) = run(&mut state, Message::ReportSubmit);

    assert_eq!(submitted_drafts(&first).len(), 1);
    assert!(second.is_empty());
}

#[test]
fn test_retry_after_failure_submits_again() {
    let mut state = ready_state(true);
    run(&mut state, Message::ReportSubmit);
    run(
        &mut state,
        Message::ReportSubmissionFailed {
            message: "Timeout".to_string(),
        },
    );
    assert!(state.report_dialog.can_submit());

    let (_, actions) = run(&mut state, Message::ReportSubmit);
    assert_eq!(submitted_drafts(&actions).len(), 1);
}

// ─────────────────────────────────────────────────────────
// Completion
// ─────────────────────────────────────────────────────────

#[test]
fn test_success_calls_filed_then_close_once_each() {
    let mut state = ready_state(true);
    run(&mut state, Message::ReportSubmit);

    let report = CourseReport {
        id: Some(501),
        course_id: Some(COURSE_ID),
        ..Default::default()
    };
    let (followups, actions) = run(
        &mut state,
        Message::ReportSubmitted {
            report: report.clone(),
        },
    );

    assert!(actions.is_empty());
    assert_eq!(followups.len(), 2);
    assert!(matches!(&followups[0], Message::ReportFiled { report: r } if *r == report));
    assert!(matches!(followups[1], Message::CloseReportDialog));

    assert_eq!(state.filed_reports, vec![report]);
    assert!(!state.report_dialog.open);
    assert_eq!(state.report_dialog.status, SubmissionStatus::Idle);
    assert_eq!(state.report_dialog.draft, ReportDraft::new(COURSE_ID));
}

#[test]
fn test_failure_shows_server_error_message() {
    let mut state = ready_state(true);
    run(&mut state, Message::ReportSubmit);

    let error = ApiError::Status {
        status: 400,
        body: Some(json!({"error": "Course already reported"})),
    };
    run(
        &mut state,
        Message::ReportSubmissionFailed {
            message: error.user_message(),
        },
    );

    assert_eq!(
        state.report_dialog.error_message(),
        Some("Course already reported")
    );
    assert!(state.report_dialog.open);
    assert_eq!(
        state.report_dialog.draft.reason,
        Some(ReportReason::Misguiding)
    );
}

#[test]
fn test_failure_without_error_field_uses_fallback() {
    let mut state = ready_state(true);
    run(&mut state, Message::ReportSubmit);

    let error = ApiError::Status {
        status: 500,
        body: Some(json!({"message": "boom"})),
    };
    run(
        &mut state,
        Message::ReportSubmissionFailed {
            message: error.user_message(),
        },
    );

    assert_eq!(
        state.report_dialog.error_message(),
        Some(GENERIC_ERROR_MESSAGE)
    );
}

// ─────────────────────────────────────────────────────────
// Cancel and dismiss
// ─────────────────────────────────────────────────────────

#[test]
fn test_cancel_resets_draft_then_closes_once() {
    let mut state = ready_state(true);

    let (followups, actions) = run(&mut state, Message::ReportCancel);

    assert!(actions.is_empty());
    assert_eq!(followups.len(), 1);
    assert!(matches!(followups[0], Message::CloseReportDialog));
    assert_eq!(state.report_dialog.draft, ReportDraft::new(COURSE_ID));
    assert!(!state.report_dialog.open);
}

#[test]
fn test_cancel_keeps_terms_and_failure_message() {
    let mut state = ready_state(true);
    run(&mut state, Message::ReportSubmit);
    run(
        &mut state,
        Message::ReportSubmissionFailed {
            message: "Nope".to_string(),
        },
    );

    run(&mut state, Message::ReportCancel);

    assert!(state.report_dialog.terms_accepted);
    assert_eq!(state.report_dialog.error_message(), Some("Nope"));
}

#[test]
fn test_escape_dismisses_without_reset() {
    let mut state = ready_state(true);

    let msg = handle_key(&state, InputKey::Esc).unwrap();
    let (followups, _) = run(&mut state, msg);

    assert!(followups.is_empty());
    assert!(!state.report_dialog.open);
    assert_eq!(
        state.report_dialog.draft.reason,
        Some(ReportReason::Misguiding)
    );

    run(&mut state, Message::OpenReportDialog);
    assert!(state.report_dialog.open);
    assert_eq!(
        state.report_dialog.draft.details,
        "Half the lessons are about Go"
    );
}

// ─────────────────────────────────────────────────────────
// Keyboard
// ─────────────────────────────────────────────────────────

#[test]
fn test_keyboard_walkthrough_submits() {
    let mut state = test_state(true);

    let keys = [
        InputKey::Down,
        InputKey::Down,
        InputKey::Char(' '), // misplacement
        InputKey::Tab,
        InputKey::Char('h'),
        InputKey::Char('i'),
        InputKey::Enter,
        InputKey::Char('!'),
        InputKey::Tab,
        InputKey::Char(' '), // terms
        InputKey::Tab,
    ];
    for key in keys {
        if let Some(msg) = handle_key(&state, key) {
            run(&mut state, msg);
        }
    }

    assert_eq!(
        state.report_dialog.draft.reason,
        Some(ReportReason::Misplacement)
    );
    assert_eq!(state.report_dialog.draft.details, "hi\n!");
    assert!(state.report_dialog.terms_accepted);
    assert_eq!(state.report_dialog.focus, ReportField::Post);

    let msg = handle_key(&state, InputKey::Enter).unwrap();
    let (_, actions) = run(&mut state, msg);
    assert_eq!(submitted_drafts(&actions).len(), 1);
}

#[test]
fn test_details_backspace_and_clear() {
    let mut state = ready_state(true);
    state.report_dialog.focus = ReportField::Details;

    let msg = handle_key(&state, InputKey::Backspace).unwrap();
    run(&mut state, msg);
    assert_eq!(state.report_dialog.draft.details, "Half the lessons are about G");

    let msg = handle_key(&state, InputKey::CharCtrl('u')).unwrap();
    run(&mut state, msg);
    assert!(state.report_dialog.draft.details.is_empty());
    assert!(handle_key(&state, InputKey::CharCtrl('u')).is_none());
}

#[test]
fn test_ctrl_c_quits_from_any_mode() {
    let mut state = test_state(false);
    assert!(matches!(
        handle_key(&state, InputKey::CharCtrl('c')),
        Some(Message::Quit)
    ));

    run(&mut state, Message::Quit);
    assert!(state.should_quit());
}

#[test]
fn test_course_card_keys() {
    let mut state = test_state(false);
    run(&mut state, Message::CloseReportDialog);
    assert_eq!(state.ui_mode(), UiMode::Course);

    assert!(matches!(
        handle_key(&state, InputKey::Char('r')),
        Some(Message::OpenReportDialog)
    ));
    assert!(matches!(
        handle_key(&state, InputKey::Char('q')),
        Some(Message::Quit)
    ));
}

// ─────────────────────────────────────────────────────────
// Login prompt
// ─────────────────────────────────────────────────────────

#[test]
fn test_login_prompt_typing_and_submit() {
    let mut state = ready_state(false);
    run(&mut state, Message::ReportSubmit);

    for c in "ada".chars() {
        let msg = handle_key(&state, InputKey::Char(c)).unwrap();
        run(&mut state, msg);
    }
    let msg = handle_key(&state, InputKey::Enter).unwrap();
    run(&mut state, msg);
    for c in "pw".chars() {
        let msg = handle_key(&state, InputKey::Char(c)).unwrap();
        run(&mut state, msg);
    }

    assert_eq!(state.login_dialog.identifier, "ada");
    assert_eq!(state.login_dialog.password, "pw");

    let msg = handle_key(&state, InputKey::Enter).unwrap();
    let (_, actions) = run(&mut state, msg);
    assert!(matches!(
        actions.as_slice(),
        [UpdateAction::Login { credentials }] if credentials.identifier == "ada"
    ));
    assert!(state.login_dialog.in_flight);

    // Second submit while signing in does nothing
    let (_, again) = run(&mut state, Message::LoginSubmit);
    assert!(again.is_empty());
}

#[test]
fn test_login_success_hides_prompt_without_resubmitting() {
    let mut state = ready_state(false);
    run(&mut state, Message::ReportSubmit);
    state.login_dialog.in_flight = true;

    let (followups, actions) = run(
        &mut state,
        Message::LoginSucceeded {
            username: Some("ada".to_string()),
        },
    );

    assert!(followups.is_empty());
    assert!(actions.is_empty());
    assert!(!state.report_dialog.login_prompt_visible);
    assert_eq!(state.ui_mode(), UiMode::ReportDialog);
    assert_eq!(state.notice.as_deref(), Some("Signed in as ada"));
    assert_eq!(state.report_dialog.status, SubmissionStatus::Idle);
    assert!(!state.login_dialog.in_flight);
    assert_eq!(
        state.login_outcomes,
        vec![LoginOutcome::SignedIn {
            username: Some("ada".to_string())
        }]
    );
}

#[test]
fn test_login_failure_shows_error() {
    let mut state = ready_state(false);
    run(&mut state, Message::ReportSubmit);
    state.login_dialog.in_flight = true;

    run(
        &mut state,
        Message::LoginFailed {
            message: "Invalid identifier or password".to_string(),
        },
    );

    assert!(state.report_dialog.login_prompt_visible);
    assert!(!state.login_dialog.in_flight);
    assert_eq!(
        state.login_dialog.error.as_deref(),
        Some("Invalid identifier or password")
    );
}

#[test]
fn test_escape_mid_login_records_no_outcome() {
    let mut state = ready_state(false);
    run(&mut state, Message::ReportSubmit);
    state.login_dialog.identifier = "ada".to_string();
    state.login_dialog.password = "wrong".to_string();
    run(&mut state, Message::LoginSubmit);

    run(&mut state, Message::LoginPromptClose);
    assert!(state.login_outcomes.is_empty());
    assert!(state.login_dialog.in_flight);
    assert!(state.is_busy());

    // Reopening the prompt cannot start a second sign-in
    run(&mut state, Message::ReportSubmit);
    let (_, actions) = run(&mut state, Message::LoginSubmit);
    assert!(actions.is_empty());

    run(
        &mut state,
        Message::LoginFailed {
            message: "Invalid identifier or password".to_string(),
        },
    );
    assert_eq!(
        state.login_outcomes,
        vec![LoginOutcome::Rejected {
            message: "Invalid identifier or password".to_string()
        }]
    );
    assert!(!state.is_busy());
}

#[test]
fn test_escape_closes_login_prompt_only() {
    let mut state = ready_state(false);
    run(&mut state, Message::ReportSubmit);

    let msg = handle_key(&state, InputKey::Esc).unwrap();
    run(&mut state, msg);

    assert_eq!(state.ui_mode(), UiMode::ReportDialog);
    assert!(state.report_dialog.open);
}

#[test]
fn test_tick_only_advances_while_busy() {
    let mut state = ready_state(true);
    run(&mut state, Message::Tick);
    assert_eq!(state.tick, 0);

    run(&mut state, Message::ReportSubmit);
    run(&mut state, Message::Tick);
    assert_eq!(state.tick, 1);
}
