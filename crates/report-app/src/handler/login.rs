//! Login prompt handlers

use report_core::prelude::*;

use crate::state::{AppState, LoginOutcome};

use super::{UpdateAction, UpdateResult};

pub fn handle_close(state: &mut AppState) -> UpdateResult {
    state.report_dialog.hide_login_prompt();
    state.login_dialog.dismiss();
    UpdateResult::none()
}

pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    if !state.login_dialog.can_submit() {
        debug!("Login submit ignored");
        return UpdateResult::none();
    }

    let credentials = state.login_dialog.begin();
    info!("Signing in as {}", credentials.identifier);
    UpdateResult::action(UpdateAction::Login { credentials })
}

/// The session is already stored; the user posts the report again themselves
pub fn handle_succeeded(state: &mut AppState, username: Option<String>) -> UpdateResult {
    state.login_dialog.succeed();
    state.report_dialog.hide_login_prompt();
    state.notice = Some(match &username {
        Some(name) => format!("Signed in as {}", name),
        None => "Signed in".to_string(),
    });
    state.login_outcomes.push(LoginOutcome::SignedIn { username });
    UpdateResult::none()
}

pub fn handle_failed(state: &mut AppState, message: String) -> UpdateResult {
    warn!("Login failed: {}", message);
    state.login_dialog.fail(message.clone());
    state.login_outcomes.push(LoginOutcome::Rejected { message });
    UpdateResult::none()
}
