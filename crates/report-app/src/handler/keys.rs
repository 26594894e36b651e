//! Key event handlers for different UI modes

use crate::input_key::InputKey;
use crate::login_dialog::{LoginDialogState, LoginField};
use crate::message::Message;
use crate::report_dialog::{ReportDialogState, ReportField};
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Force quit with Ctrl+C from anywhere
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    match state.ui_mode() {
        UiMode::Course => handle_key_course(key),
        UiMode::ReportDialog => handle_key_report_dialog(&state.report_dialog, key),
        UiMode::LoginPrompt => handle_key_login_prompt(&state.login_dialog, key),
    }
}

/// Course card: reopen the dialog or quit
fn handle_key_course(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('r') | InputKey::Enter => Some(Message::OpenReportDialog),
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),
        _ => None,
    }
}

fn handle_key_report_dialog(dialog: &ReportDialogState, key: InputKey) -> Option<Message> {
    match key {
        // Dismiss like clicking outside the modal: no draft reset
        InputKey::Esc => return Some(Message::CloseReportDialog),
        InputKey::Tab => return Some(Message::ReportFocusNext),
        InputKey::BackTab => return Some(Message::ReportFocusPrev),
        InputKey::CharCtrl('s') => return dialog.can_submit().then_some(Message::ReportSubmit),
        _ => {}
    }

    match dialog.focus {
        ReportField::Reasons => handle_key_reasons(dialog, key),
        ReportField::Details => handle_key_details(dialog, key),
        ReportField::Terms if key.is_activate() => Some(Message::ReportToggleTerms {
            accepted: !dialog.terms_accepted,
        }),
        // Disabled Post swallows the key
        ReportField::Post if key.is_activate() => {
            dialog.can_submit().then_some(Message::ReportSubmit)
        }
        ReportField::Cancel if key.is_activate() => Some(Message::ReportCancel),
        _ => None,
    }
}

fn handle_key_reasons(dialog: &ReportDialogState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Up | InputKey::Char('k') => Some(Message::ReportHighlightUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::ReportHighlightDown),
        _ if key.is_activate() => dialog
            .highlighted_reason()
            .map(|reason| Message::ReportSelectReason { reason }),
        // Number shortcuts pick the nth option
        InputKey::Char(c @ '1'..='9') => {
            let index = c.to_digit(10)? as usize - 1;
            dialog
                .options
                .get(index)
                .map(|option| Message::ReportSelectReason {
                    reason: option.value,
                })
        }
        _ => None,
    }
}

fn handle_key_details(dialog: &ReportDialogState, key: InputKey) -> Option<Message> {
    let mut text = dialog.draft.details.clone();
    match key {
        InputKey::Char(c) => text.push(c),
        InputKey::Enter => text.push('\n'),
        InputKey::Backspace => {
            text.pop()?;
        }
        InputKey::CharCtrl('u') => {
            if text.is_empty() {
                return None;
            }
            text.clear();
        }
        _ => return None,
    }
    Some(Message::ReportSetDetails { text })
}

fn handle_key_login_prompt(login: &LoginDialogState, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => return Some(Message::LoginPromptClose),
        InputKey::Tab => return Some(Message::LoginFocusNext),
        InputKey::BackTab => return Some(Message::LoginFocusPrev),
        _ => {}
    }

    match login.focus {
        LoginField::Identifier => match key {
            InputKey::Enter => Some(Message::LoginFocusNext),
            _ => edit_text(&login.identifier, key).map(|text| Message::LoginSetIdentifier { text }),
        },
        LoginField::Password => match key {
            InputKey::Enter => login.can_submit().then_some(Message::LoginSubmit),
            _ => edit_text(&login.password, key).map(|text| Message::LoginSetPassword { text }),
        },
        LoginField::Submit if key.is_activate() => {
            login.can_submit().then_some(Message::LoginSubmit)
        }
        LoginField::Cancel if key.is_activate() => Some(Message::LoginPromptClose),
        _ => None,
    }
}

/// Single-line edit: typing appends, Backspace pops, Ctrl+U clears
fn edit_text(current: &str, key: InputKey) -> Option<String> {
    let mut text = current.to_string();
    match key {
        InputKey::Char(c) => text.push(c),
        InputKey::Backspace => {
            text.pop()?;
        }
        InputKey::CharCtrl('u') => text.clear(),
        _ => return None,
    }
    Some(text)
}
