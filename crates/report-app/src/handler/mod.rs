//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `report`: Report dialog handlers
//! - `login`: Login prompt handlers

pub(crate) mod keys;
pub(crate) mod login;
pub(crate) mod report;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use crate::message::Message;
use report_client::Credentials;
use report_core::ReportDraft;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Send the draft to the review service
    SubmitReport { draft: ReportDraft },

    /// Exchange credentials for a session
    Login { credentials: Credentials },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
