//! report-app - Report dialog state and orchestration for Course Report Desk
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! "report this course" dialog: state, messages, the update function, the
//! actions that talk to the review service, and the Engine that ties them
//! together for the TUI and headless runners. Configuration, the translation
//! catalog and the session store live here too.

pub mod actions;
pub mod auth;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod i18n;
pub mod input_key;
pub mod login_dialog;
pub mod message;
pub mod process;
pub mod report_dialog;
pub mod services;
pub mod signals;
pub mod state;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_support;

// Re-export primary types
pub use auth::{AuthAccessor, SessionStore};
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use i18n::{Catalog, Translate};
pub use input_key::InputKey;
pub use message::Message;
pub use services::{http_services, LoginService, ReportService, Services};
pub use state::{AppState, CourseProps, UiMode};
