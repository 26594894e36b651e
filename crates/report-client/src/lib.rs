//! report-client - Review service HTTP client for Course Report Desk
//!
//! Talks to the backend that stores course reports and issues session tokens:
//! - [`ApiClient::report_course`] posts a [`report_core::ReportDraft`]
//! - [`ApiClient::login`] exchanges [`Credentials`] for an [`AuthResponse`]
//!
//! Failures are returned as [`ApiError`], which knows how to pull the
//! server's own `error` message out of a rejection body.

pub mod auth;
pub mod client;
pub mod error;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_server;

pub use auth::{AuthResponse, AuthUser, Credentials};
pub use client::{
    ApiClient, ClientConfig, DEFAULT_BASE_URL, DEFAULT_LOGIN_PATH, DEFAULT_REPORT_PATH,
    DEFAULT_TIMEOUT,
};
pub use error::{ApiError, GENERIC_ERROR_MESSAGE};
