//! # report-core - Core Domain Types
//!
//! Foundation crate for Course Report Desk. Provides the report domain types,
//! error handling and logging setup.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`ReportReason`] - The fixed set of reasons a course can be reported for
//! - [`ReportDraft`] - The in-progress report (course, reason, details)
//! - [`CourseReport`] - The report as created by the review service
//! - [`SubmissionStatus`] - Idle / InFlight / Failed
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum organized by layer
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use report_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod prelude;
pub mod types;

pub use error::{Error, Result};
pub use types::{CourseId, CourseReport, ReportDraft, ReportReason, SubmissionStatus};
