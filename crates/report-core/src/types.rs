//! Core domain types for course reports

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Identifier of a course in the catalogue. Zero means "not set".
pub type CourseId = u64;

/// Why a course is being reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportReason {
    /// Misleading or inaccurate content
    Misguiding,
    Spam,
    /// Course is in the wrong category
    Misplacement,
    Harmful,
    Other,
}

impl ReportReason {
    /// All reasons in display order
    pub const ALL: [ReportReason; 5] = [
        ReportReason::Misguiding,
        ReportReason::Spam,
        ReportReason::Misplacement,
        ReportReason::Harmful,
        ReportReason::Other,
    ];

    /// Wire code sent to the review service
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportReason::Misguiding => "misguiding",
            ReportReason::Spam => "spam",
            ReportReason::Misplacement => "misplacement",
            ReportReason::Harmful => "harmful",
            ReportReason::Other => "other",
        }
    }

    /// Translation key for the option label
    pub fn label_key(&self) -> &'static str {
        match self {
            ReportReason::Misguiding => "courseReportDialog.misguiding",
            ReportReason::Spam => "courseReportDialog.spam",
            ReportReason::Misplacement => "courseReportDialog.misplacement",
            ReportReason::Harmful => "courseReportDialog.harmful",
            ReportReason::Other => "courseReportDialog.other",
        }
    }
}

impl fmt::Display for ReportReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportReason {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportReason::ALL
            .into_iter()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| Error::invalid_reason(s))
    }
}

/// Serializes `Option<ReportReason>` as its code, with `""` for "unselected".
mod reason_code {
    use super::ReportReason;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        reason: &Option<ReportReason>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(reason.map(|r| r.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ReportReason>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(de::Error::custom)
    }
}

/// The in-progress, not-yet-submitted report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDraft {
    pub course_id: CourseId,
    #[serde(with = "reason_code")]
    pub reason: Option<ReportReason>,
    pub details: String,
}

impl ReportDraft {
    /// Fresh draft for a course: no reason, no details
    pub fn new(course_id: CourseId) -> Self {
        Self {
            course_id,
            reason: None,
            details: String::new(),
        }
    }

    /// A draft is submittable once it targets a course and carries a reason
    pub fn is_valid(&self) -> bool {
        self.course_id != 0 && self.reason.is_some()
    }
}

/// Report as created by the review service.
///
/// Only the fields the UI displays are typed; everything else the service
/// returns is kept in `extra` and passed through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CourseReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<CourseId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Lifecycle of a report submission
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    /// Dispatched, no response yet
    InFlight,
    /// Last attempt failed with a displayable message
    Failed(String),
}

impl SubmissionStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionStatus::InFlight)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Short label for logs and event streams
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::InFlight => "in_flight",
            SubmissionStatus::Failed(_) => "failed",
        }
    }
}
