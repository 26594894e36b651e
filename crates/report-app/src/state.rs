//! Application state (Model in TEA pattern)

use std::sync::Arc;

use report_core::{CourseId, CourseReport};

use crate::auth::AuthAccessor;
use crate::i18n::Catalog;
use crate::login_dialog::LoginDialogState;
use crate::report_dialog::{reason_options, ReportDialogState};

/// Which surface currently receives input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Course card, dialog hidden
    Course,
    ReportDialog,
    /// Login prompt over the report dialog
    LoginPrompt,
}

/// The course the dialog reports on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseProps {
    pub course_id: CourseId,
    pub course_name: String,
    /// Whether the dialog starts visible
    pub open: bool,
}

/// How a finished sign-in attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    SignedIn { username: Option<String> },
    Rejected { message: String },
}

/// Complete application state
pub struct AppState {
    pub course: CourseProps,
    pub report_dialog: ReportDialogState,
    pub login_dialog: LoginDialogState,
    pub catalog: Catalog,
    pub auth: Arc<dyn AuthAccessor>,

    /// Reports delivered through the success callback, oldest first
    pub filed_reports: Vec<CourseReport>,

    /// Finished sign-in attempts, oldest first
    pub login_outcomes: Vec<LoginOutcome>,

    /// One-line status for the course card
    pub notice: Option<String>,

    /// Spinner frame counter
    pub tick: u64,

    quitting: bool,
}

impl AppState {
    pub fn new(course: CourseProps, catalog: Catalog, auth: Arc<dyn AuthAccessor>) -> Self {
        let report_dialog = ReportDialogState::new(
            course.course_id,
            course.course_name.clone(),
            course.open,
            reason_options(&catalog),
        );

        Self {
            course,
            report_dialog,
            login_dialog: LoginDialogState::new(),
            catalog,
            auth,
            filed_reports: Vec::new(),
            login_outcomes: Vec::new(),
            notice: None,
            tick: 0,
            quitting: false,
        }
    }

    pub fn ui_mode(&self) -> UiMode {
        if !self.report_dialog.open {
            UiMode::Course
        } else if self.report_dialog.login_prompt_visible {
            UiMode::LoginPrompt
        } else {
            UiMode::ReportDialog
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.auth.has_session()
    }

    pub fn open_report_dialog(&mut self) {
        self.report_dialog.open = true;
    }

    /// Host side of the close callback
    pub fn close_report_dialog(&mut self) {
        self.report_dialog.open = false;
    }

    /// Host side of the success callback
    pub fn record_report(&mut self, report: CourseReport) {
        self.notice = Some(match report.id {
            Some(id) => format!("Report #{} filed", id),
            None => "Report filed".to_string(),
        });
        self.filed_reports.push(report);
    }

    pub fn last_report(&self) -> Option<&CourseReport> {
        self.filed_reports.last()
    }

    /// Whether anything is waiting on the network
    pub fn is_busy(&self) -> bool {
        self.report_dialog.is_in_flight() || self.login_dialog.in_flight
    }

    pub fn request_quit(&mut self) {
        self.quitting = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quitting
    }
}
