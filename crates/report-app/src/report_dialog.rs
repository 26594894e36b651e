//! Report dialog state
//!
//! Holds everything the "report this course" form owns: the draft, the terms
//! checkbox, whether the login prompt is showing and the submission status.
//! All mutation goes through the handlers in `handler::report`.

use report_core::{CourseId, ReportDraft, ReportReason, SubmissionStatus};

use crate::i18n::Translate;

/// One selectable reason with its translated label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonOption {
    pub label: String,
    pub value: ReportReason,
}

/// Reason options in display order
pub fn reason_options(translator: &dyn Translate) -> Vec<ReasonOption> {
    ReportReason::ALL
        .into_iter()
        .map(|value| ReasonOption {
            label: translator.t(value.label_key()),
            value,
        })
        .collect()
}

/// Focusable controls, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportField {
    #[default]
    Reasons,
    Details,
    Terms,
    Post,
    Cancel,
}

impl ReportField {
    pub fn next(self) -> Self {
        match self {
            ReportField::Reasons => ReportField::Details,
            ReportField::Details => ReportField::Terms,
            ReportField::Terms => ReportField::Post,
            ReportField::Post => ReportField::Cancel,
            ReportField::Cancel => ReportField::Reasons,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ReportField::Reasons => ReportField::Cancel,
            ReportField::Details => ReportField::Reasons,
            ReportField::Terms => ReportField::Details,
            ReportField::Post => ReportField::Terms,
            ReportField::Cancel => ReportField::Post,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReportDialogState {
    pub course_id: CourseId,
    /// Display only
    pub course_name: String,
    /// Visibility, owned by the host
    pub open: bool,

    pub draft: ReportDraft,
    pub terms_accepted: bool,
    pub login_prompt_visible: bool,
    pub status: SubmissionStatus,

    pub focus: ReportField,
    /// Cursor in the reason list, independent of the selected reason
    pub highlighted: usize,
    pub options: Vec<ReasonOption>,
}

impl ReportDialogState {
    pub fn new(
        course_id: CourseId,
        course_name: impl Into<String>,
        open: bool,
        options: Vec<ReasonOption>,
    ) -> Self {
        Self {
            course_id,
            course_name: course_name.into(),
            open,
            draft: ReportDraft::new(course_id),
            terms_accepted: false,
            login_prompt_visible: false,
            status: SubmissionStatus::Idle,
            focus: ReportField::default(),
            highlighted: 0,
            options,
        }
    }

    pub fn select_reason(&mut self, reason: ReportReason) {
        self.draft.reason = Some(reason);
        if let Some(index) = self.option_index(reason) {
            self.highlighted = index;
        }
    }

    pub fn set_details(&mut self, text: impl Into<String>) {
        self.draft.details = text.into();
    }

    pub fn toggle_terms(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
    }

    /// A reason is chosen and the draft targets a course
    pub fn validate(&self) -> bool {
        self.draft.is_valid()
    }

    /// Whether the Post control is enabled
    pub fn can_submit(&self) -> bool {
        self.validate() && self.terms_accepted && !self.status.is_in_flight()
    }

    pub fn is_in_flight(&self) -> bool {
        self.status.is_in_flight()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.status.error_message()
    }

    pub fn reset_draft(&mut self) {
        self.draft = ReportDraft::new(self.course_id);
        self.highlighted = 0;
    }

    /// Mark a submission as dispatched and hand back the payload
    pub fn begin_submission(&mut self) -> ReportDraft {
        self.status = SubmissionStatus::InFlight;
        self.draft.clone()
    }

    pub fn complete_submission(&mut self) {
        self.status = SubmissionStatus::Idle;
        self.reset_draft();
    }

    pub fn fail_submission(&mut self, message: impl Into<String>) {
        self.status = SubmissionStatus::Failed(message.into());
    }

    pub fn show_login_prompt(&mut self) {
        self.login_prompt_visible = true;
    }

    pub fn hide_login_prompt(&mut self) {
        self.login_prompt_visible = false;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn highlight_up(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.highlighted = self
            .highlighted
            .checked_sub(1)
            .unwrap_or(self.options.len() - 1);
    }

    pub fn highlight_down(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.highlighted = (self.highlighted + 1) % self.options.len();
    }

    pub fn highlighted_reason(&self) -> Option<ReportReason> {
        self.options.get(self.highlighted).map(|option| option.value)
    }

    pub fn is_selected(&self, reason: ReportReason) -> bool {
        self.draft.reason == Some(reason)
    }

    fn option_index(&self, reason: ReportReason) -> Option<usize> {
        self.options.iter().position(|option| option.value == reason)
    }
}
