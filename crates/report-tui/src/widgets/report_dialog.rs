//! "Report this course" modal

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use report_app::i18n::{keys, Translate};
use report_app::report_dialog::{ReportDialogState, ReportField};

use super::modal_overlay;
use super::{spinner_frame, tail_to_width, truncate_to_width};
use crate::theme::styles;

const MODAL_WIDTH: u16 = 64;
const MODAL_HEIGHT: u16 = 18;

pub struct ReportDialog<'a> {
    state: &'a ReportDialogState,
    translator: &'a dyn Translate,
    tick: u64,
}

impl<'a> ReportDialog<'a> {
    pub fn new(state: &'a ReportDialogState, translator: &'a dyn Translate) -> Self {
        Self {
            state,
            translator,
            tick: 0,
        }
    }

    /// Spinner frame for the in-flight Post button
    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }

    /// Where the dialog lands inside `area`
    pub fn modal_rect(area: Rect) -> Rect {
        modal_overlay::centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area)
    }
}

impl Widget for ReportDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = Self::modal_rect(area);
        modal_overlay::prepare_modal(buf, modal);

        let title = format!(" {} ", self.translator.t(keys::REPORT_HEADING));
        let block = styles::modal_block(&title);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let option_rows = self.state.options.len() as u16;
        let chunks = Layout::vertical([
            Constraint::Length(1),           // course name
            Constraint::Length(1),           // reason label
            Constraint::Length(option_rows), // reasons
            Constraint::Length(1),           // details label
            Constraint::Length(3),           // details box
            Constraint::Length(1),           // terms
            Constraint::Length(1),           // error
            Constraint::Min(0),
            Constraint::Length(1), // buttons
        ])
        .split(inner.inner(ratatui::layout::Margin::new(1, 0)));

        self.render_course(chunks[0], buf);
        Paragraph::new(Line::from(Span::styled(
            self.translator.t(keys::REPORT_REASON_LABEL),
            styles::text_secondary(),
        )))
        .render(chunks[1], buf);
        self.render_reasons(chunks[2], buf);
        Paragraph::new(Line::from(Span::styled(
            self.translator.t(keys::REPORT_DETAILS_LABEL),
            styles::text_secondary(),
        )))
        .render(chunks[3], buf);
        self.render_details(chunks[4], buf);
        self.render_terms(chunks[5], buf);
        self.render_error(chunks[6], buf);
        self.render_buttons(chunks[8], buf);
    }
}

impl ReportDialog<'_> {
    fn focused(&self, field: ReportField) -> bool {
        self.state.focus == field
    }

    fn render_course(&self, area: Rect, buf: &mut Buffer) {
        let name = truncate_to_width(&self.state.course_name, area.width as usize);
        Paragraph::new(Line::from(Span::styled(name, styles::accent_bold()))).render(area, buf);
    }

    fn render_reasons(&self, area: Rect, buf: &mut Buffer) {
        let list_focused = self.focused(ReportField::Reasons);
        let lines: Vec<Line> = self
            .state
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let selected = self.state.is_selected(option.value);
                let marker = if selected { "(•)" } else { "( )" };
                let style = if list_focused && i == self.state.highlighted {
                    styles::focused_selected()
                } else if selected {
                    styles::accent()
                } else {
                    styles::text_primary()
                };
                Line::from(vec![
                    Span::styled(format!(" {} ", marker), style),
                    Span::styled(format!("{} ", option.label), style),
                ])
            })
            .collect();
        Paragraph::new(lines).render(area, buf);
    }

    fn render_details(&self, area: Rect, buf: &mut Buffer) {
        let focused = self.focused(ReportField::Details);
        let block = styles::glass_block(focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let details = &self.state.draft.details;
        let line = if details.is_empty() && !focused {
            Line::from(Span::styled(
                self.translator.t(keys::REPORT_DETAILS_PLACEHOLDER),
                styles::text_muted(),
            ))
        } else {
            // Only the last line fits; newlines show as a return mark
            let flat = details.replace('\n', "⏎");
            let room = (inner.width as usize).saturating_sub(1);
            let mut spans = vec![Span::styled(
                tail_to_width(&flat, room),
                styles::text_primary(),
            )];
            if focused {
                spans.push(Span::styled("_", styles::keybinding()));
            }
            Line::from(spans)
        };
        Paragraph::new(line).render(inner, buf);
    }

    fn render_terms(&self, area: Rect, buf: &mut Buffer) {
        let marker = if self.state.terms_accepted {
            "[x]"
        } else {
            "[ ]"
        };
        let style = if self.focused(ReportField::Terms) {
            styles::focused_selected()
        } else {
            styles::text_primary()
        };
        let label = truncate_to_width(
            &self.translator.t(keys::DIALOG_TERMS),
            (area.width as usize).saturating_sub(5),
        );
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", marker), style),
            Span::styled(label, style),
        ]))
        .render(area, buf);
    }

    fn render_error(&self, area: Rect, buf: &mut Buffer) {
        if let Some(message) = self.state.error_message() {
            let text = truncate_to_width(message, area.width as usize);
            Paragraph::new(Line::from(Span::styled(text, styles::status_red())))
                .render(area, buf);
        }
    }

    fn render_buttons(&self, area: Rect, buf: &mut Buffer) {
        let post_label = if self.state.is_in_flight() {
            format!(
                "[ {} {} ]",
                spinner_frame(self.tick),
                self.translator.t(keys::DIALOG_POST)
            )
        } else {
            format!("[ {} ]", self.translator.t(keys::DIALOG_POST))
        };
        let post_style = if !self.state.can_submit() {
            if self.focused(ReportField::Post) {
                styles::disabled().add_modifier(Modifier::UNDERLINED)
            } else {
                styles::disabled()
            }
        } else if self.focused(ReportField::Post) {
            styles::focused_selected()
        } else {
            styles::status_green()
        };

        let cancel_label = format!("[ {} ]", self.translator.t(keys::DIALOG_CANCEL));
        let cancel_style = if self.focused(ReportField::Cancel) {
            styles::focused_selected()
        } else {
            styles::text_secondary()
        };

        Paragraph::new(Line::from(vec![
            Span::styled(post_label, post_style),
            Span::styled("  ", Style::default()),
            Span::styled(cancel_label, cancel_style),
        ]))
        .alignment(ratatui::layout::Alignment::Right)
        .render(area, buf);
    }
}
