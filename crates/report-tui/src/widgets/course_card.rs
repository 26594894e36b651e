//! Course card: the host surface behind the dialog

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use report_app::i18n::keys;
use report_app::{AppState, Translate};

use super::truncate_to_width;
use crate::theme::styles;

pub struct CourseCard<'a> {
    state: &'a AppState,
}

impl<'a> CourseCard<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn session_line(&self) -> Line<'static> {
        let catalog = &self.state.catalog;
        if self.state.is_signed_in() {
            let label = match self.state.auth.username() {
                Some(name) => format!("{} ({})", catalog.t(keys::CARD_SIGNED_IN), name),
                None => catalog.t(keys::CARD_SIGNED_IN),
            };
            Line::from(Span::styled(label, styles::status_green()))
        } else {
            Line::from(Span::styled(
                catalog.t(keys::CARD_SIGNED_OUT),
                styles::text_muted(),
            ))
        }
    }
}

impl Widget for CourseCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let catalog = &self.state.catalog;
        let block = styles::glass_block(!self.state.report_dialog.open)
            .title(format!(" {} ", catalog.t(keys::CARD_COURSE)));
        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width as usize;
        let course = &self.state.course;
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    truncate_to_width(&course.course_name, width.saturating_sub(8)),
                    styles::accent_bold(),
                ),
                Span::styled(format!("  #{}", course.course_id), styles::text_muted()),
            ]),
            self.session_line(),
            Line::default(),
        ];

        if let Some(report) = self.state.last_report() {
            let reason = report.reason.as_deref().unwrap_or("-");
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{}: ", catalog.t(keys::CARD_LAST_REPORT)),
                    styles::text_secondary(),
                ),
                Span::styled(reason.to_string(), styles::text_primary()),
            ]));
        }
        if let Some(notice) = &self.state.notice {
            lines.push(Line::from(Span::styled(
                truncate_to_width(notice, width),
                styles::accent(),
            )));
        } else if !self.state.report_dialog.open {
            lines.push(Line::from(Span::styled(
                catalog.t(keys::CARD_CLOSED),
                styles::text_muted(),
            )));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            catalog.t(keys::CARD_HINT),
            styles::keybinding(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}
