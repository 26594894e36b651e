//! Login prompt shown over the report dialog

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use report_app::i18n::{keys, Translate};
use report_app::login_dialog::{LoginDialogState, LoginField};

use super::{modal_overlay, spinner_frame, tail_to_width};
use crate::theme::styles;

const MODAL_WIDTH: u16 = 50;
const MODAL_HEIGHT: u16 = 14;

pub struct LoginDialog<'a> {
    state: &'a LoginDialogState,
    translator: &'a dyn Translate,
    tick: u64,
}

impl<'a> LoginDialog<'a> {
    pub fn new(state: &'a LoginDialogState, translator: &'a dyn Translate) -> Self {
        Self {
            state,
            translator,
            tick: 0,
        }
    }

    pub fn tick(mut self, tick: u64) -> Self {
        self.tick = tick;
        self
    }
}

impl Widget for LoginDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = modal_overlay::centered_rect(MODAL_WIDTH, MODAL_HEIGHT, area);
        modal_overlay::prepare_modal(buf, modal);

        let title = format!(" {} ", self.translator.t(keys::LOGIN_HEADING));
        let block = styles::modal_block(&title);
        let inner = block.inner(modal).inner(Margin::new(1, 0));
        block.render(modal, buf);

        let chunks = Layout::vertical([
            Constraint::Length(2), // message
            Constraint::Length(3), // identifier
            Constraint::Length(3), // password
            Constraint::Length(1), // error
            Constraint::Min(0),
            Constraint::Length(1), // buttons
        ])
        .split(inner);

        Paragraph::new(Span::styled(
            self.translator.t(keys::LOGIN_MESSAGE),
            styles::text_secondary(),
        ))
        .wrap(Wrap { trim: true })
        .render(chunks[0], buf);

        self.render_field(
            chunks[1],
            buf,
            keys::LOGIN_IDENTIFIER,
            &self.state.identifier,
            LoginField::Identifier,
        );
        let masked = "*".repeat(self.state.password.chars().count());
        self.render_field(
            chunks[2],
            buf,
            keys::LOGIN_PASSWORD,
            &masked,
            LoginField::Password,
        );

        if let Some(error) = &self.state.error {
            Paragraph::new(Span::styled(error.as_str(), styles::status_red()))
                .render(chunks[3], buf);
        }

        self.render_buttons(chunks[5], buf);
    }
}

impl LoginDialog<'_> {
    fn render_field(
        &self,
        area: Rect,
        buf: &mut Buffer,
        label_key: &str,
        value: &str,
        field: LoginField,
    ) {
        let focused = self.state.focus == field;
        let title = format!(" {} ", self.translator.t(label_key));
        let block = styles::glass_block(focused).title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let room = (inner.width as usize).saturating_sub(1);
        let mut spans = vec![Span::styled(
            tail_to_width(value, room),
            styles::text_primary(),
        )];
        if focused {
            spans.push(Span::styled("_", styles::keybinding()));
        }
        Paragraph::new(Line::from(spans)).render(inner, buf);
    }

    fn render_buttons(&self, area: Rect, buf: &mut Buffer) {
        let submit = self.translator.t(keys::LOGIN_SUBMIT);
        let submit_label = if self.state.in_flight {
            format!("[ {} {} ]", spinner_frame(self.tick), submit)
        } else {
            format!("[ {} ]", submit)
        };
        let focused = self.state.focus == LoginField::Submit;
        let submit_style = match (focused, self.state.can_submit()) {
            (true, true) => styles::focused_selected(),
            (false, true) => styles::status_green(),
            (_, false) => styles::disabled(),
        };
        let cancel_style = if self.state.focus == LoginField::Cancel {
            styles::focused_selected()
        } else {
            styles::text_secondary()
        };

        Paragraph::new(Line::from(vec![
            Span::styled(submit_label, submit_style),
            Span::raw("  "),
            Span::styled(
                format!("[ {} ]", self.translator.t(keys::LOGIN_CANCEL)),
                cancel_style,
            ),
        ]))
        .alignment(Alignment::Right)
        .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::test_utils::buffer_text;
    use report_app::i18n::Catalog;

    fn render(state: &LoginDialogState) -> String {
        let catalog = Catalog::english();
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        LoginDialog::new(state, &catalog).render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn test_renders_prompt() {
        let text = render(&LoginDialogState::new());
        assert!(text.contains("Sign in"));
        assert!(text.contains("Username or email"));
        assert!(text.contains("Password"));
        assert!(text.contains("[ Cancel ]"));
    }

    #[test]
    fn test_password_is_masked() {
        let mut state = LoginDialogState::new();
        state.identifier = "ada".to_string();
        state.password = "hunter2".to_string();
        let text = render(&state);
        assert!(text.contains("ada"));
        assert!(text.contains("*******"));
        assert!(!text.contains("hunter2"));
    }

    #[test]
    fn test_error_shown() {
        let mut state = LoginDialogState::new();
        state.fail("Invalid identifier or password");
        let text = render(&state);
        assert!(text.contains("Invalid identifier or password"));
    }
}
