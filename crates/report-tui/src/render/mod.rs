//! Frame rendering (View in TEA pattern)

use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    widgets::{Block, Widget},
    Frame,
};

use report_app::{AppState, UiMode};

use crate::theme::palette;
use crate::widgets::{modal_overlay, CourseCard, LoginDialog, ReportDialog};

/// Render the whole UI for the current state
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    Block::default()
        .style(Style::default().bg(palette::DEEPEST_BG))
        .render(area, frame.buffer_mut());

    let [card_area] = Layout::vertical([Constraint::Length(10)])
        .margin(1)
        .areas(area);
    frame.render_widget(CourseCard::new(state), card_area);

    let mode = state.ui_mode();
    if mode == UiMode::Course {
        return;
    }

    modal_overlay::dim_background(frame.buffer_mut(), area);
    frame.render_widget(
        ReportDialog::new(&state.report_dialog, &state.catalog).tick(state.tick),
        area,
    );

    if mode == UiMode::LoginPrompt {
        frame.render_widget(
            LoginDialog::new(&state.login_dialog, &state.catalog).tick(state.tick),
            area,
        );
    }
}
