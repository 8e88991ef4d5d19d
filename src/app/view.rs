use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::state::AppState;
use crate::ui::widgets;
use crate::util::config::ViewConfig;

pub fn render(f: &mut Frame, state: &AppState, config: &ViewConfig) {
    // Main layout: page + status bar
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(f.area());

    widgets::render_detail(
        f,
        vertical[0],
        &state.props(),
        state.comment_scroll,
        config.image_panel_percent(),
    );
    widgets::render_status_bar(f, vertical[1], state);

    // Overlays
    widgets::render_comment_form(f, f.area(), &state.comment_form);
    if state.error_popup.is_some() {
        widgets::render_error_modal(f, f.area(), state);
    }
}
