//! Terminal UI rendering.

pub mod edit_modal;
pub mod filter_bar;
pub mod stats_bar;
pub mod status_bar;
pub mod task_form;
pub mod task_list;
pub mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
};

use crate::app::{App, Focus};

/// Main draw function for the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Stats
            Constraint::Length(3), // Search + filter
            Constraint::Min(3),    // Task list
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    stats_bar::render(frame, main_chunks[0], app);
    filter_bar::render(frame, main_chunks[1], app);
    task_list::render(frame, main_chunks[2], app);
    status_bar::render(frame, main_chunks[3], app);

    // Modals draw over the list area.
    if app.focus == Focus::Form {
        task_form::render(frame, app);
    }
    if app.edit.is_some() {
        edit_modal::render(frame, app);
    }
}

/// A centered rectangle of the given percentage width and fixed height,
/// clamped to the frame.
#[must_use]
pub fn centered_rect(area: Rect, width_percent: u16, height: u16) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
