//! Edit-task modal.

use ratatui::{
    Frame,
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::task_form::form_lines;
use super::{centered_rect, theme};
use crate::app::App;

/// Height of the edit modal in terminal rows.
const MODAL_HEIGHT: u16 = 10;

/// Render the edit modal, pre-filled with the target task's fields.
pub fn render(frame: &mut Frame, app: &App) {
    let Some(edit) = &app.edit else {
        return;
    };

    let area = centered_rect(frame.area(), 60, MODAL_HEIGHT);

    let block = Block::default()
        .title(Span::styled("Edit Task", theme::panel_title(theme::WARNING)))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    let lines = form_lines(
        &edit.title,
        &edit.description,
        edit.status,
        edit.field,
        app.in_flight,
    );

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
