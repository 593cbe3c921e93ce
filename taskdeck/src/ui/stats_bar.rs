//! Stats row: total / completed / pending counts.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::App;

/// Render the counts derived from the unfiltered collection.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let stats = app.stats();

    let line = Line::from(vec![
        Span::styled("Total: ", theme::dimmed()),
        Span::styled(stats.total.to_string(), theme::bold()),
        Span::raw("   "),
        Span::styled("Completed: ", theme::dimmed()),
        Span::styled(
            stats.completed.to_string(),
            theme::normal().fg(theme::SUCCESS),
        ),
        Span::raw("   "),
        Span::styled("Pending: ", theme::dimmed()),
        Span::styled(
            stats.pending.to_string(),
            theme::normal().fg(theme::WARNING),
        ),
    ]);

    let block = Block::default()
        .title(Span::styled("Taskdeck", theme::panel_title(theme::STATS_TITLE)))
        .borders(Borders::ALL)
        .border_style(theme::normal());

    frame.render_widget(Paragraph::new(line).block(block), area);
}
