//! Search box and status filter display.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::theme;
use crate::app::{App, Focus};

/// Render the search input and the current status filter.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_searching = app.focus == Focus::Search;

    let mut spans = vec![Span::styled("Search: ", theme::dimmed())];
    if app.search.is_empty() && !is_searching {
        spans.push(Span::styled("(press / to search)", theme::dimmed()));
    } else {
        spans.push(Span::styled(app.search.clone(), theme::normal()));
    }
    if is_searching {
        spans.push(Span::styled("\u{2588}", theme::highlighted()));
    }
    spans.push(Span::raw("   "));
    spans.push(Span::styled("Filter: ", theme::dimmed()));
    spans.push(Span::styled(app.status_filter.label(), theme::bold()));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if is_searching {
            theme::highlighted()
        } else {
            theme::normal()
        });

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
