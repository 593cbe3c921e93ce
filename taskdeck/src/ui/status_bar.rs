//! Status bar rendering.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme;
use crate::app::{App, Focus};

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let help_text = match app.focus {
        Focus::List => {
            "\u{2191}\u{2193}: navigate | Space: toggle | n: new | e: edit | d: delete | /: search | f: filter | r: refresh | q: quit"
        }
        Focus::Search => "type to search | Enter/Esc: done",
        Focus::Form | Focus::Edit => "Tab: next field | Enter: save | Esc: close",
    };

    let state_span = app.notice.as_ref().map_or_else(
        || {
            if app.loading {
                Span::styled("Loading\u{2026}", theme::dimmed())
            } else if app.in_flight {
                Span::styled("Saving\u{2026}", theme::dimmed())
            } else {
                Span::styled("Ready", theme::normal().fg(theme::SUCCESS))
            }
        },
        |notice| {
            if notice.is_error {
                Span::styled(notice.text.clone(), theme::error())
            } else {
                Span::styled(notice.text.clone(), theme::normal().fg(theme::SUCCESS))
            }
        },
    );

    let status_line = Line::from(vec![
        Span::styled("taskdeck v0.1.0", theme::bold()),
        Span::raw(" | "),
        state_span,
        Span::raw(" | "),
        Span::styled(help_text, theme::dimmed()),
    ]);

    frame.render_widget(
        Paragraph::new(status_line).style(theme::status_bar_bg()),
        area,
    );
}
