//! Task list rendering.

use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use taskdeck_api::task::{Task, TaskStatus};

use super::theme;
use crate::app::{App, Focus};

/// Checkbox glyph for a status.
const fn checkbox(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "[ ]",
        TaskStatus::InProgress => "[~]",
        TaskStatus::Completed => "[\u{2713}]",
    }
}

/// Render the visible subset of the collection.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.focus == Focus::List;
    let visible = app.visible_tasks();

    let items: Vec<ListItem> = if app.loading && app.tasks.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "Loading tasks\u{2026}",
            theme::dimmed(),
        )))]
    } else if visible.is_empty() {
        vec![ListItem::new(Line::from(Span::styled(
            "No tasks match \u{2014} press n to create one",
            theme::dimmed(),
        )))]
    } else {
        visible
            .iter()
            .enumerate()
            .map(|(idx, task)| {
                let style = if is_focused && idx == app.selected {
                    theme::selected()
                } else {
                    theme::normal()
                };
                ListItem::new(row(task, &app.timestamp_format)).style(style)
            })
            .collect()
    };

    let title = format!("Tasks ({}/{})", visible.len(), app.tasks.len());
    let block = Block::default()
        .title(Span::styled(title, theme::panel_title(theme::TASKS_TITLE)))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            theme::highlighted()
        } else {
            theme::normal()
        });

    frame.render_widget(List::new(items).block(block), area);
}

/// One list row: checkbox, title, status tag, creation time.
fn row<'a>(task: &'a Task, timestamp_format: &str) -> Line<'a> {
    let title_style = if task.status == TaskStatus::Completed {
        theme::dimmed().add_modifier(Modifier::CROSSED_OUT)
    } else {
        theme::normal()
    };

    Line::from(vec![
        Span::styled(
            checkbox(task.status),
            theme::normal().fg(theme::status_color(task.status)),
        ),
        Span::raw(" "),
        Span::styled(task.title.as_str(), title_style),
        Span::raw("  "),
        Span::styled(
            task.status.as_str(),
            theme::dimmed().fg(theme::status_color(task.status)),
        ),
        Span::raw("  "),
        Span::styled(
            task.created_at
                .with_timezone(&chrono::Local)
                .format(timestamp_format)
                .to_string(),
            theme::dimmed(),
        ),
    ])
}
