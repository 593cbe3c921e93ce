//! New-task form modal.

use ratatui::{
    Frame,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use taskdeck_api::task::TaskStatus;

use super::{centered_rect, theme};
use crate::app::{App, FormField};

/// Height of the form modal in terminal rows.
const MODAL_HEIGHT: u16 = 10;

/// Render the new-task form as a centered modal over the list.
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(frame.area(), 60, MODAL_HEIGHT);

    let block = Block::default()
        .title(Span::styled("New Task", theme::panel_title(theme::HIGHLIGHT)))
        .borders(Borders::ALL)
        .border_style(theme::highlighted());

    let lines = form_lines(
        &app.form.title,
        &app.form.description,
        app.form.status,
        app.form.field,
        app.in_flight,
    );

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// The field rows shared by the create form and the edit modal.
pub(super) fn form_lines<'a>(
    title: &'a str,
    description: &'a str,
    status: TaskStatus,
    active: FormField,
    in_flight: bool,
) -> Vec<Line<'a>> {
    let mut lines = vec![
        text_field("Title", title, active == FormField::Title),
        Line::raw(""),
        text_field("Description", description, active == FormField::Description),
        Line::raw(""),
        status_field(status, active == FormField::Status),
        Line::raw(""),
    ];
    lines.push(if in_flight {
        Line::from(Span::styled("Saving\u{2026}", theme::dimmed()))
    } else {
        Line::from(Span::styled(
            "Tab: next field \u{00b7} Enter: save \u{00b7} Esc: close",
            theme::dimmed(),
        ))
    });
    lines
}

fn text_field<'a>(label: &'static str, value: &'a str, active: bool) -> Line<'a> {
    let label_style = if active {
        theme::highlighted()
    } else {
        theme::dimmed()
    };
    let mut spans = vec![
        Span::styled(format!("{label}: "), label_style),
        Span::styled(value, theme::normal()),
    ];
    if active {
        spans.push(Span::styled("\u{2588}", theme::highlighted()));
    }
    Line::from(spans)
}

fn status_field(status: TaskStatus, active: bool) -> Line<'static> {
    let label_style = if active {
        theme::highlighted()
    } else {
        theme::dimmed()
    };
    let mut spans = vec![Span::styled("Status: ", label_style)];
    for (idx, candidate) in TaskStatus::ALL.into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if candidate == status {
            theme::bold().fg(theme::status_color(candidate))
        } else {
            theme::dimmed()
        };
        spans.push(Span::styled(candidate.as_str(), style));
    }
    if active {
        spans.push(Span::styled("  (space to change)", theme::dimmed()));
    }
    Line::from(spans)
}
