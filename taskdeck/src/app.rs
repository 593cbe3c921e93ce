//! Application state and event handling.
//!
//! [`App`] holds the last-fetched collection plus ephemeral UI state:
//! search text, status filter, selection, the create-form drafts, the
//! edit modal, and the in-flight flag that disables submission while a
//! mutation round trip is pending. Key handling returns the
//! [`ApiCommand`] to dispatch, if any; [`ApiEvent`]s from the worker are
//! applied back through [`App::apply_event`].

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use uuid::Uuid;

use taskdeck_api::task::{Task, TaskDraft, TaskPatch, TaskStatus};

use crate::filter::{self, StatusFilter, TaskStats};
use crate::net::{ApiCommand, ApiEvent, MutationKind};

/// How long a notice stays on screen before it expires on its own.
const NOTICE_TTL: Duration = Duration::from_secs(5);

/// Which part of the UI owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The task list (default).
    #[default]
    List,
    /// The search box.
    Search,
    /// The new-task form.
    Form,
    /// The edit modal.
    Edit,
}

/// Fields of the create form and edit modal, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    /// Title input.
    #[default]
    Title,
    /// Description input.
    Description,
    /// Status selector.
    Status,
}

impl FormField {
    /// Next field in tab order (wraps).
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::Status,
            Self::Status => Self::Title,
        }
    }

    /// Previous field in tab order (wraps).
    #[must_use]
    pub const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Status,
            Self::Description => Self::Title,
            Self::Status => Self::Description,
        }
    }
}

/// The status value after this one in the form selector cycle.
const fn cycle_status(status: TaskStatus) -> TaskStatus {
    match status {
        TaskStatus::Pending => TaskStatus::InProgress,
        TaskStatus::InProgress => TaskStatus::Completed,
        TaskStatus::Completed => TaskStatus::Pending,
    }
}

/// Draft state for the new-task form.
///
/// Reset to defaults only when a create succeeds; kept populated for
/// correction when it fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateForm {
    /// Title draft.
    pub title: String,
    /// Description draft.
    pub description: String,
    /// Chosen status (defaults to pending).
    pub status: TaskStatus,
    /// Currently focused field.
    pub field: FormField,
}

impl CreateForm {
    /// The unvalidated payload as the user submitted it. Validation
    /// happens on the server, which answers with field-level detail.
    #[must_use]
    pub fn draft(&self) -> TaskDraft {
        TaskDraft {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            status: Some(self.status.as_str().to_string()),
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// State of the edit modal, pre-filled from the target task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    /// The task being edited.
    pub id: Uuid,
    /// Title draft.
    pub title: String,
    /// Description draft.
    pub description: String,
    /// Status draft.
    pub status: TaskStatus,
    /// Currently focused field.
    pub field: FormField,
}

impl EditForm {
    /// Pre-fills the modal from the task's current field values.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            field: FormField::default(),
        }
    }

    /// A patch for exactly the three editable fields.
    #[must_use]
    pub fn patch(&self) -> TaskPatch {
        TaskPatch {
            title: Some(self.title.clone()),
            description: Some(self.description.clone()),
            status: Some(self.status.as_str().to_string()),
        }
    }
}

/// A transient, dismissable notice line.
#[derive(Debug, Clone)]
pub struct Notice {
    /// Text shown in the status bar.
    pub text: String,
    /// Whether to render in the error style.
    pub is_error: bool,
    shown_at: Instant,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Last-fetched collection, newest first (server order).
    pub tasks: Vec<Task>,
    /// Search text applied to title/description.
    pub search: String,
    /// Current status filter.
    pub status_filter: StatusFilter,
    /// Selected index into the visible subset.
    pub selected: usize,
    /// Which part of the UI owns input.
    pub focus: Focus,
    /// New-task form drafts.
    pub form: CreateForm,
    /// Edit modal state, if open.
    pub edit: Option<EditForm>,
    /// A mutation round trip is pending; submission is disabled.
    pub in_flight: bool,
    /// A fetch is pending (startup or manual refresh).
    pub loading: bool,
    /// Transient notice, if any.
    pub notice: Option<Notice>,
    /// chrono format string for list timestamps.
    pub timestamp_format: String,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates an empty application awaiting its first fetch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            search: String::new(),
            status_filter: StatusFilter::All,
            selected: 0,
            focus: Focus::List,
            form: CreateForm::default(),
            edit: None,
            in_flight: false,
            loading: true,
            notice: None,
            timestamp_format: "%b %e %H:%M".to_string(),
            should_quit: false,
        }
    }

    /// Sets the list timestamp format.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: &str) -> Self {
        self.timestamp_format = format.to_string();
        self
    }

    /// The visible subset under the current search and filter.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<&Task> {
        filter::visible(&self.tasks, &self.search, self.status_filter)
    }

    /// The currently selected visible task.
    #[must_use]
    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.selected).copied()
    }

    /// Counts for the stats row, from the unfiltered collection.
    #[must_use]
    pub fn stats(&self) -> TaskStats {
        filter::stats(&self.tasks)
    }

    /// Shows a success notice.
    pub fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error: false,
            shown_at: Instant::now(),
        });
    }

    /// Shows an error notice.
    pub fn set_error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error: true,
            shown_at: Instant::now(),
        });
    }

    /// Expires the notice once its TTL has passed. Called every tick of
    /// the event loop.
    pub fn tick(&mut self) {
        if let Some(notice) = &self.notice
            && notice.shown_at.elapsed() >= NOTICE_TTL
        {
            self.notice = None;
        }
    }

    /// Handles a key press, returning the command to dispatch, if any.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        match self.focus {
            Focus::List => self.handle_list_key(key),
            Focus::Search => {
                self.handle_search_key(key);
                None
            }
            Focus::Form => self.handle_form_key(key),
            Focus::Edit => self.handle_edit_key(key),
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                None
            }
            KeyCode::Char('/') => {
                self.focus = Focus::Search;
                None
            }
            KeyCode::Char('n') => {
                self.focus = Focus::Form;
                None
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.selected_task().cloned() {
                    self.edit = Some(EditForm::from_task(&task));
                    self.focus = Focus::Edit;
                }
                None
            }
            KeyCode::Char(' ') => {
                let target = self.selected_task().map(|t| (t.id, t.status));
                match target {
                    Some((id, from)) if !self.in_flight => {
                        self.in_flight = true;
                        Some(ApiCommand::Toggle { id, from })
                    }
                    _ => None,
                }
            }
            KeyCode::Char('d') => {
                let target = self.selected_task().map(|t| t.id);
                match target {
                    Some(id) if !self.in_flight => {
                        self.in_flight = true;
                        Some(ApiCommand::Delete { id })
                    }
                    _ => None,
                }
            }
            KeyCode::Char('r') => {
                self.loading = true;
                Some(ApiCommand::Refresh)
            }
            KeyCode::Char('f') => {
                self.status_filter = self.status_filter.next();
                self.clamp_selection();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected += 1;
                self.clamp_selection();
                None
            }
            KeyCode::Esc => {
                self.notice = None;
                None
            }
            _ => None,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                self.search.push(c);
                self.clamp_selection();
            }
            KeyCode::Backspace => {
                self.search.pop();
                self.clamp_selection();
            }
            KeyCode::Esc | KeyCode::Enter => {
                self.focus = Focus::List;
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        match key.code {
            KeyCode::Esc => {
                // Drafts are kept; only a successful create resets them.
                self.focus = Focus::List;
                None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.form.field = self.form.field.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.field = self.form.field.prev();
                None
            }
            KeyCode::Enter => {
                if self.in_flight {
                    return None;
                }
                self.in_flight = true;
                Some(ApiCommand::Create {
                    draft: self.form.draft(),
                })
            }
            KeyCode::Char(c) => {
                match self.form.field {
                    FormField::Title => self.form.title.push(c),
                    FormField::Description => self.form.description.push(c),
                    FormField::Status => {
                        if c == ' ' {
                            self.form.status = cycle_status(self.form.status);
                        }
                    }
                }
                None
            }
            KeyCode::Backspace => {
                match self.form.field {
                    FormField::Title => {
                        self.form.title.pop();
                    }
                    FormField::Description => {
                        self.form.description.pop();
                    }
                    FormField::Status => {}
                }
                None
            }
            KeyCode::Left | KeyCode::Right => {
                if self.form.field == FormField::Status {
                    self.form.status = cycle_status(self.form.status);
                }
                None
            }
            _ => None,
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) -> Option<ApiCommand> {
        let Some(edit) = self.edit.as_mut() else {
            self.focus = Focus::List;
            return None;
        };
        match key.code {
            KeyCode::Esc => {
                // Discard without saving.
                self.edit = None;
                self.focus = Focus::List;
                None
            }
            KeyCode::Tab | KeyCode::Down => {
                edit.field = edit.field.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                edit.field = edit.field.prev();
                None
            }
            KeyCode::Enter => {
                if self.in_flight {
                    return None;
                }
                self.in_flight = true;
                Some(ApiCommand::Update {
                    id: edit.id,
                    patch: edit.patch(),
                })
            }
            KeyCode::Char(c) => {
                match edit.field {
                    FormField::Title => edit.title.push(c),
                    FormField::Description => edit.description.push(c),
                    FormField::Status => {
                        if c == ' ' {
                            edit.status = cycle_status(edit.status);
                        }
                    }
                }
                None
            }
            KeyCode::Backspace => {
                match edit.field {
                    FormField::Title => {
                        edit.title.pop();
                    }
                    FormField::Description => {
                        edit.description.pop();
                    }
                    FormField::Status => {}
                }
                None
            }
            KeyCode::Left | KeyCode::Right => {
                if edit.field == FormField::Status {
                    edit.status = cycle_status(edit.status);
                }
                None
            }
            _ => None,
        }
    }

    /// Applies an event from the API worker.
    pub fn apply_event(&mut self, event: ApiEvent) {
        match event {
            ApiEvent::TasksLoaded(tasks) => {
                self.tasks = tasks;
                self.loading = false;
                self.clamp_selection();
            }
            ApiEvent::MutationDone(kind) => {
                self.in_flight = false;
                match kind {
                    MutationKind::Create => {
                        self.form.reset();
                        self.set_notice("Task created");
                    }
                    MutationKind::Update => {
                        self.edit = None;
                        self.focus = Focus::List;
                        self.set_notice("Task updated");
                    }
                    MutationKind::Toggle => {}
                    MutationKind::Delete => {
                        self.set_notice("Task deleted");
                    }
                }
            }
            ApiEvent::RequestFailed { message } => {
                // Prior data stays on screen; form drafts and the modal
                // are kept for correction.
                self.in_flight = false;
                self.loading = false;
                self.set_error(message);
            }
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_tasks().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}
