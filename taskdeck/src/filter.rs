//! Pure view logic: search/status filtering and collection stats.
//!
//! The visible subset is recomputed on every frame from the full
//! collection and two primitive values (search text, status filter);
//! nothing here holds state.

use taskdeck_api::task::{Task, TaskStatus};

/// Status filter with the distinguished "all" sentinel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// No status filtering.
    #[default]
    All,
    /// Only tasks with exactly this status.
    Only(TaskStatus),
}

impl StatusFilter {
    /// Whether a task with the given status passes this filter.
    #[must_use]
    pub fn matches(self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => status == wanted,
        }
    }

    /// The next filter in the cycle: all → pending → in-progress →
    /// completed → all.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Only(TaskStatus::Pending),
            Self::Only(TaskStatus::Pending) => Self::Only(TaskStatus::InProgress),
            Self::Only(TaskStatus::InProgress) => Self::Only(TaskStatus::Completed),
            Self::Only(TaskStatus::Completed) => Self::All,
        }
    }

    /// Display label for the filter bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(TaskStatus::Pending) => "Pending",
            Self::Only(TaskStatus::InProgress) => "In Progress",
            Self::Only(TaskStatus::Completed) => "Completed",
        }
    }
}

/// Case-insensitive substring match against title OR description.
/// An empty search matches everything.
fn matches_search(task: &Task, needle_lower: &str) -> bool {
    needle_lower.is_empty()
        || task.title.to_lowercase().contains(needle_lower)
        || task.description.to_lowercase().contains(needle_lower)
}

/// The visible subset of `tasks` for the given search text and filter,
/// preserving collection order.
#[must_use]
pub fn visible<'a>(tasks: &'a [Task], search: &str, filter: StatusFilter) -> Vec<&'a Task> {
    let needle = search.to_lowercase();
    tasks
        .iter()
        .filter(|task| filter.matches(task.status) && matches_search(task, &needle))
        .collect()
}

/// Collection counts shown in the stats row, computed from the
/// unfiltered collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    /// All tasks.
    pub total: usize,
    /// Tasks with status `completed`.
    pub completed: usize,
    /// Tasks with status `pending`.
    pub pending: usize,
}

/// Counts for the stats row.
#[must_use]
pub fn stats(tasks: &[Task]) -> TaskStats {
    TaskStats {
        total: tasks.len(),
        completed: tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count(),
        pending: tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Pending)
            .count(),
    }
}
