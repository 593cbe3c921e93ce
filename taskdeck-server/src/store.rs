//! SQLite-backed task store.
//!
//! [`TaskStore`] owns the process-wide connection pool and performs the
//! five CRUD operations against the single `tasks` table. Rows travel as
//! [`TaskRow`] (all TEXT columns) and are converted to the wire [`Task`]
//! at the boundary; a row that fails conversion is a corrupt-store error,
//! not a caller mistake.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use uuid::Uuid;

use taskdeck_api::task::{NewTask, Task, TaskChanges, TaskStatus};

/// Schema for the sole table. `created_at` holds fixed-width RFC 3339 UTC
/// with nanosecond precision, so lexicographic order equals chronological
/// order and `ORDER BY created_at DESC` is exact.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    status TEXT NOT NULL,
    created_at TEXT NOT NULL
)";

/// Errors from the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database rejected the operation or is unreachable.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A persisted row no longer matches the contract types.
    #[error("corrupt row for task {id}: {reason}")]
    CorruptRow {
        /// The `id` column of the offending row.
        id: String,
        /// What failed to parse.
        reason: String,
    },
}

/// A `tasks` row as persisted.
#[derive(Debug, sqlx::FromRow)]
struct TaskRow {
    id: String,
    title: String,
    description: String,
    status: String,
    created_at: String,
}

impl TryFrom<TaskRow> for Task {
    type Error = StoreError;

    fn try_from(row: TaskRow) -> Result<Self, StoreError> {
        let corrupt = |reason: String| StoreError::CorruptRow {
            id: row.id.clone(),
            reason,
        };
        let id = Uuid::parse_str(&row.id).map_err(|e| corrupt(format!("bad id: {e}")))?;
        let status = TaskStatus::from_str(&row.status).map_err(|e| corrupt(e.to_string()))?;
        let created_at = DateTime::parse_from_rfc3339(&row.created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| corrupt(format!("bad created_at: {e}")))?;
        Ok(Self {
            id,
            title: row.title,
            description: row.description,
            status,
            created_at,
        })
    }
}

/// Encode a timestamp as fixed-width RFC 3339 UTC (nanosecond precision).
fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Task store over a shared SQLite connection pool.
#[derive(Clone)]
pub struct TaskStore {
    pool: SqlitePool,
}

impl TaskStore {
    /// Connects to the database at `url` (e.g. `sqlite:taskdeck.db`),
    /// creating the file and the schema if missing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the URL is invalid or the
    /// database cannot be opened.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = url
            .parse::<SqliteConnectOptions>()?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;
        Self::with_pool(pool).await
    }

    /// Connects to a fresh in-memory database.
    ///
    /// The pool is capped at one connection: each SQLite `:memory:`
    /// connection is its own database, so a second connection would see
    /// an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the connection fails.
    pub async fn connect_in_memory() -> Result<Self, StoreError> {
        let options = "sqlite::memory:".parse::<SqliteConnectOptions>()?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns all tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on query failure or a corrupt row.
    pub async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let rows: Vec<TaskRow> = sqlx::query_as(
            "SELECT id, title, description, status, created_at FROM tasks \
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Task::try_from).collect()
    }

    /// Returns the task with the given id, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on query failure or a corrupt row.
    pub async fn get(&self, id: Uuid) -> Result<Option<Task>, StoreError> {
        let row: Option<TaskRow> = sqlx::query_as(
            "SELECT id, title, description, status, created_at FROM tasks WHERE id = ?1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        row.map(Task::try_from).transpose()
    }

    /// Persists a validated new task, assigning its id and creation time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on insert failure.
    pub async fn create(&self, new: &NewTask) -> Result<Task, StoreError> {
        let task = Task {
            id: Uuid::new_v4(),
            title: new.title.clone(),
            description: new.description.clone(),
            status: new.status,
            created_at: Utc::now(),
        };
        sqlx::query(
            "INSERT INTO tasks (id, title, description, status, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(task.id.to_string())
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status.as_str())
        .bind(encode_timestamp(task.created_at))
        .execute(&self.pool)
        .await?;
        Ok(task)
    }

    /// Applies the provided field changes and returns the updated task,
    /// or `None` if no task matched. Unprovided fields retain their
    /// stored values; `id` and `created_at` are never touched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on query failure or a corrupt row.
    pub async fn update(&self, id: Uuid, changes: &TaskChanges) -> Result<Option<Task>, StoreError> {
        let result = sqlx::query(
            "UPDATE tasks SET \
             title = COALESCE(?1, title), \
             description = COALESCE(?2, description), \
             status = COALESCE(?3, status) \
             WHERE id = ?4",
        )
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.status.map(TaskStatus::as_str))
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    /// Removes the task with the given id. Returns `false` when no row
    /// matched, so a repeat delete is indistinguishable from deleting a
    /// nonexistent id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] on query failure.
    pub async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
