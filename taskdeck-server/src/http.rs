//! HTTP surface of the task store: router, handlers, and error mapping.
//!
//! Five routes over the Task entity. Every error is translated at the
//! handler boundary into the wire error body — validation failures carry
//! per-field detail, absent ids are a plain 404, and store failures are
//! logged server-side and reported as a generic 500 with nothing leaked.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use taskdeck_api::error::{ErrorBody, FieldError};
use taskdeck_api::task::{Task, TaskDraft, TaskPatch};

use crate::store::{StoreError, TaskStore};

/// Shared state handed to every handler.
pub struct AppState {
    /// The process-wide task store.
    pub store: TaskStore,
}

/// Errors surfaced to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The payload failed boundary validation.
    #[error("invalid task data")]
    Validation(Vec<FieldError>),

    /// The request body was not parseable as JSON.
    #[error("malformed request body")]
    BadBody(String),

    /// The addressed task does not exist — a normal outcome, not a fault.
    #[error("task not found")]
    NotFound,

    /// The store failed; details are logged, not returned.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody::validation("Invalid task data", errors)),
            )
                .into_response(),
            Self::BadBody(detail) => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody::message(detail))).into_response()
            }
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody::message("Task not found")),
            )
                .into_response(),
            Self::Store(err) => {
                tracing::error!(error = %err, "store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::message("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}

/// An id that is not a UUID can never match a row; report not-found,
/// matching the plain absent-row outcome.
fn parse_task_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}

/// GET /api/tasks — all tasks, newest first.
async fn list_tasks(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.store.list().await?;
    Ok(Json(tasks))
}

/// GET /api/tasks/{id} — a single task or 404.
async fn get_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&id)?;
    match state.store.get(id).await? {
        Some(task) => Ok(Json(task)),
        None => Err(ApiError::NotFound),
    }
}

/// POST /api/tasks — validate, persist, return 201 with the full record.
async fn create_task(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TaskDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let Json(draft) = body.map_err(|e| ApiError::BadBody(e.body_text()))?;
    let new = draft.validate().map_err(ApiError::Validation)?;
    let task = state.store.create(&new).await?;
    tracing::info!(id = %task.id, status = %task.status, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/{id} — apply a partial update, return the new record.
async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<TaskPatch>, JsonRejection>,
) -> Result<Json<Task>, ApiError> {
    let id = parse_task_id(&id)?;
    let Json(patch) = body.map_err(|e| ApiError::BadBody(e.body_text()))?;
    let changes = patch.validate().map_err(ApiError::Validation)?;
    match state.store.update(id, &changes).await? {
        Some(task) => {
            tracing::info!(id = %task.id, status = %task.status, "task updated");
            Ok(Json(task))
        }
        None => Err(ApiError::NotFound),
    }
}

/// DELETE /api/tasks/{id} — hard delete, 204 on success.
async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_task_id(&id)?;
    if state.store.delete(id).await? {
        tracing::info!(id = %id, "task deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// Builds the API router over the given state.
#[must_use]
pub fn router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route(
            "/api/tasks",
            axum::routing::get(list_tasks).post(create_task),
        )
        .route(
            "/api/tasks/{id}",
            axum::routing::get(get_task)
                .put(update_task)
                .delete(delete_task),
        )
        .with_state(state)
}

/// Starts the server on the given address and returns the bound address
/// and a join handle.
///
/// This is the primary entry point used by both `main.rs` and test code.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
    store: TaskStore,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(Arc::new(AppState { store }));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "server error");
        }
    });

    Ok((bound_addr, handle))
}

/// Starts the server in-process for testing, backed by an in-memory
/// store and bound to an OS-assigned port.
#[cfg(test)]
async fn start_test_server() -> (std::net::SocketAddr, tokio::task::JoinHandle<()>) {
    let store = TaskStore::connect_in_memory()
        .await
        .expect("failed to create in-memory store");
    start_server("127.0.0.1:0", store)
        .await
        .expect("failed to start test server")
}
