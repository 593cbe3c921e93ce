//! Bridges the TUI event loop to the async HTTP layer.
//!
//! The poll-based TUI cannot await HTTP round trips, so a background
//! tokio task owns the [`ApiClient`] and communicates with the main
//! thread via [`ApiCommand`] / [`ApiEvent`] channels:
//!
//! ```text
//! TUI (main thread)  ←── ApiEvent ───  tokio background task
//!                     ─── ApiCommand →
//! ```
//!
//! Commands are processed strictly in order, one at a time. Every
//! successful mutation is followed by a fresh fetch of the whole
//! collection — the client never patches its local copy.

use tokio::sync::mpsc;
use uuid::Uuid;

use taskdeck_api::task::{Task, TaskDraft, TaskPatch, TaskStatus};

use crate::api::ApiClient;

/// Default channel capacity for commands and events.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Commands sent from the TUI main loop to the API worker.
#[derive(Debug)]
pub enum ApiCommand {
    /// Re-fetch the whole task collection.
    Refresh,
    /// Create a task from the (unvalidated) form draft.
    Create {
        /// The form contents as submitted.
        draft: TaskDraft,
    },
    /// Apply a partial update to a task.
    Update {
        /// Target task.
        id: Uuid,
        /// Fields to change.
        patch: TaskPatch,
    },
    /// Flip a task between completed and pending.
    Toggle {
        /// Target task.
        id: Uuid,
        /// Status at the moment the user toggled.
        from: TaskStatus,
    },
    /// Delete a task.
    Delete {
        /// Target task.
        id: Uuid,
    },
    /// Gracefully shut down the worker.
    Shutdown,
}

/// Which mutation an [`ApiEvent::MutationDone`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// A task was created.
    Create,
    /// A task was edited.
    Update,
    /// A task's status was toggled.
    Toggle,
    /// A task was deleted.
    Delete,
}

/// Events sent from the API worker to the TUI main loop.
#[derive(Debug)]
pub enum ApiEvent {
    /// A fresh copy of the whole collection, newest first.
    TasksLoaded(Vec<Task>),
    /// A mutation round trip succeeded; a `TasksLoaded` follows.
    MutationDone(MutationKind),
    /// A request failed; prior data on screen is still valid.
    RequestFailed {
        /// Message for the transient notice.
        message: String,
    },
}

/// Spawns the API worker and returns the channel handles.
#[must_use]
pub fn spawn_api_worker(
    client: ApiClient,
    channel_capacity: usize,
) -> (mpsc::Sender<ApiCommand>, mpsc::Receiver<ApiEvent>) {
    let (cmd_tx, cmd_rx) = mpsc::channel::<ApiCommand>(channel_capacity);
    let (evt_tx, evt_rx) = mpsc::channel::<ApiEvent>(channel_capacity);

    tokio::spawn(async move {
        command_loop(client, cmd_rx, evt_tx).await;
    });

    (cmd_tx, evt_rx)
}

/// Background task: process commands in order until shutdown.
async fn command_loop(
    client: ApiClient,
    mut cmd_rx: mpsc::Receiver<ApiCommand>,
    evt_tx: mpsc::Sender<ApiEvent>,
) {
    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            ApiCommand::Refresh => refresh(&client, &evt_tx).await,
            ApiCommand::Create { draft } => {
                let result = client.create_task(&draft).await;
                finish_mutation(&client, &evt_tx, MutationKind::Create, result.map(drop)).await;
            }
            ApiCommand::Update { id, patch } => {
                let result = client.update_task(id, &patch).await;
                finish_mutation(&client, &evt_tx, MutationKind::Update, result.map(drop)).await;
            }
            ApiCommand::Toggle { id, from } => {
                let patch = TaskPatch::status_only(from.toggled());
                let result = client.update_task(id, &patch).await;
                finish_mutation(&client, &evt_tx, MutationKind::Toggle, result.map(drop)).await;
            }
            ApiCommand::Delete { id } => {
                let result = client.delete_task(id).await;
                finish_mutation(&client, &evt_tx, MutationKind::Delete, result).await;
            }
            ApiCommand::Shutdown => {
                tracing::info!("api worker shutting down");
                break;
            }
        }
    }
}

/// Fetch the collection and report it, or report the failure.
async fn refresh(client: &ApiClient, evt_tx: &mpsc::Sender<ApiEvent>) {
    match client.list_tasks().await {
        Ok(tasks) => {
            let _ = evt_tx.send(ApiEvent::TasksLoaded(tasks)).await;
        }
        Err(e) => {
            tracing::warn!(error = %e, "task fetch failed");
            let _ = evt_tx
                .send(ApiEvent::RequestFailed {
                    message: e.to_string(),
                })
                .await;
        }
    }
}

/// Report a mutation outcome; a success invalidates the collection and
/// triggers the re-fetch.
async fn finish_mutation(
    client: &ApiClient,
    evt_tx: &mpsc::Sender<ApiEvent>,
    kind: MutationKind,
    result: Result<(), crate::api::ApiClientError>,
) {
    match result {
        Ok(()) => {
            let _ = evt_tx.send(ApiEvent::MutationDone(kind)).await;
            refresh(client, evt_tx).await;
        }
        Err(e) => {
            tracing::warn!(error = %e, kind = ?kind, "mutation failed");
            let _ = evt_tx
                .send(ApiEvent::RequestFailed {
                    message: e.to_string(),
                })
                .await;
        }
    }
}
