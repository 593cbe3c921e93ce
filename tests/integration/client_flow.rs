//! Integration tests for the client HTTP layer and API worker.
//!
//! Runs the typed [`ApiClient`] and the command/event worker against a
//! live in-process server: fetch, mutate-then-refetch, and failure
//! surfacing.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use taskdeck::api::{ApiClient, ApiClientError};
use taskdeck::net::{ApiCommand, ApiEvent, DEFAULT_CHANNEL_CAPACITY, MutationKind, spawn_api_worker};
use taskdeck_api::task::{TaskDraft, TaskPatch, TaskStatus};
use taskdeck_server::http;
use taskdeck_server::store::TaskStore;

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Starts an in-process server over a fresh in-memory store and returns
/// its base URL.
async fn start_server() -> String {
    let store = TaskStore::connect_in_memory()
        .await
        .expect("in-memory store");
    let (addr, _handle) = http::start_server("127.0.0.1:0", store)
        .await
        .expect("start server");
    format!("http://{addr}")
}

/// A draft with both required fields set.
fn draft(title: &str, description: &str) -> TaskDraft {
    TaskDraft {
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        status: None,
    }
}

/// Receives the next worker event, failing the test after five seconds.
async fn next_event(rx: &mut mpsc::Receiver<ApiEvent>) -> ApiEvent {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for event")
        .expect("event channel closed")
}

/// Unwraps a `TasksLoaded` event.
fn loaded(event: ApiEvent) -> Vec<taskdeck_api::task::Task> {
    match event {
        ApiEvent::TasksLoaded(tasks) => tasks,
        other => panic!("expected TasksLoaded, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

#[tokio::test]
async fn api_client_crud_round_trip() {
    let base = start_server().await;
    let client = ApiClient::new(&base);

    assert!(client.list_tasks().await.expect("list").is_empty());

    let created = client
        .create_task(&draft("Buy milk", "2%"))
        .await
        .expect("create");
    assert_eq!(created.status, TaskStatus::Pending);

    let fetched = client.get_task(created.id).await.expect("get");
    assert_eq!(fetched, created);

    let updated = client
        .update_task(created.id, &TaskPatch::status_only(TaskStatus::Completed))
        .await
        .expect("update");
    assert_eq!(updated.status, TaskStatus::Completed);
    assert_eq!(updated.title, created.title);

    client.delete_task(created.id).await.expect("delete");

    let err = client.get_task(created.id).await.unwrap_err();
    match err {
        ApiClientError::Server { status, message } => {
            assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
            assert_eq!(message, "Task not found");
        }
        other => panic!("expected Server error, got {other:?}"),
    }
}

#[tokio::test]
async fn api_client_surfaces_validation_message() {
    let base = start_server().await;
    let client = ApiClient::new(&base);

    let err = client.create_task(&draft("   ", "2%")).await.unwrap_err();
    match err {
        ApiClientError::Server { status, message } => {
            assert_eq!(status, reqwest::StatusCode::BAD_REQUEST);
            assert_eq!(message, "Invalid task data");
        }
        other => panic!("expected Server error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// API worker
// ---------------------------------------------------------------------------

#[tokio::test]
async fn worker_refetches_after_every_successful_mutation() {
    let base = start_server().await;
    let (cmd_tx, mut evt_rx) = spawn_api_worker(ApiClient::new(&base), DEFAULT_CHANNEL_CAPACITY);

    // Initial fetch: empty collection.
    cmd_tx.send(ApiCommand::Refresh).await.expect("send");
    assert!(loaded(next_event(&mut evt_rx).await).is_empty());

    // Create: MutationDone followed by a fresh collection.
    cmd_tx
        .send(ApiCommand::Create {
            draft: draft("Buy milk", "2%"),
        })
        .await
        .expect("send");
    assert!(matches!(
        next_event(&mut evt_rx).await,
        ApiEvent::MutationDone(MutationKind::Create)
    ));
    let tasks = loaded(next_event(&mut evt_rx).await);
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].status, TaskStatus::Pending);
    let id = tasks[0].id;

    // Toggle: pending -> completed.
    cmd_tx
        .send(ApiCommand::Toggle {
            id,
            from: tasks[0].status,
        })
        .await
        .expect("send");
    assert!(matches!(
        next_event(&mut evt_rx).await,
        ApiEvent::MutationDone(MutationKind::Toggle)
    ));
    let tasks = loaded(next_event(&mut evt_rx).await);
    assert_eq!(tasks[0].status, TaskStatus::Completed);

    // Toggle again: completed -> pending.
    cmd_tx
        .send(ApiCommand::Toggle {
            id,
            from: tasks[0].status,
        })
        .await
        .expect("send");
    assert!(matches!(
        next_event(&mut evt_rx).await,
        ApiEvent::MutationDone(MutationKind::Toggle)
    ));
    let tasks = loaded(next_event(&mut evt_rx).await);
    assert_eq!(tasks[0].status, TaskStatus::Pending);

    // Delete: collection is empty again.
    cmd_tx.send(ApiCommand::Delete { id }).await.expect("send");
    assert!(matches!(
        next_event(&mut evt_rx).await,
        ApiEvent::MutationDone(MutationKind::Delete)
    ));
    assert!(loaded(next_event(&mut evt_rx).await).is_empty());

    cmd_tx.send(ApiCommand::Shutdown).await.expect("send");
}

#[tokio::test]
async fn worker_reports_validation_failure_and_keeps_data() {
    let base = start_server().await;
    let client = ApiClient::new(&base);
    client
        .create_task(&draft("Buy milk", "2%"))
        .await
        .expect("create");

    let (cmd_tx, mut evt_rx) = spawn_api_worker(client, DEFAULT_CHANNEL_CAPACITY);

    // Invalid create: a single failure event, no refetch.
    cmd_tx
        .send(ApiCommand::Create {
            draft: TaskDraft::default(),
        })
        .await
        .expect("send");
    match next_event(&mut evt_rx).await {
        ApiEvent::RequestFailed { message } => assert_eq!(message, "Invalid task data"),
        other => panic!("expected RequestFailed, got {other:?}"),
    }

    // The stored task is untouched.
    cmd_tx.send(ApiCommand::Refresh).await.expect("send");
    assert_eq!(loaded(next_event(&mut evt_rx).await).len(), 1);
}

#[tokio::test]
async fn unreachable_server_surfaces_as_failure_event() {
    // Nothing listens on port 1.
    let (cmd_tx, mut evt_rx) = spawn_api_worker(
        ApiClient::new("http://127.0.0.1:1"),
        DEFAULT_CHANNEL_CAPACITY,
    );

    cmd_tx.send(ApiCommand::Refresh).await.expect("send");
    assert!(matches!(
        next_event(&mut evt_rx).await,
        ApiEvent::RequestFailed { .. }
    ));
}
