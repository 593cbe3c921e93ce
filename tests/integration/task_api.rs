//! End-to-end tests for the task store REST API.
//!
//! Drives a live in-process server over real HTTP and checks the CRUD
//! contract: status codes, error body shapes, list ordering, and the
//! full create → update → delete → 404 lifecycle.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::Utc;
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

use taskdeck_api::error::ErrorBody;
use taskdeck_api::task::{Task, TaskStatus};
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

/// Creates a task over HTTP and returns the persisted record.
async fn create_task(base: &str, title: &str, description: &str) -> Task {
    let res = reqwest::Client::new()
        .post(format!("{base}/api/tasks"))
        .json(&json!({"title": title, "description": description}))
        .send()
        .await
        .expect("request");
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.expect("body")
}

/// Fetches the whole collection.
async fn list_tasks(base: &str) -> Vec<Task> {
    reqwest::get(format!("{base}/api/tasks"))
        .await
        .expect("request")
        .json()
        .await
        .expect("body")
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_update_delete_get_lifecycle() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    // Create: 201, defaulted status, fresh id and timestamp.
    let before = Utc::now();
    let created = create_task(&base, "Buy milk", "2%").await;
    assert_eq!(created.status, TaskStatus::Pending);
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.description, "2%");
    assert!(created.created_at >= before);

    // Update status only: 200, other fields unchanged.
    let res = client
        .put(format!("{base}/api/tasks/{}", created.id))
        .json(&json!({"status": "completed"}))
        .send()
        .await
        .expect("request");
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Task = res.json().await.expect("body");
    assert_eq!(updated.status, TaskStatus::Completed);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.created_at, created.created_at);

    // Delete: 204 with empty body.
    let res = client
        .delete(format!("{base}/api/tasks/{}", created.id))
        .send()
        .await
        .expect("request");
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await.expect("body").is_empty());

    // Get by id afterwards: 404.
    let res = reqwest::get(format!("{base}/api/tasks/{}", created.id))
        .await
        .expect("request");
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_by_id_round_trips_created_task() {
    let base = start_server().await;
    let created = create_task(&base, "Ship release", "tag and publish").await;

    let fetched: Task = reqwest::get(format!("{base}/api/tasks/{}", created.id))
        .await
        .expect("request")
        .json()
        .await
        .expect("body");
    assert_eq!(fetched, created);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_returns_newest_first_for_any_insertion_order() {
    let base = start_server().await;
    for title in ["alpha", "beta", "gamma", "delta"] {
        create_task(&base, title, "x").await;
    }

    let titles: Vec<String> = list_tasks(&base).await.into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["delta", "gamma", "beta", "alpha"]);
}

#[tokio::test]
async fn empty_store_lists_empty_array() {
    let base = start_server().await;
    assert!(list_tasks(&base).await.is_empty());
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn whitespace_only_fields_are_rejected_and_nothing_persists() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    for body in [
        json!({"title": "  ", "description": "2%"}),
        json!({"title": "Buy milk", "description": "\t\n"}),
        json!({"description": "2%"}),
    ] {
        let res = client
            .post(format!("{base}/api/tasks"))
            .json(&body)
            .send()
            .await
            .expect("request");
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let error: ErrorBody = res.json().await.expect("body");
        assert_eq!(error.message, "Invalid task data");
        let errors = error.errors.expect("field errors");
        assert_eq!(errors[0].field, "title");
    }

    assert!(list_tasks(&base).await.is_empty());
}

#[tokio::test]
async fn status_outside_the_enum_is_rejected() {
    let base = start_server().await;

    let res = reqwest::Client::new()
        .post(format!("{base}/api/tasks"))
        .json(&json!({"title": "Buy milk", "description": "2%", "status": "archived"}))
        .send()
        .await
        .expect("request");
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let error: ErrorBody = res.json().await.expect("body");
    let errors = error.errors.expect("field errors");
    assert_eq!(errors[0].field, "status");
    assert!(list_tasks(&base).await.is_empty());
}

#[tokio::test]
async fn explicit_status_is_honored_on_create() {
    let base = start_server().await;

    let res = reqwest::Client::new()
        .post(format!("{base}/api/tasks"))
        .json(&json!({"title": "Ship it", "description": "v2", "status": "in-progress"}))
        .send()
        .await
        .expect("request");
    assert_eq!(res.status(), StatusCode::CREATED);
    let task: Task = res.json().await.expect("body");
    assert_eq!(task.status, TaskStatus::InProgress);
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn partial_update_leaves_unspecified_fields_alone() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    let created = create_task(&base, "Buy milk", "2%").await;

    let res = client
        .put(format!("{base}/api/tasks/{}", created.id))
        .json(&json!({"title": "Buy oat milk"}))
        .send()
        .await
        .expect("request");
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Task = res.json().await.expect("body");
    assert_eq!(updated.title, "Buy oat milk");
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.status, created.status);
    assert_eq!(updated.id, created.id);
}

#[tokio::test]
async fn update_of_nonexistent_id_is_404_and_persists_nothing() {
    let base = start_server().await;

    let res = reqwest::Client::new()
        .put(format!("{base}/api/tasks/{}", Uuid::new_v4()))
        .json(&json!({"title": "ghost"}))
        .send()
        .await
        .expect("request");
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(list_tasks(&base).await.is_empty());
}

#[tokio::test]
async fn toggle_flips_between_completed_and_pending_only() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    let created = create_task(&base, "Buy milk", "2%").await;
    let url = format!("{base}/api/tasks/{}", created.id);

    // First toggle: pending -> completed.
    let toggled: Task = client
        .put(&url)
        .json(&json!({"status": created.status.toggled().as_str()}))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("body");
    assert_eq!(toggled.status, TaskStatus::Completed);

    // Second toggle: completed -> pending, never through in-progress.
    let toggled_back: Task = client
        .put(&url)
        .json(&json!({"status": toggled.status.toggled().as_str()}))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("body");
    assert_eq!(toggled_back.status, TaskStatus::Pending);
}

// ---------------------------------------------------------------------------
// Deletes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_delete_of_same_id_reports_not_found() {
    let base = start_server().await;
    let client = reqwest::Client::new();
    let created = create_task(&base, "Buy milk", "2%").await;
    let url = format!("{base}/api/tasks/{}", created.id);

    let res = client.delete(&url).send().await.expect("request");
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client.delete(&url).send().await.expect("request");
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let error: ErrorBody = res.json().await.expect("body");
    assert_eq!(error.message, "Task not found");
    assert!(error.errors.is_none());
}
