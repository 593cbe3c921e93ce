//! Property tests for the JSON wire contract.
//!
//! The task entity and its payloads must survive serialization for any
//! field contents, and boundary validation must hold for any whitespace
//! shape.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use taskdeck_api::task::{Task, TaskDraft, TaskPatch, TaskStatus};

fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Pending),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Completed),
    ]
}

proptest! {
    #[test]
    fn task_round_trips_through_json(
        title in ".{1,40}",
        description in ".{1,40}",
        status in arb_status(),
        secs in 0i64..4_102_444_800i64,
        nanos in 0u32..1_000_000_000u32,
    ) {
        let created_at = Utc.timestamp_opt(secs, nanos).single().expect("valid timestamp");
        let task = Task {
            id: Uuid::new_v4(),
            title,
            description,
            status,
            created_at,
        };
        let json = serde_json::to_string(&task).expect("serialize");
        let decoded: Task = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(task, decoded);
    }

    #[test]
    fn status_display_and_parse_are_inverse(status in arb_status()) {
        let round: TaskStatus = status.to_string().parse().expect("parse");
        prop_assert_eq!(round, status);
    }

    #[test]
    fn toggle_never_produces_in_progress(status in arb_status()) {
        prop_assert_ne!(status.toggled(), TaskStatus::InProgress);
        // And it is an involution away from in-progress.
        if status != TaskStatus::InProgress {
            prop_assert_eq!(status.toggled().toggled(), status);
        }
    }

    #[test]
    fn whitespace_only_titles_never_validate(ws in "[ \t\r\n]{0,12}") {
        let draft = TaskDraft {
            title: Some(ws),
            description: Some("ok".to_string()),
            status: None,
        };
        let errors = draft.validate().unwrap_err();
        prop_assert!(errors.iter().any(|e| e.field == "title"));
    }

    #[test]
    fn nonblank_drafts_validate_with_pending_default(
        title in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,30}",
        description in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,30}",
    ) {
        let draft = TaskDraft {
            title: Some(title.clone()),
            description: Some(description.clone()),
            status: None,
        };
        let new = draft.validate().expect("valid");
        prop_assert_eq!(new.status, TaskStatus::Pending);
        prop_assert_eq!(new.title, title.trim());
        prop_assert_eq!(new.description, description.trim());
    }

    #[test]
    fn status_only_patch_has_exactly_one_json_key(status in arb_status()) {
        let patch = TaskPatch::status_only(status);
        let json = serde_json::to_value(&patch).expect("serialize");
        let object = json.as_object().expect("object");
        prop_assert_eq!(object.len(), 1);
        prop_assert!(object.contains_key("status"));
    }

    #[test]
    fn patch_round_trips_through_json(
        title in proptest::option::of(".{0,20}"),
        description in proptest::option::of(".{0,20}"),
        status in proptest::option::of(arb_status()),
    ) {
        let patch = TaskPatch {
            title,
            description,
            status: status.map(|s| s.as_str().to_string()),
        };
        let json = serde_json::to_string(&patch).expect("serialize");
        let decoded: TaskPatch = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(patch, decoded);
    }
}
