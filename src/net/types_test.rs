use super::*;

fn task() -> Task {
    Task {
        id: 7,
        title: "Write release notes".to_owned(),
        description: "v0.1".to_owned(),
        status: TaskStatus::InProgress,
    }
}

// =============================================================
// TaskStatus
// =============================================================

#[test]
fn status_wire_names_are_screaming_snake() {
    assert_eq!(serde_json::to_string(&TaskStatus::Todo).expect("encode"), "\"TODO\"");
    assert_eq!(
        serde_json::to_string(&TaskStatus::InProgress).expect("encode"),
        "\"IN_PROGRESS\""
    );
    assert_eq!(serde_json::to_string(&TaskStatus::Done).expect("encode"), "\"DONE\"");
}

#[test]
fn status_decodes_from_wire_names() {
    assert_eq!(
        serde_json::from_str::<TaskStatus>("\"IN_PROGRESS\"").expect("decode"),
        TaskStatus::InProgress
    );
}

#[test]
fn columns_are_in_display_order() {
    assert_eq!(
        TaskStatus::COLUMNS,
        [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done]
    );
    for (index, status) in TaskStatus::COLUMNS.iter().enumerate() {
        assert_eq!(status.column(), index);
    }
}

#[test]
fn status_labels() {
    assert_eq!(TaskStatus::Todo.label(), "To Do");
    assert_eq!(TaskStatus::InProgress.label(), "In Progress");
    assert_eq!(TaskStatus::Done.label(), "Done");
}

// =============================================================
// Task
// =============================================================

#[test]
fn task_missing_description_defaults_to_empty() {
    let decoded: Task =
        serde_json::from_str(r#"{"id":1,"title":"t","status":"TODO"}"#).expect("decode");
    assert_eq!(decoded.description, "");
}

// =============================================================
// PushEvent wire shapes
// =============================================================

#[test]
fn task_updated_carries_the_full_task() {
    let encoded = serde_json::to_value(PushEvent::TaskUpdated(task())).expect("encode");
    assert_eq!(
        encoded,
        serde_json::json!({
            "event": "task-updated",
            "data": {
                "id": 7,
                "title": "Write release notes",
                "description": "v0.1",
                "status": "IN_PROGRESS"
            }
        })
    );
}

#[test]
fn task_deleted_carries_the_bare_id() {
    let encoded = serde_json::to_value(PushEvent::TaskDeleted(7)).expect("encode");
    assert_eq!(encoded, serde_json::json!({ "event": "task-deleted", "data": 7 }));
}

#[test]
fn push_event_round_trips() {
    for event in [PushEvent::TaskUpdated(task()), PushEvent::TaskDeleted(7)] {
        let json = serde_json::to_string(&event).expect("encode");
        let decoded: PushEvent = serde_json::from_str(&json).expect("decode");
        assert_eq!(decoded, event);
    }
}

#[test]
fn unknown_event_name_fails_to_decode() {
    let result = serde_json::from_str::<PushEvent>(r#"{"event":"task-archived","data":7}"#);
    assert!(result.is_err());
}
