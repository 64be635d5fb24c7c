use super::*;

fn task(id: TaskId, status: TaskStatus) -> Task {
    Task {
        id,
        title: format!("task-{id}"),
        description: String::new(),
        status,
    }
}

fn ids(store: &TaskStore) -> Vec<TaskId> {
    store.all().iter().map(|t| t.id).collect()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// An app wired to a dead port, so every spawned sync call fails fast,
/// plus the receiving end of its push broadcasts.
fn app() -> (App, mpsc::UnboundedReceiver<PushEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(ApiClient::new("http://127.0.0.1:1"), PushHandle::new(tx));
    app.store
        .replace_all(vec![task(1, TaskStatus::Todo), task(2, TaskStatus::Todo)]);
    (app, rx)
}

// =============================================================
// Inbound push notifications
// =============================================================

#[test]
fn update_notification_replaces_the_matching_task() {
    let (mut app, _rx) = app();
    app.apply_push_event(PushEvent::TaskUpdated(task(2, TaskStatus::Done)));

    assert_eq!(ids(&app.store), vec![1, 2]);
    assert_eq!(app.store.get(2).expect("task 2").status, TaskStatus::Done);
}

#[test]
fn update_notification_for_unknown_id_is_ignored() {
    let (mut app, _rx) = app();
    app.apply_push_event(PushEvent::TaskUpdated(task(42, TaskStatus::Done)));

    assert_eq!(ids(&app.store), vec![1, 2]);
}

#[test]
fn delete_notification_twice_is_idempotent() {
    let (mut app, _rx) = app();
    app.apply_push_event(PushEvent::TaskDeleted(2));
    app.apply_push_event(PushEvent::TaskDeleted(2));

    assert_eq!(ids(&app.store), vec![1]);
}

#[test]
fn remote_delete_of_the_carried_task_abandons_the_gesture() {
    let (mut app, _rx) = app();
    app.ui.grab = Some(Grab {
        task_id: 2,
        source: (TaskStatus::Todo, 1),
        carry: (TaskStatus::Done, 0),
    });

    app.apply_push_event(PushEvent::TaskDeleted(2));

    assert!(app.ui.grab.is_none());
}

// =============================================================
// Sync outcomes
// =============================================================

#[test]
fn confirmed_delete_removes_the_task_and_broadcasts_once() {
    let (mut app, mut rx) = app();
    app.handle_sync_outcome(SyncOutcome::Deleted { id: 2, result: Ok(()) });

    assert_eq!(ids(&app.store), vec![1]);
    assert_eq!(rx.try_recv().expect("broadcast"), PushEvent::TaskDeleted(2));
    assert!(rx.try_recv().is_err());
}

#[test]
fn failed_delete_keeps_the_task_and_broadcasts_nothing() {
    let (mut app, mut rx) = app();
    app.handle_sync_outcome(SyncOutcome::Deleted {
        id: 2,
        result: Err(ApiError::Status { status: 500, body: String::new() }),
    });

    assert_eq!(ids(&app.store), vec![1, 2]);
    assert!(rx.try_recv().is_err());
}

#[test]
fn confirmed_update_broadcasts_the_task() {
    let (mut app, mut rx) = app();
    let moved = task(2, TaskStatus::InProgress);
    app.handle_sync_outcome(SyncOutcome::Updated { task: moved.clone(), result: Ok(()) });

    assert_eq!(rx.try_recv().expect("broadcast"), PushEvent::TaskUpdated(moved));
}

#[test]
fn failed_update_keeps_the_optimistic_state() {
    let (mut app, mut rx) = app();
    app.store.replace(task(2, TaskStatus::InProgress));

    app.handle_sync_outcome(SyncOutcome::Updated {
        task: task(2, TaskStatus::InProgress),
        result: Err(ApiError::Status { status: 502, body: String::new() }),
    });

    assert_eq!(app.store.get(2).expect("task 2").status, TaskStatus::InProgress);
    assert!(rx.try_recv().is_err());
}

#[test]
fn confirmed_create_appends_the_server_task() {
    let (mut app, _rx) = app();
    app.handle_sync_outcome(SyncOutcome::Created(Ok(task(9, TaskStatus::Todo))));

    assert_eq!(ids(&app.store), vec![1, 2, 9]);
}

#[test]
fn failed_create_surfaces_a_notice_and_leaves_the_board() {
    let (mut app, _rx) = app();
    app.handle_sync_outcome(SyncOutcome::Created(Err(ApiError::Status {
        status: 500,
        body: String::new(),
    })));

    assert_eq!(ids(&app.store), vec![1, 2]);
    assert!(app.ui.notice.is_some());
}

// =============================================================
// Move gesture
// =============================================================

#[tokio::test]
async fn move_gesture_issues_an_update_for_the_moved_task() {
    let (mut app, _rx) = app();
    app.ui.focus = (TaskStatus::Todo, 1);

    app.handle_key(key(KeyCode::Char('g')));
    app.handle_key(key(KeyCode::Right));
    app.handle_key(key(KeyCode::Enter));

    // Optimistic: the board changed before the call resolved.
    assert_eq!(ids(&app.store), vec![1, 2]);
    assert_eq!(app.store.get(2).expect("task 2").status, TaskStatus::InProgress);
    assert_eq!(app.ui.focus, (TaskStatus::InProgress, 0));

    match app.sync_rx.recv().await.expect("update outcome") {
        SyncOutcome::Updated { task, result } => {
            assert_eq!(task.id, 2);
            assert_eq!(task.status, TaskStatus::InProgress);
            assert!(result.is_err());
        }
        other => panic!("expected an update outcome, got {other:?}"),
    }
}

#[test]
fn abandoned_gesture_leaves_the_board_unchanged() {
    let (mut app, _rx) = app();
    let before = app.store.all().to_vec();
    app.ui.focus = (TaskStatus::Todo, 1);

    app.handle_key(key(KeyCode::Char('g')));
    app.handle_key(key(KeyCode::Right));
    app.handle_key(key(KeyCode::Esc));

    assert_eq!(app.store.all(), &before[..]);
    assert!(app.ui.grab.is_none());
    assert!(app.sync_rx.try_recv().is_err());
}

#[test]
fn drop_on_the_source_slot_is_a_noop() {
    let (mut app, _rx) = app();
    let before = app.store.all().to_vec();
    app.ui.focus = (TaskStatus::Todo, 1);

    app.handle_key(key(KeyCode::Char('g')));
    app.handle_key(key(KeyCode::Enter));

    assert_eq!(app.store.all(), &before[..]);
    assert!(app.sync_rx.try_recv().is_err());
}

#[test]
fn carry_row_is_clamped_per_column() {
    let (mut app, _rx) = app();
    app.ui.focus = (TaskStatus::Todo, 0);

    app.handle_key(key(KeyCode::Char('g')));
    // TODO holds two tasks but one is carried, so the legal rows are 0
    // and 1; moving further down must not drift.
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.ui.grab.expect("grab").carry, (TaskStatus::Todo, 1));
    app.handle_key(key(KeyCode::Down));
    assert_eq!(app.ui.grab.expect("grab").carry, (TaskStatus::Todo, 1));

    // The empty DONE column only accepts row 0.
    app.handle_key(key(KeyCode::Right));
    app.handle_key(key(KeyCode::Right));
    assert_eq!(app.ui.grab.expect("grab").carry, (TaskStatus::Done, 0));
}

// =============================================================
// Delete-confirmation flow
// =============================================================

#[tokio::test]
async fn second_delete_request_overwrites_the_pending_id() {
    let (mut app, mut rx) = app();
    app.ui.focus = (TaskStatus::Todo, 0);

    app.handle_key(key(KeyCode::Char('d')));
    assert_eq!(app.ui.confirm.pending(), Some(1));

    // While pending, navigation still works and a second request replaces
    // the first rather than queueing behind it.
    app.handle_key(key(KeyCode::Down));
    app.handle_key(key(KeyCode::Char('d')));
    assert_eq!(app.ui.confirm.pending(), Some(2));

    app.handle_key(key(KeyCode::Char('y')));
    assert_eq!(app.ui.confirm.pending(), None);

    match app.sync_rx.recv().await.expect("delete outcome") {
        SyncOutcome::Deleted { id, result } => {
            assert_eq!(id, 2);
            assert!(result.is_err());
        }
        other => panic!("expected a delete outcome, got {other:?}"),
    }
    assert!(app.sync_rx.try_recv().is_err());

    // Replay the outcome as a reachable server would have reported it.
    app.handle_sync_outcome(SyncOutcome::Deleted { id: 2, result: Ok(()) });
    assert_eq!(ids(&app.store), vec![1]);
    assert_eq!(rx.try_recv().expect("broadcast"), PushEvent::TaskDeleted(2));
}

#[test]
fn cancelled_delete_changes_nothing() {
    let (mut app, _rx) = app();
    app.ui.focus = (TaskStatus::Todo, 0);

    app.handle_key(key(KeyCode::Char('d')));
    app.handle_key(key(KeyCode::Char('n')));

    assert_eq!(app.ui.confirm.pending(), None);
    assert_eq!(ids(&app.store), vec![1, 2]);
    assert!(app.sync_rx.try_recv().is_err());
}

// =============================================================
// Create prompt
// =============================================================

#[tokio::test]
async fn create_prompt_submits_title_and_description() {
    let (mut app, _rx) = app();

    app.handle_key(key(KeyCode::Char('a')));
    for c in "Fix the build".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
    app.handle_key(key(KeyCode::Enter));
    for c in "before Friday".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }
    app.handle_key(key(KeyCode::Enter));

    assert!(app.ui.prompt.is_none());
    match app.sync_rx.recv().await.expect("create outcome") {
        SyncOutcome::Created(result) => assert!(result.is_err()),
        other => panic!("expected a create outcome, got {other:?}"),
    }
}

#[test]
fn empty_title_aborts_creation() {
    let (mut app, _rx) = app();

    app.handle_key(key(KeyCode::Char('a')));
    app.handle_key(key(KeyCode::Enter));

    assert!(app.ui.prompt.is_none());
    assert!(app.sync_rx.try_recv().is_err());
}

#[test]
fn escape_during_description_aborts_creation() {
    let (mut app, _rx) = app();

    app.handle_key(key(KeyCode::Char('a')));
    app.handle_key(key(KeyCode::Char('x')));
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(key(KeyCode::Esc));

    assert!(app.ui.prompt.is_none());
    assert!(app.sync_rx.try_recv().is_err());
}
