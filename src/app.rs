//! The event loop and gesture handlers gluing the store, the sync client,
//! and the board view together.
//!
//! SYNC MODEL
//! ==========
//! Moves apply optimistically: the store changes before the network call
//! resolves, and a failed update keeps the local state (keep-local, no
//! rollback). Creation and deletion apply only after authoritative
//! confirmation; a confirmed update or delete is then broadcast over the
//! push channel so other connected boards follow. Overlapping edits to the
//! same task resolve as last write observed wins.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::io;
use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::sync::mpsc;

use crate::net::api::{ApiClient, ApiError};
use crate::net::push::{PushClient, PushHandle};
use crate::net::types::{PushEvent, Task, TaskId, TaskStatus};
use crate::state::tasks::TaskStore;
use crate::state::ui::{ConnectionStatus, Grab, Prompt, UiState};
use crate::view;

/// Completion of a spawned sync call, reported back to the event loop.
#[derive(Debug)]
pub enum SyncOutcome {
    Created(Result<Task, ApiError>),
    Updated { task: Task, result: Result<(), ApiError> },
    Deleted { id: TaskId, result: Result<(), ApiError> },
}

pub struct App {
    pub store: TaskStore,
    pub ui: UiState,
    api: Arc<ApiClient>,
    push: PushHandle,
    sync_tx: mpsc::UnboundedSender<SyncOutcome>,
    sync_rx: mpsc::UnboundedReceiver<SyncOutcome>,
    should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(api: ApiClient, push: PushHandle) -> Self {
        let (sync_tx, sync_rx) = mpsc::unbounded_channel();
        Self {
            store: TaskStore::new(),
            ui: UiState::default(),
            api: Arc::new(api),
            push,
            sync_tx,
            sync_rx,
            should_quit: false,
        }
    }

    /// Initial board fill. A failed or undecodable fetch starts the board
    /// empty; the failure is logged and never surfaced to the user.
    pub async fn load_initial(&mut self) {
        match self.api.list().await {
            Ok(tasks) => self.store.replace_all(tasks),
            Err(error) => {
                tracing::warn!(%error, "task list fetch failed; starting empty");
                self.store.replace_all(Vec::new());
            }
        }
    }

    /// Run the board until the user quits.
    ///
    /// All work happens as reactions to discrete events: terminal input,
    /// inbound push notifications, and completions of spawned sync calls.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing to the terminal fails.
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut input: EventStream,
        client: &mut PushClient,
    ) -> io::Result<()> {
        self.ui.connection = ConnectionStatus::Connected;
        let mut push_open = true;

        while !self.should_quit {
            terminal.draw(|frame| view::render(frame, &self.store, &self.ui))?;

            tokio::select! {
                event = input.next() => match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(error)) => {
                        tracing::warn!(%error, "terminal input error");
                    }
                    None => break,
                },
                event = client.recv(), if push_open => match event {
                    Some(event) => self.apply_push_event(event),
                    None => {
                        push_open = false;
                        self.ui.connection = ConnectionStatus::Disconnected;
                        tracing::warn!("push channel disconnected");
                    }
                },
                Some(outcome) = self.sync_rx.recv() => self.handle_sync_outcome(outcome),
            }
        }

        Ok(())
    }

    /// Apply an inbound push notification to the store.
    ///
    /// Updates for unknown ids are ignored (no insertion) and a repeated
    /// delete is a no-op, so replayed or raced notifications are harmless.
    pub fn apply_push_event(&mut self, event: PushEvent) {
        match event {
            PushEvent::TaskUpdated(task) => {
                self.store.replace(task);
            }
            PushEvent::TaskDeleted(id) => {
                self.store.remove(id);
            }
        }
        self.clamp_positions();
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.ui.notice = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if self.ui.prompt.is_some() {
            self.handle_prompt_key(key);
            return;
        }
        if self.ui.confirm.pending().is_some() {
            self.handle_confirm_key(key);
            return;
        }
        if self.ui.grab.is_some() {
            self.handle_grab_key(key);
            return;
        }
        self.handle_board_key(key);
    }

    fn handle_board_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('a') => self.ui.prompt = Some(Prompt::title()),
            KeyCode::Char('d') => {
                if let Some(task) = self.store.at(self.ui.focus) {
                    self.ui.confirm.request(task.id);
                }
            }
            KeyCode::Char('g' | ' ') | KeyCode::Enter => {
                if let Some(task) = self.store.at(self.ui.focus) {
                    self.ui.grab = Some(Grab {
                        task_id: task.id,
                        source: self.ui.focus,
                        carry: self.ui.focus,
                    });
                }
            }
            KeyCode::Left | KeyCode::Char('h') => self.move_focus(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_focus(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_focus(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_focus(0, 1),
            _ => {}
        }
    }

    /// Keys while a delete is pending. Anything other than a confirm or a
    /// cancel falls through to normal board handling, so pressing delete
    /// on another task simply overwrites the pending id.
    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => self.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Esc => self.ui.confirm.cancel(),
            _ => self.handle_board_key(key),
        }
    }

    fn handle_grab_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('g' | ' ') => self.drop_grab(),
            KeyCode::Esc => self.ui.grab = None,
            KeyCode::Left | KeyCode::Char('h') => self.move_carry(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_carry(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_carry(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_carry(0, 1),
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.ui.prompt = None,
            KeyCode::Enter => match self.ui.prompt.take() {
                Some(Prompt::Title { buffer }) => {
                    let title = buffer.trim().to_owned();
                    if !title.is_empty() {
                        self.ui.prompt =
                            Some(Prompt::Description { title, buffer: String::new() });
                    }
                }
                Some(Prompt::Description { title, buffer }) => {
                    self.spawn_create(title, buffer.trim().to_owned());
                }
                None => {}
            },
            KeyCode::Backspace => {
                if let Some(prompt) = self.ui.prompt.as_mut() {
                    prompt.buffer_mut().pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(prompt) = self.ui.prompt.as_mut() {
                    prompt.buffer_mut().push(c);
                }
            }
            _ => {}
        }
    }

    fn move_focus(&mut self, dx: isize, dy: isize) {
        let (status, row) = self.ui.focus;
        let status = shift_column(status, dx);
        let row = shift_row(row, dy, self.store.column_len(status).saturating_sub(1));
        self.ui.focus = (status, row);
    }

    fn move_carry(&mut self, dx: isize, dy: isize) {
        let Some(grab) = self.ui.grab else { return };
        let status = shift_column(grab.carry.0, dx);
        // Within the source column the carried task itself occupies no row,
        // so the last legal slot is len-1; elsewhere it may append at len.
        let len = self.store.column_len(status);
        let max = if status == grab.source.0 { len.saturating_sub(1) } else { len };
        let row = if dx == 0 { shift_row(grab.carry.1, dy, max) } else { grab.carry.1.min(max) };
        self.ui.grab = Some(Grab { carry: (status, row), ..grab });
    }

    /// Drop the carried task. Dropping on the source slot is a no-op;
    /// otherwise the store changes immediately and the update call is
    /// issued afterwards.
    fn drop_grab(&mut self) {
        let Some(grab) = self.ui.grab.take() else { return };
        self.ui.focus = grab.carry;
        if grab.carry != grab.source {
            if let Some(moved) = self.store.apply_move(grab.source, grab.carry) {
                self.spawn_update(moved);
            }
        }
        self.clamp_positions();
    }

    /// Deletion is confirmed by the server before the store changes; the
    /// removal and broadcast happen on the `Deleted` outcome.
    fn confirm_delete(&mut self) {
        if let Some(id) = self.ui.confirm.confirm() {
            self.spawn_delete(id);
        }
    }

    fn handle_sync_outcome(&mut self, outcome: SyncOutcome) {
        match outcome {
            SyncOutcome::Created(Ok(task)) => {
                self.store.push(task);
            }
            SyncOutcome::Created(Err(error)) => {
                // The board stays unchanged; the failure lands in the footer.
                tracing::error!(%error, "task create failed");
                self.ui.notice = Some("task create failed".to_owned());
            }
            SyncOutcome::Updated { task, result: Ok(()) } => {
                self.push.broadcast(PushEvent::TaskUpdated(task));
            }
            SyncOutcome::Updated { task, result: Err(error) } => {
                // Keep-local: the optimistic move stands and the server
                // copy stays stale until the next reload.
                tracing::warn!(
                    task_id = task.id,
                    %error,
                    "task update failed; keeping local state"
                );
            }
            SyncOutcome::Deleted { id, result: Ok(()) } => {
                self.store.remove(id);
                self.push.broadcast(PushEvent::TaskDeleted(id));
                self.clamp_positions();
            }
            SyncOutcome::Deleted { id, result: Err(error) } => {
                tracing::warn!(task_id = id, %error, "task delete failed; task kept");
            }
        }
    }

    /// Keep focus and any in-flight grab consistent after the board
    /// changed underneath them (sync outcome or remote notification).
    fn clamp_positions(&mut self) {
        let (status, row) = self.ui.focus;
        self.ui.focus = (status, row.min(self.store.column_len(status).saturating_sub(1)));

        if let Some(grab) = self.ui.grab {
            if self.store.get(grab.task_id).is_none() {
                // The carried task vanished remotely; abandon the gesture.
                self.ui.grab = None;
            } else {
                let (status, row) = grab.carry;
                let len = self.store.column_len(status);
                let max = if status == grab.source.0 { len.saturating_sub(1) } else { len };
                self.ui.grab = Some(Grab { carry: (status, row.min(max)), ..grab });
            }
        }
    }

    fn spawn_create(&self, title: String, description: String) {
        let api = Arc::clone(&self.api);
        let tx = self.sync_tx.clone();
        tokio::spawn(async move {
            let result = api.create(&title, &description).await;
            let _ = tx.send(SyncOutcome::Created(result));
        });
    }

    fn spawn_update(&self, task: Task) {
        let api = Arc::clone(&self.api);
        let tx = self.sync_tx.clone();
        tokio::spawn(async move {
            let result = api.update(&task).await;
            let _ = tx.send(SyncOutcome::Updated { task, result });
        });
    }

    fn spawn_delete(&self, id: TaskId) {
        let api = Arc::clone(&self.api);
        let tx = self.sync_tx.clone();
        tokio::spawn(async move {
            let result = api.delete(id).await;
            let _ = tx.send(SyncOutcome::Deleted { id, result });
        });
    }
}

fn shift_column(status: TaskStatus, dx: isize) -> TaskStatus {
    let last = TaskStatus::COLUMNS.len() - 1;
    let column = status.column().saturating_add_signed(dx).min(last);
    TaskStatus::COLUMNS[column]
}

fn shift_row(row: usize, dy: isize, max: usize) -> usize {
    row.saturating_add_signed(dy).min(max)
}
