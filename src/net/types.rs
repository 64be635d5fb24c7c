//! Wire types shared by the REST client and the push channel.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Backend-assigned task identifier.
pub type TaskId = i64;

/// The three fixed status columns.
///
/// Wire names are `TODO`, `IN_PROGRESS`, and `DONE`; a task's status is
/// always one of them, so every task has a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Board display order: TODO, then IN_PROGRESS, then DONE.
    pub const COLUMNS: [TaskStatus; 3] =
        [TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

    /// Column header shown on the board.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    /// Index of this status within [`TaskStatus::COLUMNS`].
    #[must_use]
    pub fn column(self) -> usize {
        match self {
            TaskStatus::Todo => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Done => 2,
        }
    }
}

/// The unit of work tracked by the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: TaskStatus,
}

/// Body for `POST /api/tasks`; the server assigns the id.
#[derive(Clone, Debug, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

/// Events exchanged over the push channel, in both directions.
///
/// An update carries the full task as the new state for its id; a delete
/// carries the bare id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum PushEvent {
    TaskUpdated(Task),
    TaskDeleted(TaskId),
}
