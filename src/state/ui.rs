//! View-side interaction state: keyboard focus, the move gesture in
//! flight, the delete-confirmation flow, and the create prompt.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use crate::net::types::TaskId;
use crate::state::tasks::ColumnSlot;

/// Delete-confirmation flow.
///
/// Only one id can be pending at a time: requesting delete on a second
/// task while one is pending overwrites the pending id, and confirmation
/// always acts on the latest request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeleteConfirm {
    #[default]
    Idle,
    Pending(TaskId),
}

impl DeleteConfirm {
    pub fn request(&mut self, id: TaskId) {
        *self = DeleteConfirm::Pending(id);
    }

    /// Resolve the flow, yielding the pending id if any.
    pub fn confirm(&mut self) -> Option<TaskId> {
        match std::mem::take(self) {
            DeleteConfirm::Pending(id) => Some(id),
            DeleteConfirm::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        *self = DeleteConfirm::Idle;
    }

    #[must_use]
    pub fn pending(self) -> Option<TaskId> {
        match self {
            DeleteConfirm::Pending(id) => Some(id),
            DeleteConfirm::Idle => None,
        }
    }
}

/// A move gesture in flight: the task was lifted from `source` and is
/// currently carried at `carry`. Dropping on the source slot, or
/// abandoning the gesture, leaves the board unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grab {
    pub task_id: TaskId,
    pub source: ColumnSlot,
    pub carry: ColumnSlot,
}

/// Two-field create prompt. Title is required: submitting it empty, or
/// cancelling either field, aborts the flow without a network call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    Title { buffer: String },
    Description { title: String, buffer: String },
}

impl Prompt {
    #[must_use]
    pub fn title() -> Self {
        Prompt::Title { buffer: String::new() }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Prompt::Title { .. } => "Title",
            Prompt::Description { .. } => "Description",
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &str {
        match self {
            Prompt::Title { buffer } | Prompt::Description { buffer, .. } => buffer,
        }
    }

    pub fn buffer_mut(&mut self) -> &mut String {
        match self {
            Prompt::Title { buffer } | Prompt::Description { buffer, .. } => buffer,
        }
    }
}

/// Push-channel connection status shown in the footer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connected,
}

#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub focus: ColumnSlot,
    pub grab: Option<Grab>,
    pub confirm: DeleteConfirm,
    pub prompt: Option<Prompt>,
    pub connection: ConnectionStatus,
    pub notice: Option<String>,
}
