//! The task store: the single in-memory owner of board contents.
//!
//! Ordering is significant (each column shows its tasks in store order)
//! and ids are unique; no operation here may introduce a duplicate.

#[cfg(test)]
#[path = "tasks_test.rs"]
mod tasks_test;

use crate::net::types::{Task, TaskId, TaskStatus};

/// Position of a task on the board: the column key plus the row index
/// among tasks of that status, counted in store order.
pub type ColumnSlot = (TaskStatus, usize);

#[derive(Clone, Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Swap in a full list, keeping the first occurrence of each id.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks.clear();
        for task in tasks {
            self.push(task);
        }
    }

    /// Append one task. An existing entry with the same id is overwritten
    /// in place instead of duplicated.
    pub fn push(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => *existing = task,
            None => self.tasks.push(task),
        }
    }

    /// Replace the task whose id matches. Unknown ids are a no-op: remote
    /// updates never insert.
    pub fn replace(&mut self, task: Task) -> bool {
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => {
                *existing = task;
                true
            }
            None => false,
        }
    }

    /// Remove by id. Removing an already-absent id is a no-op.
    pub fn remove(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        before != self.tasks.len()
    }

    /// Tasks of one column, in store order.
    #[must_use]
    pub fn by_status(&self, status: TaskStatus) -> Vec<&Task> {
        self.tasks.iter().filter(|task| task.status == status).collect()
    }

    /// Number of rows currently in `status`'s column.
    #[must_use]
    pub fn column_len(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|task| task.status == status).count()
    }

    /// Task occupying `slot`, if that row exists.
    #[must_use]
    pub fn at(&self, slot: ColumnSlot) -> Option<&Task> {
        self.tasks.iter().filter(|task| task.status == slot.0).nth(slot.1)
    }

    /// Apply a completed move gesture: lift the task out of its source
    /// column, restamp its status with the destination column key, splice
    /// it into the destination column at the target row, and rebuild the
    /// store as TODO ++ IN_PROGRESS ++ DONE.
    ///
    /// Returns the moved task for the follow-up sync call, or `None` when
    /// the gesture is a no-op: source equals destination, or the source
    /// row does not exist. A destination row past the end of the column
    /// appends.
    pub fn apply_move(&mut self, source: ColumnSlot, dest: ColumnSlot) -> Option<Task> {
        if source == dest {
            return None;
        }

        let mut columns: [Vec<Task>; 3] = TaskStatus::COLUMNS.map(|status| {
            self.tasks.iter().filter(|task| task.status == status).cloned().collect()
        });

        let source_column = &mut columns[source.0.column()];
        if source.1 >= source_column.len() {
            return None;
        }
        let mut moved = source_column.remove(source.1);
        moved.status = dest.0;

        let dest_column = &mut columns[dest.0.column()];
        let row = dest.1.min(dest_column.len());
        dest_column.insert(row, moved.clone());

        self.tasks = columns.into_iter().flatten().collect();
        Some(moved)
    }
}
