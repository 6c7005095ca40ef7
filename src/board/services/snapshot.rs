//! Read-only copy of the board for rendering.

use super::{ColumnPartition, partition_by_status};
use crate::board::domain::{Task, TaskId};

/// The task list as it stood when the snapshot was taken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    tasks: Vec<Task>,
}

impl BoardSnapshot {
    /// Wraps a task list.
    #[must_use]
    pub const fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Returns the tasks in board order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the task with `task_id`.
    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Returns the identifiers in board order.
    #[must_use]
    pub fn ids(&self) -> Vec<&TaskId> {
        self.tasks.iter().map(Task::id).collect()
    }

    /// Groups the tasks into columns.
    #[must_use]
    pub fn columns(&self) -> ColumnPartition<'_> {
        partition_by_status(&self.tasks)
    }

    /// Iterates tasks whose title or description contains `query`.
    pub fn search<'a>(&'a self, query: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |task| task.matches_query(query))
    }

    /// Groups the tasks matching `query` into columns.
    #[must_use]
    pub fn filtered_columns(&self, query: &str) -> ColumnPartition<'_> {
        partition_by_status(self.tasks.iter().filter(|task| task.matches_query(query)))
    }

    /// Returns the number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` when the board has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
