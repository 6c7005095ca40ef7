//! Column partitioning of a task sequence.

use crate::board::domain::{StatusValue, Task, TaskStatus};
use std::collections::BTreeMap;

/// Tasks grouped into board columns, borrowing from the source sequence.
///
/// Every input task appears exactly once: in the column of its status, or in
/// the unrecognized bucket when its status is not one of the four columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPartition<'a> {
    columns: BTreeMap<TaskStatus, Vec<&'a Task>>,
    unrecognized: Vec<&'a Task>,
}

/// Groups tasks by status, preserving input order inside each column.
#[must_use]
pub fn partition_by_status<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> ColumnPartition<'a> {
    let mut columns: BTreeMap<TaskStatus, Vec<&'a Task>> =
        TaskStatus::ALL.iter().map(|status| (*status, Vec::new())).collect();
    let mut unrecognized = Vec::new();

    for task in tasks {
        match task.status() {
            StatusValue::Known(status) => columns.entry(*status).or_default().push(task),
            StatusValue::Unrecognized(_) => unrecognized.push(task),
        }
    }

    ColumnPartition {
        columns,
        unrecognized,
    }
}

impl<'a> ColumnPartition<'a> {
    /// Returns the tasks of one column in board order.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[&'a Task] {
        self.columns
            .get(&status)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the number of tasks in one column.
    #[must_use]
    pub fn count(&self, status: TaskStatus) -> usize {
        self.column(status).len()
    }

    /// Returns tasks whose status matches no column.
    #[must_use]
    pub fn unrecognized(&self) -> &[&'a Task] {
        &self.unrecognized
    }

    /// Iterates the four columns in fixed column order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, &[&'a Task])> + '_ {
        self.columns
            .iter()
            .map(|(status, tasks)| (*status, tasks.as_slice()))
    }

    /// Concatenates the four columns in column order.
    ///
    /// Unrecognized tasks are not included.
    #[must_use]
    pub fn flatten(&self) -> Vec<&'a Task> {
        self.columns.values().flatten().copied().collect()
    }

    /// Returns the total number of partitioned tasks, including unrecognized
    /// ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.values().map(Vec::len).sum::<usize>() + self.unrecognized.len()
    }

    /// Returns `true` when no task was partitioned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
