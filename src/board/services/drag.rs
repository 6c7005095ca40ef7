//! Drag session tracking for moving cards between columns.
//!
//! The coordinator is a two-state machine: idle, or dragging exactly one
//! task. A drop or cancel always returns it to idle.

use crate::board::domain::{StatusValue, Task, TaskId, TaskStatus};

/// A column change resolved from a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    /// The dragged task.
    pub task_id: TaskId,
    /// Status the task had when the drag started.
    pub from: StatusValue,
    /// Column the task was dropped on.
    pub to: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DragSession {
    task_id: TaskId,
    origin: StatusValue,
    hovered: Option<TaskStatus>,
}

/// Tracks the drag gesture in progress, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragCoordinator {
    session: Option<DragSession>,
}

impl DragCoordinator {
    /// Creates an idle coordinator.
    #[must_use]
    pub const fn new() -> Self {
        Self { session: None }
    }

    /// Starts dragging `task`, replacing any drag already in progress.
    pub fn begin_drag(&mut self, task: &Task) {
        self.session = Some(DragSession {
            task_id: task.id().clone(),
            origin: task.status().clone(),
            hovered: None,
        });
    }

    /// Records the column under the pointer. Ignored when idle.
    pub fn hover(&mut self, column: TaskStatus) {
        if let Some(session) = self.session.as_mut() {
            session.hovered = Some(column);
        }
    }

    /// Clears the hovered column without ending the drag.
    pub fn leave(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.hovered = None;
        }
    }

    /// Ends the drag on `column`.
    ///
    /// Returns the transition when a drag was active and `column` differs
    /// from the task's origin status. The session is cleared in every case.
    pub fn drop(&mut self, column: TaskStatus) -> Option<StatusTransition> {
        let session = self.session.take()?;
        if session.origin.is(column) {
            return None;
        }
        Some(StatusTransition {
            task_id: session.task_id,
            from: session.origin,
            to: column,
        })
    }

    /// Ends the drag without a drop.
    pub fn cancel(&mut self) {
        self.session = None;
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Returns the task being dragged.
    #[must_use]
    pub fn dragged_task(&self) -> Option<&TaskId> {
        self.session.as_ref().map(|session| &session.task_id)
    }

    /// Returns `true` when `task_id` is the task being dragged.
    #[must_use]
    pub fn is_dragging(&self, task_id: &TaskId) -> bool {
        self.dragged_task() == Some(task_id)
    }

    /// Returns the column currently under the pointer.
    #[must_use]
    pub fn hovered_column(&self) -> Option<TaskStatus> {
        self.session.as_ref().and_then(|session| session.hovered)
    }
}
