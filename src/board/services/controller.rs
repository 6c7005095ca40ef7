//! Board controller: owner and single writer of a project's task list.
//!
//! Status changes from drag-and-drop and deletions are applied to the local
//! list before the backend confirms them, and reverted when it refuses.
//! Field edits and assignments wait for the backend and then adopt its
//! canonical task.
//!
//! Each optimistic mutation is pushed onto a per-task stack together with
//! what it takes to undo it. A failure reverts the task only when no newer
//! mutation is still pending; otherwise it is marked and undone once the newer
//! ones fail too. A success settles its own entry and every older one. Reloads
//! and backend-confirmed edits discard the stack.

use super::{
    BoardConfig, BoardSnapshot, DragCoordinator,
    notify::{announce, report_failure},
};
use crate::board::{
    domain::{ProjectId, StatusValue, Task, TaskId, TaskPatch, TaskStatus, UserId},
    ports::{Notifier, TaskService, TaskServiceError},
};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors returned by board controller operations.
///
/// Every variant has already been reported through the notifier by the time
/// it is returned.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The project's task list could not be fetched.
    #[error("failed to load tasks for project {project_id}: {source}")]
    Load {
        /// Project that was requested.
        project_id: ProjectId,
        /// Underlying service failure.
        #[source]
        source: TaskServiceError,
    },

    /// A non-optimistic write failed; the board is unchanged.
    #[error(transparent)]
    Service(#[from] TaskServiceError),

    /// An optimistic write failed and its local change was reverted.
    #[error("change to task {task_id} was rolled back: {source}")]
    Rollback {
        /// Task whose change was reverted.
        task_id: TaskId,
        /// Underlying service failure.
        #[source]
        source: TaskServiceError,
    },

    /// The task is not on the board; no service call was made.
    #[error("task not on board: {0}")]
    UnknownTask(TaskId),
}

/// Result type for board controller operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Outcome of a status change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// The task already had the requested status; nothing was sent.
    Unchanged,
    /// The backend accepted the change and returned this task.
    Applied(Task),
}

/// Receiver for tasks saved by an edit session.
pub trait SavedTaskSink {
    /// Inserts a newly created task or replaces an existing one.
    fn upsert_from_edit_session(&self, task: Task);
}

/// How to undo one optimistic mutation.
#[derive(Debug)]
enum Undo {
    Status(StatusValue),
    Reinsert { index: usize, task: Task },
}

/// An optimistic mutation whose backend call has not settled yet.
#[derive(Debug)]
struct PendingChange {
    generation: u64,
    undo: Undo,
    failed: bool,
}

#[derive(Debug, Default)]
struct BoardState {
    project_id: Option<ProjectId>,
    tasks: Vec<Task>,
    pending: HashMap<TaskId, Vec<PendingChange>>,
    next_generation: u64,
}

impl BoardState {
    fn position(&self, task_id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id() == task_id)
    }

    fn get_mut(&mut self, task_id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == task_id)
    }

    /// Swaps in `task` when a task with its id is on the board.
    fn replace(&mut self, task: Task) -> bool {
        match self.get_mut(task.id()) {
            Some(existing) => {
                *existing = task;
                true
            }
            None => false,
        }
    }

    /// Records an optimistic mutation of `task_id` and returns its generation.
    fn begin(&mut self, task_id: &TaskId, undo: Undo) -> u64 {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.pending
            .entry(task_id.clone())
            .or_default()
            .push(PendingChange {
                generation,
                undo,
                failed: false,
            });
        generation
    }

    /// Returns `true` when `generation` is the newest unsettled mutation.
    fn is_current(&self, task_id: &TaskId, generation: u64) -> bool {
        self.pending
            .get(task_id)
            .and_then(|stack| stack.last())
            .is_some_and(|change| change.generation == generation)
    }

    /// Settles a successful mutation.
    ///
    /// The backend now holds this mutation's result, so neither it nor any
    /// older unsettled mutation of the task needs undoing.
    fn confirm(&mut self, task_id: &TaskId, generation: u64) {
        let Some(stack) = self.pending.get_mut(task_id) else {
            return;
        };
        if let Some(index) = stack
            .iter()
            .position(|change| change.generation == generation)
        {
            stack.drain(..=index);
        }
        if stack.is_empty() {
            self.pending.remove(task_id);
        }
    }

    /// Settles a failed mutation and returns `true` when the board was
    /// reverted.
    ///
    /// Only the newest mutation is undone right away. An older one is marked
    /// and undone once every mutation above it has failed as well, so the
    /// board ends at the last state the backend could have accepted.
    fn fail(&mut self, task_id: &TaskId, generation: u64) -> bool {
        let Some(stack) = self.pending.get_mut(task_id) else {
            return false;
        };
        let Some(index) = stack
            .iter()
            .position(|change| change.generation == generation)
        else {
            return false;
        };
        if index + 1 < stack.len() {
            if let Some(change) = stack.get_mut(index) {
                change.failed = true;
            }
            return false;
        }

        let mut undone = Vec::new();
        if let Some(change) = stack.pop() {
            undone.push(change.undo);
        }
        while stack.last().is_some_and(|change| change.failed) {
            if let Some(change) = stack.pop() {
                undone.push(change.undo);
            }
        }
        if stack.is_empty() {
            self.pending.remove(task_id);
        }
        for undo in undone {
            self.undo(task_id, undo);
        }
        true
    }

    fn undo(&mut self, task_id: &TaskId, undo: Undo) {
        match undo {
            Undo::Status(previous) => {
                if let Some(task) = self.get_mut(task_id) {
                    task.set_status(previous);
                }
            }
            Undo::Reinsert { index, task } => {
                if self.position(task_id).is_none() {
                    let at = index.min(self.tasks.len());
                    self.tasks.insert(at, task);
                }
            }
        }
    }

    /// Forgets every unsettled mutation of `task_id`; their outcomes no
    /// longer touch the board.
    fn supersede(&mut self, task_id: &TaskId) {
        self.pending.remove(task_id);
    }
}

/// Mediates every mutation of one project's task list.
pub struct BoardController<S, N>
where
    S: TaskService,
    N: Notifier,
{
    service: Arc<S>,
    notifier: Arc<N>,
    config: BoardConfig,
    state: RwLock<BoardState>,
}

impl<S, N> BoardController<S, N>
where
    S: TaskService,
    N: Notifier,
{
    /// Creates an empty board.
    #[must_use]
    pub fn new(service: Arc<S>, notifier: Arc<N>) -> Self {
        Self {
            service,
            notifier,
            config: BoardConfig::default(),
            state: RwLock::new(BoardState::default()),
        }
    }

    /// Replaces the notification configuration.
    #[must_use]
    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, BoardState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BoardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fetches the project's tasks and replaces the whole board with them.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Load`] when the project does not exist or the
    /// request fails; the previous board is kept.
    pub async fn load(&self, project_id: ProjectId) -> BoardResult<()> {
        match self.service.list(&project_id).await {
            Ok(tasks) => {
                debug!(project = %project_id, count = tasks.len(), "loaded board");
                let mut state = self.write();
                state.tasks = tasks;
                state.pending.clear();
                state.project_id = Some(project_id);
                Ok(())
            }
            Err(source) => {
                warn!(project = %project_id, error = %source, "failed to load board");
                report_failure(&*self.notifier, "Error loading project", &source);
                Err(BoardError::Load { project_id, source })
            }
        }
    }

    /// Sends a field update and adopts the task the backend returns.
    ///
    /// The board is not touched until the backend answers.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Service`] when the update fails.
    pub async fn apply_update(&self, task_id: &TaskId, patch: &TaskPatch) -> BoardResult<Task> {
        match self.service.update(task_id, patch).await {
            Ok(task) => {
                self.adopt(task.clone());
                announce(
                    &*self.notifier,
                    self.config,
                    "Task updated",
                    "Task has been updated successfully",
                );
                Ok(task)
            }
            Err(source) => {
                report_failure(&*self.notifier, "Error updating task", &source);
                Err(source.into())
            }
        }
    }

    /// Assigns a task and adopts the task the backend returns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Service`] when the assignment fails.
    pub async fn assign(&self, task_id: &TaskId, assignee_id: &UserId) -> BoardResult<Task> {
        match self.service.assign(task_id, assignee_id).await {
            Ok(task) => {
                self.adopt(task.clone());
                announce(
                    &*self.notifier,
                    self.config,
                    "Task assigned",
                    "Task has been assigned successfully",
                );
                Ok(task)
            }
            Err(source) => {
                report_failure(&*self.notifier, "Error assigning task", &source);
                Err(source.into())
            }
        }
    }

    /// Moves a task to another column.
    ///
    /// The local status changes immediately; the backend call follows. A
    /// request for the status the task already has does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the task is not on the board
    /// and [`BoardError::Rollback`] when the backend refuses the change.
    pub async fn apply_status_change(
        &self,
        task_id: &TaskId,
        new_status: TaskStatus,
    ) -> BoardResult<StatusChange> {
        let (previous, generation) = {
            let mut state = self.write();
            let Some(task) = state.get_mut(task_id) else {
                return Err(BoardError::UnknownTask(task_id.clone()));
            };
            if task.status().is(new_status) {
                return Ok(StatusChange::Unchanged);
            }
            let previous = task.status().clone();
            task.set_status(new_status);
            let generation = state.begin(task_id, Undo::Status(previous.clone()));
            (previous, generation)
        };
        debug!(task = %task_id, from = %previous, to = %new_status, "moved task");

        let patch = TaskPatch::status_only(new_status);
        match self.service.update(task_id, &patch).await {
            Ok(task) => {
                {
                    let mut state = self.write();
                    let current = state.is_current(task_id, generation);
                    state.confirm(task_id, generation);
                    if current {
                        state.replace(task.clone());
                    }
                }
                announce(
                    &*self.notifier,
                    self.config,
                    "Task updated",
                    "Task has been updated successfully",
                );
                Ok(StatusChange::Applied(task))
            }
            Err(source) => {
                let reverted = self.write().fail(task_id, generation);
                if reverted {
                    let restored = self.task(task_id).map(|task| task.status().clone());
                    warn!(task = %task_id, restored = ?restored, error = %source, "status change rolled back");
                } else {
                    warn!(task = %task_id, error = %source, "status change failed while a newer change is pending");
                }
                report_failure(&*self.notifier, "Error updating task", &source);
                Err(BoardError::Rollback {
                    task_id: task_id.clone(),
                    source,
                })
            }
        }
    }

    /// Resolves a drop through `drag` and applies the resulting move.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Self::apply_status_change`].
    pub async fn handle_drop(
        &self,
        drag: &mut DragCoordinator,
        column: TaskStatus,
    ) -> BoardResult<StatusChange> {
        let Some(transition) = drag.drop(column) else {
            return Ok(StatusChange::Unchanged);
        };
        self.apply_status_change(&transition.task_id, transition.to)
            .await
    }

    /// Deletes a task.
    ///
    /// The task leaves the board immediately. When the backend refuses, it is
    /// put back at its original position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] when the task is not on the board
    /// and [`BoardError::Rollback`] when the backend refuses the delete.
    pub async fn remove(&self, task_id: &TaskId) -> BoardResult<()> {
        let (index, generation) = {
            let mut state = self.write();
            let Some(index) = state.position(task_id) else {
                return Err(BoardError::UnknownTask(task_id.clone()));
            };
            let task = state.tasks.remove(index);
            let generation = state.begin(task_id, Undo::Reinsert { index, task });
            (index, generation)
        };
        debug!(task = %task_id, index, "removed task");

        match self.service.delete(task_id).await {
            Ok(()) => {
                self.write().confirm(task_id, generation);
                announce(
                    &*self.notifier,
                    self.config,
                    "Task deleted",
                    "Task has been deleted successfully",
                );
                Ok(())
            }
            Err(source) => {
                let restored = self.write().fail(task_id, generation);
                if restored {
                    warn!(task = %task_id, index, error = %source, "delete rolled back");
                } else {
                    warn!(task = %task_id, error = %source, "delete failed after being superseded");
                }
                report_failure(&*self.notifier, "Error deleting task", &source);
                Err(BoardError::Rollback {
                    task_id: task_id.clone(),
                    source,
                })
            }
        }
    }

    /// Replaces a task with a backend-confirmed version, superseding any
    /// optimistic change still in flight for it.
    fn adopt(&self, task: Task) {
        let task_id = task.id().clone();
        let mut state = self.write();
        if state.replace(task) {
            state.supersede(&task_id);
        }
    }

    /// Returns a copy of the board for rendering.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::new(self.read().tasks.clone())
    }

    /// Returns a copy of one task.
    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<Task> {
        self.read()
            .tasks
            .iter()
            .find(|task| task.id() == task_id)
            .cloned()
    }

    /// Returns the project the board was last loaded for.
    #[must_use]
    pub fn project_id(&self) -> Option<ProjectId> {
        self.read().project_id.clone()
    }
}

impl<S, N> SavedTaskSink for BoardController<S, N>
where
    S: TaskService,
    N: Notifier,
{
    fn upsert_from_edit_session(&self, task: Task) {
        let task_id = task.id().clone();
        let mut state = self.write();
        state.supersede(&task_id);
        match state.get_mut(&task_id) {
            Some(existing) => *existing = task,
            None => {
                debug!(task = %task_id, "added task from edit session");
                state.tasks.push(task);
            }
        }
    }
}
