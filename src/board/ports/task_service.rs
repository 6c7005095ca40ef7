//! Task Service port: CRUD over a project's tasks and their comments.

use crate::board::domain::{
    Comment, NewComment, NewTask, ProjectId, Task, TaskId, TaskPatch, UserId,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Remote task backend contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Lists every task of a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the project does not exist
    /// or [`TaskServiceError::Network`] when the request fails.
    async fn list(&self, project_id: &ProjectId) -> TaskServiceResult<Vec<Task>>;

    /// Creates a task inside a project and returns the stored task.
    async fn create(&self, project_id: &ProjectId, task: &NewTask) -> TaskServiceResult<Task>;

    /// Applies a partial update and returns the full canonical task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist.
    async fn update(&self, task_id: &TaskId, patch: &TaskPatch) -> TaskServiceResult<Task>;

    /// Deletes a task.
    async fn delete(&self, task_id: &TaskId) -> TaskServiceResult<()>;

    /// Assigns a task to a user and returns the updated task.
    async fn assign(&self, task_id: &TaskId, assignee_id: &UserId) -> TaskServiceResult<Task>;

    /// Lists a task's comments in chronological order.
    async fn list_comments(&self, task_id: &TaskId) -> TaskServiceResult<Vec<Comment>>;

    /// Posts a comment and returns the stored comment.
    async fn add_comment(
        &self,
        task_id: &TaskId,
        comment: &NewComment,
    ) -> TaskServiceResult<Comment>;
}

/// Errors returned by task service implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskServiceError {
    /// The addressed project, task, or comment does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend refused the request.
    #[error("{0}")]
    Rejected(String),

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskServiceError {
    /// Wraps a transport error.
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Network(Arc::new(err))
    }
}
