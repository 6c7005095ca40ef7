//! In-memory task backend for tests and offline demos.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::{Arc, RwLock, RwLockWriteGuard};
use uuid::Uuid;

use crate::board::{
    domain::{
        Comment, CommentId, NewComment, NewTask, ProjectId, Task, TaskData, TaskId, TaskPatch,
        TaskStatus, UserId,
    },
    ports::{TaskService, TaskServiceError, TaskServiceResult},
};

/// Task service operations, used to inject failures and count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceOperation {
    /// [`TaskService::list`].
    List,
    /// [`TaskService::create`].
    Create,
    /// [`TaskService::update`].
    Update,
    /// [`TaskService::delete`].
    Delete,
    /// [`TaskService::assign`].
    Assign,
    /// [`TaskService::list_comments`].
    ListComments,
    /// [`TaskService::add_comment`].
    AddComment,
}

/// Thread-safe in-memory task service.
///
/// Behaves like the REST backend: unknown projects and tasks yield
/// [`TaskServiceError::NotFound`], and every write returns the stored value.
pub struct InMemoryTaskService<C = DefaultClock> {
    state: Arc<RwLock<ServiceState>>,
    clock: Arc<C>,
}

impl<C> Clone for InMemoryTaskService<C> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> fmt::Debug for InMemoryTaskService<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryTaskService")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
struct ServiceState {
    projects: HashSet<ProjectId>,
    tasks: Vec<Task>,
    comments: Vec<Comment>,
    failures: HashMap<ServiceOperation, VecDeque<TaskServiceError>>,
    calls: HashMap<ServiceOperation, usize>,
}

impl ServiceState {
    /// Counts the call and returns an injected failure, if one is queued.
    fn record(&mut self, operation: ServiceOperation) -> TaskServiceResult<()> {
        *self.calls.entry(operation).or_default() += 1;
        match self
            .failures
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn task_mut(&mut self, task_id: &TaskId) -> TaskServiceResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|task| task.id() == task_id)
            .ok_or_else(|| TaskServiceError::NotFound(format!("task {task_id}")))
    }

    fn require_task(&self, task_id: &TaskId) -> TaskServiceResult<()> {
        if self.tasks.iter().any(|task| task.id() == task_id) {
            Ok(())
        } else {
            Err(TaskServiceError::NotFound(format!("task {task_id}")))
        }
    }
}

impl InMemoryTaskService<DefaultClock> {
    /// Creates an empty service using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }
}

impl Default for InMemoryTaskService<DefaultClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> InMemoryTaskService<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty service stamping new records with `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(ServiceState::default())),
            clock,
        }
    }

    fn write(&self) -> TaskServiceResult<RwLockWriteGuard<'_, ServiceState>> {
        self.state.write().map_err(|err| {
            TaskServiceError::network(std::io::Error::other(err.to_string()))
        })
    }

    /// Registers a project so that it can be listed and receive tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Network`] when the state lock is poisoned.
    pub fn add_project(&self, project_id: ProjectId) -> TaskServiceResult<()> {
        self.write()?.projects.insert(project_id);
        Ok(())
    }

    /// Stores an existing task, registering its project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Network`] when the state lock is poisoned.
    pub fn seed_task(&self, task: Task) -> TaskServiceResult<()> {
        let mut state = self.write()?;
        state.projects.insert(task.project_id().clone());
        state.tasks.push(task);
        Ok(())
    }

    /// Stores an existing comment.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Network`] when the state lock is poisoned.
    pub fn seed_comment(&self, comment: Comment) -> TaskServiceResult<()> {
        self.write()?.comments.push(comment);
        Ok(())
    }

    /// Makes the next call of `operation` fail with `err`.
    ///
    /// Failures queue up: each call consumes one.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Network`] when the state lock is poisoned.
    pub fn fail_next(
        &self,
        operation: ServiceOperation,
        err: TaskServiceError,
    ) -> TaskServiceResult<()> {
        self.write()?
            .failures
            .entry(operation)
            .or_default()
            .push_back(err);
        Ok(())
    }

    /// Returns how many times `operation` has been called.
    #[must_use]
    pub fn call_count(&self, operation: ServiceOperation) -> usize {
        self.state
            .read()
            .map(|state| state.calls.get(&operation).copied().unwrap_or_default())
            .unwrap_or_default()
    }

    /// Returns the stored task with `task_id`.
    #[must_use]
    pub fn stored_task(&self, task_id: &TaskId) -> Option<Task> {
        self.state.read().ok().and_then(|state| {
            state
                .tasks
                .iter()
                .find(|task| task.id() == task_id)
                .cloned()
        })
    }
}

#[async_trait]
impl<C> TaskService for InMemoryTaskService<C>
where
    C: Clock + Send + Sync,
{
    async fn list(&self, project_id: &ProjectId) -> TaskServiceResult<Vec<Task>> {
        let mut state = self.write()?;
        state.record(ServiceOperation::List)?;
        if !state.projects.contains(project_id) {
            return Err(TaskServiceError::NotFound(format!("project {project_id}")));
        }
        Ok(state
            .tasks
            .iter()
            .filter(|task| task.project_id() == project_id)
            .cloned()
            .collect())
    }

    async fn create(&self, project_id: &ProjectId, task: &NewTask) -> TaskServiceResult<Task> {
        let mut state = self.write()?;
        state.record(ServiceOperation::Create)?;
        if !state.projects.contains(project_id) {
            return Err(TaskServiceError::NotFound(format!("project {project_id}")));
        }
        let created = Task::from_data(TaskData {
            id: TaskId::new(Uuid::new_v4().to_string()),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status().unwrap_or(TaskStatus::Pending).into(),
            project_id: project_id.clone(),
            creator_id: task.creator_id().clone(),
            assignee_id: None,
            created_at: self.clock.utc(),
        });
        state.tasks.push(created.clone());
        Ok(created)
    }

    async fn update(&self, task_id: &TaskId, patch: &TaskPatch) -> TaskServiceResult<Task> {
        let mut state = self.write()?;
        state.record(ServiceOperation::Update)?;
        let task = state.task_mut(task_id)?;
        task.apply_patch(patch);
        Ok(task.clone())
    }

    async fn delete(&self, task_id: &TaskId) -> TaskServiceResult<()> {
        let mut state = self.write()?;
        state.record(ServiceOperation::Delete)?;
        state.require_task(task_id)?;
        state.tasks.retain(|task| task.id() != task_id);
        state.comments.retain(|comment| comment.task_id() != task_id);
        Ok(())
    }

    async fn assign(&self, task_id: &TaskId, assignee_id: &UserId) -> TaskServiceResult<Task> {
        let mut state = self.write()?;
        state.record(ServiceOperation::Assign)?;
        let task = state.task_mut(task_id)?;
        task.assign(assignee_id.clone());
        Ok(task.clone())
    }

    async fn list_comments(&self, task_id: &TaskId) -> TaskServiceResult<Vec<Comment>> {
        let mut state = self.write()?;
        state.record(ServiceOperation::ListComments)?;
        state.require_task(task_id)?;
        Ok(state
            .comments
            .iter()
            .filter(|comment| comment.task_id() == task_id)
            .cloned()
            .collect())
    }

    async fn add_comment(
        &self,
        task_id: &TaskId,
        comment: &NewComment,
    ) -> TaskServiceResult<Comment> {
        let mut state = self.write()?;
        state.record(ServiceOperation::AddComment)?;
        state.require_task(task_id)?;
        let stored = Comment::new(
            CommentId::new(Uuid::new_v4().to_string()),
            task_id.clone(),
            comment.author_id().clone(),
            comment.content().to_owned(),
            self.clock.utc(),
        );
        state.comments.push(stored.clone());
        Ok(stored)
    }
}
