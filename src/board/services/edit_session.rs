//! Create, edit, and view dialog state for a single task.
//!
//! The session works on its own copy of the task's fields. Nothing reaches
//! the board until [`TaskEditSession::save`] succeeds and hands the saved
//! task to a [`SavedTaskSink`].

use super::{
    BoardConfig, SavedTaskSink,
    notify::{announce, report_failure},
};
use crate::board::{
    domain::{
        BoardDomainError, Comment, NewComment, NewTask, ProjectId, StatusValue, Task, TaskPatch,
        TaskStatus, UserId,
    },
    ports::{Notification, Notifier, TaskService, TaskServiceError},
};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Dialog mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditMode {
    /// Read-only details with the comment thread.
    View,
    /// Editing an existing task.
    Edit,
    /// Creating a new task.
    Create,
}

impl EditMode {
    /// Returns the lowercase mode name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
            Self::Create => "create",
        }
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by edit session operations.
#[derive(Debug, Error)]
pub enum EditSessionError {
    /// The working copy failed validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] BoardDomainError),

    /// The backend call failed; the session stays open.
    #[error(transparent)]
    Service(#[from] TaskServiceError),

    /// No dialog is open.
    #[error("no task dialog is open")]
    NotOpen,

    /// The operation is not available in the current mode.
    #[error("{operation} is not available in {mode} mode")]
    InvalidMode {
        /// Requested operation.
        operation: &'static str,
        /// Current mode.
        mode: EditMode,
    },

    /// The mode needs an existing task but none was given.
    #[error("{0} mode requires a task")]
    MissingTask(EditMode),
}

/// Result type for edit session operations.
pub type EditSessionResult<T> = Result<T, EditSessionError>;

/// Working copy of a task's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title as typed.
    pub title: String,
    /// Description as typed; empty means none.
    pub description: String,
    /// Selected status.
    pub status: StatusValue,
}

impl TaskDraft {
    fn empty(status: TaskStatus) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: status.into(),
        }
    }

    fn from_task(task: &Task) -> Self {
        Self {
            title: task.title().to_owned(),
            description: task.description().unwrap_or_default().to_owned(),
            status: task.status().clone(),
        }
    }

    /// Selects a status column.
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status.into();
    }

    /// Returns the fields that differ from `original`.
    #[must_use]
    pub fn diff(&self, original: &Task) -> TaskPatch {
        let mut patch = TaskPatch::new();
        if self.title.trim() != original.title() {
            patch = patch.with_title(self.title.trim());
        }
        if self.description != original.description().unwrap_or_default() {
            patch = patch.with_description(self.description.clone());
        }
        if let Some(status) = self.status.known()
            && !original.status().is(status)
        {
            patch = patch.with_status(status);
        }
        patch
    }
}

#[derive(Debug, Clone)]
struct OpenSession {
    mode: EditMode,
    task: Option<Task>,
    draft: TaskDraft,
    comments: Vec<Comment>,
}

/// Transient state of the task dialog.
pub struct TaskEditSession<S, N>
where
    S: TaskService,
    N: Notifier,
{
    service: Arc<S>,
    notifier: Arc<N>,
    config: BoardConfig,
    project_id: ProjectId,
    user_id: UserId,
    open: Option<OpenSession>,
}

impl<S, N> TaskEditSession<S, N>
where
    S: TaskService,
    N: Notifier,
{
    /// Creates a closed session acting for `user_id` inside `project_id`.
    #[must_use]
    pub fn new(service: Arc<S>, notifier: Arc<N>, project_id: ProjectId, user_id: UserId) -> Self {
        Self {
            service,
            notifier,
            config: BoardConfig::default(),
            project_id,
            user_id,
            open: None,
        }
    }

    /// Replaces the notification configuration.
    #[must_use]
    pub fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    /// Opens the dialog, discarding any session already open.
    ///
    /// Create mode starts from an empty draft in `initial_status` (or
    /// pending). Edit and view modes copy `task`'s fields. The dialog is
    /// usable as soon as this returns; view mode starts with an empty comment
    /// thread that [`Self::load_comments`] fills in.
    ///
    /// # Errors
    ///
    /// Returns [`EditSessionError::MissingTask`] when edit or view mode is
    /// requested without a task.
    pub fn open(
        &mut self,
        mode: EditMode,
        task: Option<&Task>,
        initial_status: Option<TaskStatus>,
    ) -> EditSessionResult<()> {
        self.open = None;
        let (task, draft) = match (mode, task) {
            (EditMode::Create, _) => (
                None,
                TaskDraft::empty(initial_status.unwrap_or(TaskStatus::Pending)),
            ),
            (EditMode::Edit | EditMode::View, Some(task)) => {
                (Some(task.clone()), TaskDraft::from_task(task))
            }
            (EditMode::Edit | EditMode::View, None) => {
                return Err(EditSessionError::MissingTask(mode));
            }
        };

        debug!(%mode, "opened task dialog");
        self.open = Some(OpenSession {
            mode,
            task,
            draft,
            comments: Vec::new(),
        });
        Ok(())
    }

    /// Fetches the viewed task's comment thread.
    ///
    /// Does nothing outside view mode. A failed fetch is logged and leaves
    /// the thread empty; the dialog stays open either way. Dropping the
    /// returned future abandons the fetch without affecting the dialog.
    pub async fn load_comments(&mut self) {
        let Some(task_id) = self
            .open
            .as_ref()
            .filter(|open| open.mode == EditMode::View)
            .and_then(|open| open.task.as_ref())
            .map(|task| task.id().clone())
        else {
            return;
        };

        match self.service.list_comments(&task_id).await {
            Ok(comments) => {
                if let Some(open) = self.open.as_mut() {
                    debug!(task = %task_id, count = comments.len(), "loaded comments");
                    open.comments = comments;
                }
            }
            Err(err) => {
                warn!(task = %task_id, error = %err, "failed to load comments");
            }
        }
    }

    /// Returns `true` while the dialog is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> Option<EditMode> {
        self.open.as_ref().map(|open| open.mode)
    }

    /// Returns the task the dialog was opened with.
    #[must_use]
    pub fn task(&self) -> Option<&Task> {
        self.open.as_ref().and_then(|open| open.task.as_ref())
    }

    /// Returns the working copy.
    #[must_use]
    pub fn draft(&self) -> Option<&TaskDraft> {
        self.open.as_ref().map(|open| &open.draft)
    }

    /// Returns the working copy for editing.
    ///
    /// # Errors
    ///
    /// Returns [`EditSessionError::NotOpen`] when closed and
    /// [`EditSessionError::InvalidMode`] in view mode.
    pub fn draft_mut(&mut self) -> EditSessionResult<&mut TaskDraft> {
        let open = self.open.as_mut().ok_or(EditSessionError::NotOpen)?;
        if open.mode == EditMode::View {
            return Err(EditSessionError::InvalidMode {
                operation: "editing",
                mode: open.mode,
            });
        }
        Ok(&mut open.draft)
    }

    /// Returns the loaded comment thread in chronological order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        self.open
            .as_ref()
            .map(|open| open.comments.as_slice())
            .unwrap_or_default()
    }

    /// Saves the working copy and reports the saved task to `sink`.
    ///
    /// The session stays open; the caller closes it after a successful save.
    /// In edit mode only changed fields are sent, and when nothing changed the
    /// original task is returned without a service call or a sink report.
    ///
    /// # Errors
    ///
    /// Returns [`EditSessionError::NotOpen`] or
    /// [`EditSessionError::InvalidMode`] outside create and edit modes,
    /// checked first. Then returns [`EditSessionError::Validation`] for a
    /// blank title (before any service call) and
    /// [`EditSessionError::Service`] when the backend fails.
    pub async fn save(&mut self, sink: &impl SavedTaskSink) -> EditSessionResult<Task> {
        let open = self.open.as_ref().ok_or(EditSessionError::NotOpen)?;
        match (open.mode, &open.task) {
            (EditMode::Create, _) | (EditMode::Edit, Some(_)) => {}
            (mode, _) => {
                return Err(EditSessionError::InvalidMode {
                    operation: "save",
                    mode,
                });
            }
        }
        if open.draft.title.trim().is_empty() {
            return Err(self.reject(BoardDomainError::EmptyTitle));
        }

        let saved = match (open.mode, &open.task) {
            (EditMode::Create, _) => {
                let mut new_task = NewTask::new(open.draft.title.as_str(), self.user_id.clone())?
                    .with_description(open.draft.description.clone());
                if let Some(status) = open.draft.status.known() {
                    new_task = new_task.with_status(status);
                }
                self.service
                    .create(&self.project_id, &new_task)
                    .await
                    .map(|task| (task, "Task created", "New task has been created successfully"))
            }
            (EditMode::Edit, Some(original)) => {
                let patch = open.draft.diff(original);
                if patch.is_empty() {
                    debug!(task = %original.id(), "no changes to save");
                    return Ok(original.clone());
                }
                self.service
                    .update(original.id(), &patch)
                    .await
                    .map(|task| (task, "Task updated", "Task has been updated successfully"))
            }
            (mode, _) => {
                return Err(EditSessionError::InvalidMode {
                    operation: "save",
                    mode,
                });
            }
        };

        match saved {
            Ok((task, title, description)) => {
                sink.upsert_from_edit_session(task.clone());
                announce(&*self.notifier, self.config, title, description);
                Ok(task)
            }
            Err(err) => {
                report_failure(&*self.notifier, "Error", &err);
                Err(err.into())
            }
        }
    }

    /// Posts a comment on the viewed task and appends it to the thread.
    ///
    /// Blank content is ignored and returns `Ok(None)` without a service
    /// call.
    ///
    /// # Errors
    ///
    /// Returns [`EditSessionError::Service`] when the backend fails (the
    /// thread is unchanged), and [`EditSessionError::NotOpen`] or
    /// [`EditSessionError::InvalidMode`] outside view mode.
    pub async fn add_comment(&mut self, content: &str) -> EditSessionResult<Option<Comment>> {
        let open = self.open.as_ref().ok_or(EditSessionError::NotOpen)?;
        let Some(task) = open.task.as_ref().filter(|_| open.mode == EditMode::View) else {
            return Err(EditSessionError::InvalidMode {
                operation: "commenting",
                mode: open.mode,
            });
        };
        let Ok(comment) = NewComment::new(self.user_id.clone(), content) else {
            return Ok(None);
        };

        match self.service.add_comment(task.id(), &comment).await {
            Ok(stored) => {
                if let Some(open) = self.open.as_mut() {
                    open.comments.push(stored.clone());
                }
                announce(
                    &*self.notifier,
                    self.config,
                    "Comment added",
                    "Your comment has been added successfully",
                );
                Ok(Some(stored))
            }
            Err(err) => {
                warn!(task = %task.id(), error = %err, "failed to add comment");
                self.notifier
                    .notify(Notification::error("Error", "Failed to add comment"));
                Err(err.into())
            }
        }
    }

    /// Discards the working copy and comment thread. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.open.take().is_some() {
            debug!("closed task dialog");
        }
    }

    fn reject(&self, err: BoardDomainError) -> EditSessionError {
        if self.config.notify_validation_errors {
            self.notifier
                .notify(Notification::error("Validation Error", err.to_string()));
        }
        EditSessionError::Validation(err)
    }
}
