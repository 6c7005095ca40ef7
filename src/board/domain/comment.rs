//! Comments attached to tasks.

use super::{BoardDomainError, CommentId, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment in a task's discussion thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author_id: UserId,
    content: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Builds a comment from its field values.
    #[must_use]
    pub const fn new(
        id: CommentId,
        task_id: TaskId,
        author_id: UserId,
        content: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            author_id,
            content,
            created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> &CommentId {
        &self.id
    }

    /// Returns the parent task.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Returns the comment text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Payload for posting a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    author_id: UserId,
    content: String,
}

impl NewComment {
    /// Creates a payload with trimmed content.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyComment`] when the content is empty
    /// after trimming.
    pub fn new(author_id: UserId, content: &str) -> Result<Self, BoardDomainError> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(BoardDomainError::EmptyComment);
        }
        Ok(Self {
            author_id,
            content: trimmed.to_owned(),
        })
    }

    /// Returns the author.
    #[must_use]
    pub const fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Returns the trimmed content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}
