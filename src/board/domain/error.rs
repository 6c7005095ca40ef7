//! Error types for board domain validation and parsing.

use thiserror::Error;

/// Errors returned while validating user-entered task and comment data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The task title is empty after trimming.
    #[error("task title is required")]
    EmptyTitle,

    /// The comment content is empty after trimming.
    #[error("comment must not be empty")]
    EmptyComment,
}

/// Error returned while parsing a task status name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
