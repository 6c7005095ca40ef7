//! Domain model for the task board.
//!
//! Tasks, comments, and the status values that double as board columns.
//! Nothing here performs I/O.

mod comment;
mod error;
mod ids;
mod status;
mod task;

pub use comment::{Comment, NewComment};
pub use error::{BoardDomainError, ParseTaskStatusError};
pub use ids::{CommentId, ProjectId, TaskId, UserId};
pub use status::{StatusValue, TaskStatus};
pub use task::{NewTask, Task, TaskData, TaskPatch};
