//! Opaque identifier types for the board domain.
//!
//! Identifiers are issued by the backend and are only ever compared for
//! equality, so each one wraps the raw string unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a backend-issued identifier.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Returns the identifier as `str`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

opaque_id!(
    /// Identifier of a task, stable for the task's lifetime.
    TaskId
);

opaque_id!(
    /// Identifier of the project whose tasks a board shows.
    ProjectId
);

opaque_id!(
    /// Identifier of a user (task creator, assignee, or comment author).
    UserId
);

opaque_id!(
    /// Identifier of a comment on a task.
    CommentId
);
