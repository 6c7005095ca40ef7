//! Port contracts for the task board.
//!
//! Ports define the collaborators the board consumes; adapters implement
//! them and are injected into the board services.

pub mod notifier;
pub mod task_service;

pub use notifier::{Notification, Notifier, Severity};
pub use task_service::{TaskService, TaskServiceError, TaskServiceResult};

#[cfg(test)]
pub use notifier::MockNotifier;
#[cfg(test)]
pub use task_service::MockTaskService;
