//! In-memory adapters used by tests and demos.

mod notifier;
mod task_service;

pub use notifier::RecordingNotifier;
pub use task_service::{InMemoryTaskService, ServiceOperation};
