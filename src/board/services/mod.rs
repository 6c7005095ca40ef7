//! Board services: the controller, drag coordination, and the edit dialog.

mod config;
mod controller;
mod drag;
mod edit_session;
mod notify;
mod partition;
mod snapshot;

pub use config::BoardConfig;
pub use controller::{BoardController, BoardError, BoardResult, SavedTaskSink, StatusChange};
pub use drag::{DragCoordinator, StatusTransition};
pub use edit_session::{EditMode, EditSessionError, EditSessionResult, TaskDraft, TaskEditSession};
pub use partition::{ColumnPartition, partition_by_status};
pub use snapshot::BoardSnapshot;
