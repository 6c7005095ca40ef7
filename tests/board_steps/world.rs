//! Shared world state for kanban board BDD scenarios.

use std::sync::Arc;

use rstest::fixture;
use taskboard::board::{
    adapters::memory::{InMemoryTaskService, RecordingNotifier},
    domain::{ProjectId, TaskStatus, UserId},
    services::{
        BoardController, BoardError, EditSessionError, StatusChange, TaskEditSession,
    },
};

/// Board type used by the BDD world.
pub type TestBoard = BoardController<InMemoryTaskService, RecordingNotifier>;

/// Edit session type used by the BDD world.
pub type TestSession = TaskEditSession<InMemoryTaskService, RecordingNotifier>;

/// Scenario world for kanban board behaviour tests.
pub struct BoardWorld {
    pub service: Arc<InMemoryTaskService>,
    pub notifier: Arc<RecordingNotifier>,
    pub board: TestBoard,
    pub session: TestSession,
    pub last_move_result: Option<Result<StatusChange, BoardError>>,
    pub last_delete_result: Option<Result<(), BoardError>>,
    pub last_save_result: Option<Result<(), EditSessionError>>,
}

impl BoardWorld {
    /// Creates a world with an empty project on the backend.
    #[must_use]
    pub fn new() -> Self {
        let service = Arc::new(InMemoryTaskService::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let board = BoardController::new(Arc::clone(&service), Arc::clone(&notifier));
        let session = TaskEditSession::new(
            Arc::clone(&service),
            Arc::clone(&notifier),
            project_id(),
            UserId::new("user-1"),
        );
        Self {
            service,
            notifier,
            board,
            session,
            last_move_result: None,
            last_delete_result: None,
            last_save_result: None,
        }
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Project every scenario works in.
#[must_use]
pub fn project_id() -> ProjectId {
    ProjectId::new("project-1")
}

/// Parses a status column name from a step.
///
/// # Errors
///
/// Returns an error if `raw` does not name a column.
pub fn parse_status(raw: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(raw).map_err(|err| eyre::eyre!("invalid status in step: {err}"))
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
