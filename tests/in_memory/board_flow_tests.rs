//! In-memory integration tests for board loading and optimistic moves.

use super::helpers::{board_ids, loaded_harness, network_error, project_id, stored_task};
use taskboard::board::{
    adapters::memory::ServiceOperation,
    domain::{ProjectId, StatusValue, TaskId, TaskPatch, TaskStatus, UserId},
    ports::Severity,
    services::{BoardError, DragCoordinator, StatusChange},
};

#[tokio::test(flavor = "multi_thread")]
async fn load_partitions_backend_tasks_into_columns() -> Result<(), eyre::Report> {
    let harness = loaded_harness(vec![
        stored_task("1", "Plan", TaskStatus::Pending),
        stored_task("2", "Build", TaskStatus::InProgress),
        stored_task("3", "Ship", TaskStatus::Completed),
        stored_task("4", "Triage", StatusValue::Unrecognized("blocked".to_owned())),
    ])
    .await?;

    let snapshot = harness.board.snapshot();
    let columns = snapshot.columns();

    eyre::ensure!(columns.count(TaskStatus::Pending) == 1, "pending count");
    eyre::ensure!(columns.count(TaskStatus::InProgress) == 1, "in-progress count");
    eyre::ensure!(columns.count(TaskStatus::Completed) == 1, "completed count");
    eyre::ensure!(columns.count(TaskStatus::Cancelled) == 0, "cancelled count");
    eyre::ensure!(columns.unrecognized().len() == 1, "unrecognized bucket");
    eyre::ensure!(harness.board.project_id() == Some(project_id()), "project id");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn loading_unknown_project_keeps_board_empty() -> Result<(), eyre::Report> {
    let harness = loaded_harness(Vec::new()).await?;

    let result = harness.board.load(ProjectId::new("missing")).await;

    eyre::ensure!(
        matches!(result, Err(BoardError::Load { .. })),
        "expected load error, got {result:?}"
    );
    eyre::ensure!(
        harness.notifier.with_severity(Severity::Error).len() == 1,
        "load failure should be reported"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn drag_and_drop_persists_new_status() -> Result<(), eyre::Report> {
    let harness = loaded_harness(vec![stored_task("1", "Plan", TaskStatus::Pending)]).await?;
    let task = harness
        .board
        .task(&TaskId::new("1"))
        .ok_or_else(|| eyre::eyre!("seeded task missing from board"))?;
    let mut drag = DragCoordinator::new();

    drag.begin_drag(&task);
    drag.hover(TaskStatus::Completed);
    let change = harness
        .board
        .handle_drop(&mut drag, TaskStatus::Completed)
        .await?;

    eyre::ensure!(
        matches!(change, StatusChange::Applied(_)),
        "expected an applied move"
    );
    let stored = harness
        .service
        .stored_task(&TaskId::new("1"))
        .ok_or_else(|| eyre::eyre!("task missing from backend"))?;
    eyre::ensure!(stored.status().is(TaskStatus::Completed), "backend status");
    eyre::ensure!(!drag.is_active(), "drag should be settled");
    eyre::ensure!(
        harness.notifier.last().map(|n| n.title) == Some("Task updated".to_owned()),
        "success toast"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_move_reverts_card() -> Result<(), eyre::Report> {
    let harness = loaded_harness(vec![stored_task("1", "Plan", TaskStatus::Pending)]).await?;
    harness
        .service
        .fail_next(ServiceOperation::Update, network_error())?;

    let result = harness
        .board
        .apply_status_change(&TaskId::new("1"), TaskStatus::Completed)
        .await;

    eyre::ensure!(
        matches!(result, Err(BoardError::Rollback { .. })),
        "expected rollback, got {result:?}"
    );
    let snapshot = harness.board.snapshot();
    let columns = snapshot.columns();
    eyre::ensure!(columns.count(TaskStatus::Pending) == 1, "card back in origin");
    eyre::ensure!(columns.count(TaskStatus::Completed) == 0, "card left target");
    eyre::ensure!(
        harness.notifier.last().map(|n| n.title) == Some("Error updating task".to_owned()),
        "failure toast"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn dropping_on_origin_column_sends_nothing() -> Result<(), eyre::Report> {
    let harness = loaded_harness(vec![stored_task("1", "Plan", TaskStatus::InProgress)]).await?;
    let task = harness
        .board
        .task(&TaskId::new("1"))
        .ok_or_else(|| eyre::eyre!("seeded task missing from board"))?;
    let mut drag = DragCoordinator::new();

    drag.begin_drag(&task);
    let change = harness
        .board
        .handle_drop(&mut drag, TaskStatus::InProgress)
        .await?;

    eyre::ensure!(change == StatusChange::Unchanged, "expected no change");
    eyre::ensure!(
        harness.service.call_count(ServiceOperation::Update) == 0,
        "no update call expected"
    );
    eyre::ensure!(harness.notifier.notifications().is_empty(), "no toast");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_delete_restores_original_position() -> Result<(), eyre::Report> {
    let harness = loaded_harness(vec![
        stored_task("a", "First", TaskStatus::Pending),
        stored_task("b", "Second", TaskStatus::Pending),
        stored_task("c", "Third", TaskStatus::Pending),
    ])
    .await?;
    harness
        .service
        .fail_next(ServiceOperation::Delete, network_error())?;

    let result = harness.board.remove(&TaskId::new("b")).await;

    eyre::ensure!(
        matches!(result, Err(BoardError::Rollback { .. })),
        "expected rollback, got {result:?}"
    );
    eyre::ensure!(board_ids(&harness.board) == ["a", "b", "c"], "order restored");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_removes_task_from_board_and_backend() -> Result<(), eyre::Report> {
    let harness = loaded_harness(vec![
        stored_task("a", "First", TaskStatus::Pending),
        stored_task("b", "Second", TaskStatus::Completed),
    ])
    .await?;

    harness.board.remove(&TaskId::new("a")).await?;

    eyre::ensure!(board_ids(&harness.board) == ["b"], "board after delete");
    eyre::ensure!(
        harness.service.stored_task(&TaskId::new("a")).is_none(),
        "backend after delete"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn field_update_and_assignment_reach_board() -> Result<(), eyre::Report> {
    let harness = loaded_harness(vec![stored_task("1", "Plan", TaskStatus::Pending)]).await?;
    let id = TaskId::new("1");

    harness
        .board
        .apply_update(&id, &TaskPatch::new().with_title("Plan sprint"))
        .await?;
    harness.board.assign(&id, &UserId::new("user-2")).await?;

    let task = harness
        .board
        .task(&id)
        .ok_or_else(|| eyre::eyre!("task missing from board"))?;
    eyre::ensure!(task.title() == "Plan sprint", "title updated");
    eyre::ensure!(
        task.assignee_id() == Some(&UserId::new("user-2")),
        "assignee updated"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn unrecognized_task_can_be_dragged_into_a_column() -> Result<(), eyre::Report> {
    let harness = loaded_harness(vec![stored_task(
        "1",
        "Triage",
        StatusValue::Unrecognized("blocked".to_owned()),
    )])
    .await?;

    harness
        .board
        .apply_status_change(&TaskId::new("1"), TaskStatus::Pending)
        .await?;

    let snapshot = harness.board.snapshot();
    let columns = snapshot.columns();
    eyre::ensure!(columns.unrecognized().is_empty(), "bucket emptied");
    eyre::ensure!(columns.count(TaskStatus::Pending) == 1, "moved into pending");
    Ok(())
}
