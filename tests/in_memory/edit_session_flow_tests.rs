//! In-memory integration tests for the task dialog.

use std::sync::Arc;

use super::helpers::{
    BoardHarness, board_ids, loaded_harness, network_error, project_id, stored_task, user_id,
};
use chrono::{DateTime, Utc};
use taskboard::board::{
    adapters::memory::{InMemoryTaskService, RecordingNotifier, ServiceOperation},
    domain::{Comment, CommentId, TaskId, TaskStatus},
    services::{EditMode, EditSessionError, TaskEditSession},
};

type TestSession = TaskEditSession<InMemoryTaskService, RecordingNotifier>;

fn session_for(harness: &BoardHarness) -> TestSession {
    TaskEditSession::new(
        Arc::clone(&harness.service),
        Arc::clone(&harness.notifier),
        project_id(),
        user_id(),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn created_task_lands_in_chosen_column() -> Result<(), eyre::Report> {
    let harness = loaded_harness(vec![stored_task("1", "Existing", TaskStatus::Pending)]).await?;
    let mut session = session_for(&harness);

    session.open(EditMode::Create, None, Some(TaskStatus::Cancelled))?;
    let draft = session.draft_mut()?;
    draft.title = "  Retire old API  ".to_owned();
    draft.description = "Announce first".to_owned();
    let created = session.save(&harness.board).await?;
    session.close();

    eyre::ensure!(created.title() == "Retire old API", "title is trimmed");
    eyre::ensure!(created.description() == Some("Announce first"), "description kept");
    let snapshot = harness.board.snapshot();
    let columns = snapshot.columns();
    eyre::ensure!(columns.count(TaskStatus::Cancelled) == 1, "new card in cancelled");
    eyre::ensure!(board_ids(&harness.board).len() == 2, "board grew by one");
    eyre::ensure!(
        harness.service.stored_task(created.id()).is_some(),
        "backend stored the task"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn empty_title_never_reaches_backend() -> Result<(), eyre::Report> {
    let harness = loaded_harness(Vec::new()).await?;
    let mut session = session_for(&harness);

    session.open(EditMode::Create, None, None)?;
    let result = session.save(&harness.board).await;

    eyre::ensure!(
        matches!(result, Err(EditSessionError::Validation(_))),
        "expected validation error, got {result:?}"
    );
    eyre::ensure!(
        harness.service.call_count(ServiceOperation::Create) == 0,
        "create must not be called"
    );
    eyre::ensure!(session.is_open(), "dialog stays open");
    eyre::ensure!(harness.board.snapshot().is_empty(), "board unchanged");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn edited_task_replaces_board_copy_in_place() -> Result<(), eyre::Report> {
    let harness = loaded_harness(vec![
        stored_task("a", "First", TaskStatus::Pending),
        stored_task("b", "Second", TaskStatus::Pending),
    ])
    .await?;
    let original = harness
        .board
        .task(&TaskId::new("a"))
        .ok_or_else(|| eyre::eyre!("seeded task missing from board"))?;
    let mut session = session_for(&harness);

    session.open(EditMode::Edit, Some(&original), None)?;
    session.draft_mut()?.set_status(TaskStatus::InProgress);
    session.save(&harness.board).await?;

    eyre::ensure!(board_ids(&harness.board) == ["a", "b"], "order preserved");
    let updated = harness
        .board
        .task(&TaskId::new("a"))
        .ok_or_else(|| eyre::eyre!("edited task missing from board"))?;
    eyre::ensure!(updated.status().is(TaskStatus::InProgress), "status saved");
    eyre::ensure!(updated.title() == "First", "title untouched");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_save_leaves_board_untouched() -> Result<(), eyre::Report> {
    let harness = loaded_harness(vec![stored_task("a", "First", TaskStatus::Pending)]).await?;
    harness
        .service
        .fail_next(ServiceOperation::Update, network_error())?;
    let original = harness
        .board
        .task(&TaskId::new("a"))
        .ok_or_else(|| eyre::eyre!("seeded task missing from board"))?;
    let mut session = session_for(&harness);

    session.open(EditMode::Edit, Some(&original), None)?;
    session.draft_mut()?.title = "Renamed".to_owned();
    let result = session.save(&harness.board).await;

    eyre::ensure!(
        matches!(result, Err(EditSessionError::Service(_))),
        "expected service error, got {result:?}"
    );
    eyre::ensure!(session.is_open(), "dialog stays open for retry");
    eyre::ensure!(
        harness.board.task(&TaskId::new("a")) == Some(original),
        "board copy unchanged"
    );

    let retried = session.save(&harness.board).await?;
    eyre::ensure!(retried.title() == "Renamed", "retry succeeds");
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn comment_thread_loads_and_grows() -> Result<(), eyre::Report> {
    let harness = loaded_harness(vec![stored_task("a", "First", TaskStatus::Pending)]).await?;
    harness.service.seed_comment(Comment::new(
        CommentId::new("c1"),
        TaskId::new("a"),
        user_id(),
        "Started".to_owned(),
        DateTime::<Utc>::UNIX_EPOCH,
    ))?;
    let viewed = harness
        .board
        .task(&TaskId::new("a"))
        .ok_or_else(|| eyre::eyre!("seeded task missing from board"))?;
    let mut session = session_for(&harness);

    session.open(EditMode::View, Some(&viewed), None)?;
    session.load_comments().await;
    session.add_comment("Halfway there").await?;
    session.add_comment("   ").await?;

    let contents: Vec<&str> = session.comments().iter().map(Comment::content).collect();
    eyre::ensure!(contents == ["Started", "Halfway there"], "thread {contents:?}");
    eyre::ensure!(
        harness.service.call_count(ServiceOperation::AddComment) == 1,
        "blank comment must not be posted"
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn comment_fetch_failure_still_opens_view() -> Result<(), eyre::Report> {
    let harness = loaded_harness(vec![stored_task("a", "First", TaskStatus::Pending)]).await?;
    harness
        .service
        .fail_next(ServiceOperation::ListComments, network_error())?;
    let viewed = harness
        .board
        .task(&TaskId::new("a"))
        .ok_or_else(|| eyre::eyre!("seeded task missing from board"))?;
    let mut session = session_for(&harness);

    session.open(EditMode::View, Some(&viewed), None)?;
    session.load_comments().await;

    eyre::ensure!(session.mode() == Some(EditMode::View), "view is open");
    eyre::ensure!(session.comments().is_empty(), "empty thread");
    Ok(())
}
