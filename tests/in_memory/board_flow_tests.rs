//! Entity lifecycle and view composition flows over the in-memory store.

use super::helpers::{BoardFixture, board_fixture};
use rstest::rstest;
use taskhub::tracker::domain::{NewComment, ProjectPatch, ProjectStatus, TaskPatch, TaskStatus};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_board_round_trip(board_fixture: BoardFixture) {
    let project = board_fixture.seed_project("Internal Tools").await;
    let billing = board_fixture
        .seed_task(&project, "Ship the billing report", "sarim@nyrix.co")
        .await;
    let keys = board_fixture
        .seed_task(&project, "Rotate the API keys", "talhaone1234@gmail.com")
        .await;

    let comment = board_fixture
        .board
        .create_comment(NewComment::new(
            billing.id(),
            "huzaifa@nyrix.co",
            "@sarim first draft is up",
        ))
        .await
        .expect("comment creation should succeed");

    let view = board_fixture
        .board
        .list_tasks_with_comments()
        .await
        .expect("listing should succeed");

    assert_eq!(view.len(), 2);
    let task_ids: Vec<_> = view.iter().map(|entry| entry.task.id()).collect();
    assert_eq!(task_ids, [keys.id(), billing.id()]);

    let billing_entry = view
        .iter()
        .find(|entry| entry.task.id() == billing.id())
        .expect("billing task should be present");
    assert_eq!(
        billing_entry.comments.first().map(|c| c.id()),
        Some(comment.id())
    );
    assert_eq!(billing_entry.comments.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_updates_flow_through_the_view(board_fixture: BoardFixture) {
    let project = board_fixture.seed_project("Internal Tools").await;
    let task = board_fixture
        .seed_task(&project, "Ship the billing report", "sarim@nyrix.co")
        .await;

    board_fixture
        .board
        .update_task(
            task.id(),
            TaskPatch::new().with_status(TaskStatus::InProgress),
        )
        .await
        .expect("status update should succeed");
    board_fixture
        .board
        .update_project(
            project.id(),
            ProjectPatch::new().with_status(ProjectStatus::OnHold),
        )
        .await
        .expect("project update should succeed");

    let view = board_fixture
        .board
        .list_tasks_with_comments()
        .await
        .expect("listing should succeed");
    assert_eq!(
        view.first().map(|entry| entry.task.status()),
        Some(TaskStatus::InProgress)
    );

    let projects = board_fixture
        .board
        .list_projects()
        .await
        .expect("listing should succeed");
    assert_eq!(
        projects.first().map(taskhub::tracker::domain::Project::status),
        Some(ProjectStatus::OnHold)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn project_deletion_cascades_through_every_read(board_fixture: BoardFixture) {
    let project = board_fixture.seed_project("Doomed").await;
    let task = board_fixture
        .seed_task(&project, "Never finished", "sarim@nyrix.co")
        .await;
    board_fixture
        .board
        .create_comment(NewComment::new(task.id(), "huzaifa@nyrix.co", "progress?"))
        .await
        .expect("comment creation should succeed");

    let deleted = board_fixture
        .board
        .delete_project(project.id())
        .await
        .expect("deletion should succeed");
    assert!(deleted);

    assert!(
        board_fixture
            .board
            .list_projects()
            .await
            .expect("listing should succeed")
            .is_empty()
    );
    assert!(
        board_fixture
            .board
            .list_tasks_with_comments()
            .await
            .expect("listing should succeed")
            .is_empty()
    );
    assert!(
        board_fixture
            .board
            .find_task_with_comments(task.id())
            .await
            .expect("lookup should succeed")
            .is_none()
    );
}
