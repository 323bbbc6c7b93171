//! Notification traffic flows around board writes.

use super::helpers::{BoardFixture, board_fixture};
use rstest::rstest;
use taskhub::tracker::domain::NewComment;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_and_comment_notices_carry_rendered_context(board_fixture: BoardFixture) {
    let project = board_fixture.seed_project("Internal Tools").await;
    let task = board_fixture
        .seed_task(&project, "Ship the billing report", "sarim@nyrix.co")
        .await;

    board_fixture
        .board
        .create_comment(NewComment::new(
            task.id(),
            "huzaifa@nyrix.co",
            "@hashir numbers look off",
        ))
        .await
        .expect("comment creation should succeed");

    let sent = board_fixture.transport.sent();
    assert_eq!(sent.len(), 3);

    let assignment = sent
        .iter()
        .find(|m| m.subject.starts_with("New Task Assigned:"))
        .expect("assignment notice");
    assert_eq!(assignment.to, "sarim@nyrix.co");
    assert!(assignment.html.contains("Hello Sarim,"));
    assert!(assignment.html.contains("Internal Tools"));
    assert!(assignment.html.contains("Assigned by:</strong> Huzaifa"));

    let comment_notice = sent
        .iter()
        .find(|m| m.subject.starts_with("New Comment on Task:"))
        .expect("comment notice");
    assert_eq!(comment_notice.to, "sarim@nyrix.co");
    assert!(comment_notice.html.contains("@hashir numbers look off"));
    assert!(comment_notice.html.contains("Comment by:</strong> Huzaifa"));

    let mention_notice = sent
        .iter()
        .find(|m| m.subject.starts_with("You were tagged in a comment:"))
        .expect("mention notice");
    assert_eq!(mention_notice.to, "muhammadhashirsiddiqui2@gmail.com");
    assert!(mention_notice.html.contains("Hello Hashir,"));
    assert!(
        mention_notice
            .text
            .as_deref()
            .is_some_and(|text| text.contains("@hashir numbers look off"))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failing_transport_never_surfaces_to_the_caller(board_fixture: BoardFixture) {
    let project = board_fixture.seed_project("Internal Tools").await;
    let task = board_fixture
        .seed_task(&project, "Ship the billing report", "sarim@nyrix.co")
        .await;
    board_fixture.transport.set_failing(true);

    let comment = board_fixture
        .board
        .create_comment(NewComment::new(
            task.id(),
            "huzaifa@nyrix.co",
            "@talha are we still on track?",
        ))
        .await
        .expect("comment creation should succeed despite transport failure");

    assert_eq!(comment.tags(), ["talhaone1234@gmail.com"]);

    board_fixture.transport.set_failing(false);
    let detail = board_fixture
        .board
        .find_task_with_comments(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(detail.comments.first().map(|c| c.id()), Some(comment.id()));
}
