//! Referential integrity and cascade deletion tests.

use super::helpers::{PostgresCluster, postgres_cluster, store_context};
use mockable::DefaultClock;
use rstest::rstest;
use taskhub::tracker::domain::{
    Comment, NewComment, NewProject, NewTask, Project, ProjectId, Task,
};
use taskhub::tracker::ports::{
    CommentRepository, ProjectRepository, TaskRepository, TrackerRepositoryError,
};

fn seed_board(
    context: &super::helpers::StoreContext,
    clock: &DefaultClock,
) -> (Project, Task, Comment) {
    let project = Project::new(NewProject::new("Internal Tools"), clock)
        .expect("project creation should succeed");
    context
        .rt
        .block_on(context.store.insert_project(&project))
        .expect("project insert should succeed");

    let task = Task::new(
        NewTask::new(
            project.id(),
            "Ship the billing report",
            "sarim@nyrix.co",
            "Huzaifa",
        ),
        clock,
    )
    .expect("task creation should succeed");
    context
        .rt
        .block_on(context.store.insert_task(&task))
        .expect("task insert should succeed");

    let comment = Comment::new(
        NewComment::new(task.id(), "huzaifa@nyrix.co", "progress?"),
        Vec::new(),
        clock,
    )
    .expect("comment creation should succeed");
    context
        .rt
        .block_on(context.store.insert_comment(&comment))
        .expect("comment insert should succeed");

    (project, task, comment)
}

#[rstest]
fn task_insert_requires_an_existing_project(postgres_cluster: Option<PostgresCluster>) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let context = store_context(cluster);
    let clock = DefaultClock;

    let orphan = Task::new(
        NewTask::new(ProjectId::new(), "Orphan task", "sarim@nyrix.co", "Huzaifa"),
        &clock,
    )
    .expect("task creation should succeed");
    let result = context.rt.block_on(context.store.insert_task(&orphan));

    assert!(matches!(
        result,
        Err(TrackerRepositoryError::MissingProject(_))
    ));

    context.cleanup();
}

#[rstest]
fn comment_insert_requires_an_existing_task(postgres_cluster: Option<PostgresCluster>) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let context = store_context(cluster);
    let clock = DefaultClock;

    let orphan = Comment::new(
        NewComment::new(
            taskhub::tracker::domain::TaskId::new(),
            "huzaifa@nyrix.co",
            "lost words",
        ),
        Vec::new(),
        &clock,
    )
    .expect("comment creation should succeed");
    let result = context.rt.block_on(context.store.insert_comment(&orphan));

    assert!(matches!(result, Err(TrackerRepositoryError::MissingTask(_))));

    context.cleanup();
}

#[rstest]
fn deleting_a_project_cascades_to_tasks_and_comments(postgres_cluster: Option<PostgresCluster>) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let context = store_context(cluster);
    let clock = DefaultClock;
    let (project, task, _comment) = seed_board(&context, &clock);

    let deleted = context
        .rt
        .block_on(context.store.delete_project(project.id()))
        .expect("project deletion should succeed");
    assert!(deleted);

    let task_after = context
        .rt
        .block_on(context.store.find_task(task.id()))
        .expect("task lookup should succeed");
    assert!(task_after.is_none());

    let comments_after = context
        .rt
        .block_on(context.store.comments_for_task(task.id()))
        .expect("comment lookup should succeed");
    assert!(comments_after.is_empty());

    context.cleanup();
}

#[rstest]
fn deleting_a_task_cascades_to_its_comments(postgres_cluster: Option<PostgresCluster>) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let context = store_context(cluster);
    let clock = DefaultClock;
    let (project, task, _comment) = seed_board(&context, &clock);

    let deleted = context
        .rt
        .block_on(context.store.delete_task(task.id()))
        .expect("task deletion should succeed");
    assert!(deleted);

    let comments_after = context
        .rt
        .block_on(context.store.list_comments())
        .expect("comment listing should succeed");
    assert!(comments_after.is_empty());

    let project_after = context
        .rt
        .block_on(context.store.find_project(project.id()))
        .expect("project lookup should succeed");
    assert!(project_after.is_some());

    context.cleanup();
}

#[rstest]
fn deleting_missing_rows_returns_false(postgres_cluster: Option<PostgresCluster>) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let context = store_context(cluster);

    let deleted = context
        .rt
        .block_on(context.store.delete_project(ProjectId::new()))
        .expect("deletion call should succeed");
    assert!(!deleted);

    context.cleanup();
}
