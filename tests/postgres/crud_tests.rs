//! Basic CRUD operation tests for the `PostgreSQL` tracker store.

use super::helpers::{PostgresCluster, postgres_cluster, store_context};
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::rstest;
use taskhub::tracker::domain::{
    Comment, NewComment, NewProject, NewTask, Project, ProjectStatus, Task, TaskId, TaskPriority,
    TaskStatus,
};
use taskhub::tracker::ports::{
    CommentRepository, ProjectRepository, TaskRepository, TrackerRepositoryError,
};

fn seed_project(clock: &DefaultClock) -> Project {
    Project::new(
        NewProject::new("Internal Tools").with_status(ProjectStatus::Active),
        clock,
    )
    .expect("project creation should succeed")
}

#[rstest]
fn task_fields_round_trip_through_storage(postgres_cluster: Option<PostgresCluster>) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let context = store_context(cluster);
    let clock = DefaultClock;

    let project = seed_project(&clock);
    context
        .rt
        .block_on(context.store.insert_project(&project))
        .expect("project insert should succeed");

    let deadline = NaiveDate::from_ymd_opt(2026, 8, 14).expect("valid date");
    let task = Task::new(
        NewTask::new(
            project.id(),
            "Ship the billing report",
            "sarim@nyrix.co",
            "Huzaifa",
        )
        .with_description("Q3 numbers")
        .with_status(TaskStatus::InProgress)
        .with_priority(TaskPriority::Urgent)
        .with_deadline(deadline),
        &clock,
    )
    .expect("task creation should succeed");
    context
        .rt
        .block_on(context.store.insert_task(&task))
        .expect("task insert should succeed");

    let fetched = context
        .rt
        .block_on(context.store.find_task(task.id()))
        .expect("task lookup should succeed")
        .expect("task should exist");

    assert_eq!(fetched.id(), task.id());
    assert_eq!(fetched.project_id(), project.id());
    assert_eq!(fetched.title(), "Ship the billing report");
    assert_eq!(fetched.description(), "Q3 numbers");
    assert_eq!(fetched.status(), TaskStatus::InProgress);
    assert_eq!(fetched.priority(), TaskPriority::Urgent);
    assert_eq!(fetched.assigned_to(), "sarim@nyrix.co");
    assert_eq!(fetched.deadline(), Some(deadline));

    context.cleanup();
}

#[rstest]
fn comment_tags_round_trip_through_jsonb(postgres_cluster: Option<PostgresCluster>) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let context = store_context(cluster);
    let clock = DefaultClock;

    let project = seed_project(&clock);
    context
        .rt
        .block_on(context.store.insert_project(&project))
        .expect("project insert should succeed");
    let task = Task::new(
        NewTask::new(project.id(), "Review deck", "sarim@nyrix.co", "Huzaifa"),
        &clock,
    )
    .expect("task creation should succeed");
    context
        .rt
        .block_on(context.store.insert_task(&task))
        .expect("task insert should succeed");

    let comment = Comment::new(
        NewComment::new(task.id(), "huzaifa@nyrix.co", "@sarim @hashir please review"),
        vec![
            "sarim@nyrix.co".to_owned(),
            "muhammadhashirsiddiqui2@gmail.com".to_owned(),
        ],
        &clock,
    )
    .expect("comment creation should succeed");
    context
        .rt
        .block_on(context.store.insert_comment(&comment))
        .expect("comment insert should succeed");

    let fetched = context
        .rt
        .block_on(context.store.comments_for_task(task.id()))
        .expect("comment lookup should succeed");

    assert_eq!(fetched.len(), 1);
    let stored = fetched.first().expect("one comment");
    assert_eq!(stored.id(), comment.id());
    assert_eq!(
        stored.tags(),
        [
            "sarim@nyrix.co".to_owned(),
            "muhammadhashirsiddiqui2@gmail.com".to_owned(),
        ]
    );

    context.cleanup();
}

#[rstest]
fn listings_return_most_recent_first(postgres_cluster: Option<PostgresCluster>) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let context = store_context(cluster);
    let clock = DefaultClock;

    let project = seed_project(&clock);
    context
        .rt
        .block_on(context.store.insert_project(&project))
        .expect("project insert should succeed");

    let first = Task::new(
        NewTask::new(project.id(), "First task", "sarim@nyrix.co", "Huzaifa"),
        &clock,
    )
    .expect("task creation should succeed");
    std::thread::sleep(std::time::Duration::from_millis(2));
    let second = Task::new(
        NewTask::new(project.id(), "Second task", "sarim@nyrix.co", "Huzaifa"),
        &clock,
    )
    .expect("task creation should succeed");

    context
        .rt
        .block_on(context.store.insert_task(&first))
        .expect("task insert should succeed");
    context
        .rt
        .block_on(context.store.insert_task(&second))
        .expect("task insert should succeed");

    let tasks = context
        .rt
        .block_on(context.store.list_tasks())
        .expect("task listing should succeed");
    let ids: Vec<TaskId> = tasks.iter().map(Task::id).collect();
    assert_eq!(ids, [second.id(), first.id()]);

    context.cleanup();
}

#[rstest]
fn task_updates_persist_and_missing_tasks_report_not_found(
    postgres_cluster: Option<PostgresCluster>,
) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let context = store_context(cluster);
    let clock = DefaultClock;

    let project = seed_project(&clock);
    context
        .rt
        .block_on(context.store.insert_project(&project))
        .expect("project insert should succeed");
    let mut task = Task::new(
        NewTask::new(project.id(), "Review deck", "sarim@nyrix.co", "Huzaifa"),
        &clock,
    )
    .expect("task creation should succeed");
    context
        .rt
        .block_on(context.store.insert_task(&task))
        .expect("task insert should succeed");

    task.apply(
        taskhub::tracker::domain::TaskPatch::new()
            .with_status(TaskStatus::Completed)
            .with_deadline(None),
        &clock,
    )
    .expect("patch should apply");
    context
        .rt
        .block_on(context.store.update_task(&task))
        .expect("task update should succeed");

    let fetched = context
        .rt
        .block_on(context.store.find_task(task.id()))
        .expect("task lookup should succeed")
        .expect("task should exist");
    assert_eq!(fetched.status(), TaskStatus::Completed);
    assert!(fetched.deadline().is_none());

    let missing = Task::new(
        NewTask::new(project.id(), "Never stored", "sarim@nyrix.co", "Huzaifa"),
        &clock,
    )
    .expect("task creation should succeed");
    let result = context.rt.block_on(context.store.update_task(&missing));
    assert!(matches!(
        result,
        Err(TrackerRepositoryError::TaskNotFound(_))
    ));

    context.cleanup();
}

#[rstest]
fn duplicate_task_identifiers_are_rejected(postgres_cluster: Option<PostgresCluster>) {
    let Some(cluster) = postgres_cluster else {
        return;
    };
    let context = store_context(cluster);
    let clock = DefaultClock;

    let project = seed_project(&clock);
    context
        .rt
        .block_on(context.store.insert_project(&project))
        .expect("project insert should succeed");
    let task = Task::new(
        NewTask::new(project.id(), "Review deck", "sarim@nyrix.co", "Huzaifa"),
        &clock,
    )
    .expect("task creation should succeed");
    context
        .rt
        .block_on(context.store.insert_task(&task))
        .expect("task insert should succeed");

    let result = context.rt.block_on(context.store.insert_task(&task));
    assert!(matches!(
        result,
        Err(TrackerRepositoryError::DuplicateTask(_))
    ));

    context.cleanup();
}
