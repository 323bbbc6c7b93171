//! `PostgreSQL` repository implementation for tracker storage.

use super::{
    models::{
        CommentRow, NewCommentRow, NewProjectRow, NewTaskRow, ProjectChangeset, ProjectRow,
        TaskChangeset, TaskRow,
    },
    schema::{comments, projects, tasks},
};
use crate::tracker::{
    domain::{
        Comment, CommentId, PersistedCommentData, PersistedProjectData, PersistedTaskData,
        Project, ProjectId, ProjectStatus, Task, TaskId, TaskPriority, TaskStatus,
    },
    ports::{
        CommentRepository, ProjectRepository, TaskRepository, TrackerRepositoryError,
        TrackerRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by tracker adapters.
pub type TrackerPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed tracker store implementing all three repository
/// ports.
///
/// Referential integrity and cascade deletion are enforced by the schema:
/// `tasks.project_id` and `comments.task_id` are `ON DELETE CASCADE`
/// foreign keys.
#[derive(Debug, Clone)]
pub struct PostgresTracker {
    pool: TrackerPgPool,
}

impl PostgresTracker {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TrackerPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TrackerRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TrackerRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TrackerRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TrackerRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresTracker {
    async fn insert_project(&self, project: &Project) -> TrackerRepositoryResult<()> {
        let project_id = project.id();
        let new_row = project_to_new_row(project);

        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TrackerRepositoryError::DuplicateProject(project_id)
                    }
                    _ => TrackerRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_project(&self, project: &Project) -> TrackerRepositoryResult<()> {
        let project_id = project.id();
        let changeset = project_to_changeset(project);

        self.run_blocking(move |connection| {
            let updated =
                diesel::update(projects::table.filter(projects::id.eq(project_id.into_inner())))
                    .set(&changeset)
                    .execute(connection)
                    .map_err(TrackerRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TrackerRepositoryError::ProjectNotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_project(&self, id: ProjectId) -> TrackerRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(TrackerRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list_projects(&self) -> TrackerRepositoryResult<Vec<Project>> {
        self.run_blocking(|connection| {
            let rows = projects::table
                .order(projects::created_at.desc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(TrackerRepositoryError::persistence)?;
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn delete_project(&self, id: ProjectId) -> TrackerRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(projects::table.filter(projects::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(TrackerRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTracker {
    async fn insert_task(&self, task: &Task) -> TrackerRepositoryResult<()> {
        let task_id = task.id();
        let project_id = task.project_id();
        let new_row = task_to_new_row(task);

        self.run_blocking(move |connection| {
            // The pre-check improves semantic error reporting but is not
            // relied on for correctness: the foreign key still enforces
            // integrity in the window between check and insert.
            let parent_exists = project_exists(connection, project_id)?;
            if !parent_exists {
                return Err(TrackerRepositoryError::MissingProject(project_id));
            }

            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TrackerRepositoryError::MissingProject(project_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TrackerRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TrackerRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update_task(&self, task: &Task) -> TrackerRepositoryResult<()> {
        let task_id = task.id();
        let changeset = task_to_changeset(task);

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(TrackerRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TrackerRepositoryError::TaskNotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_task(&self, id: TaskId) -> TrackerRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TrackerRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_tasks(&self) -> TrackerRepositoryResult<Vec<Task>> {
        self.run_blocking(|connection| {
            let rows = tasks::table
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TrackerRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn delete_task(&self, id: TaskId) -> TrackerRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TrackerRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }
}

#[async_trait]
impl CommentRepository for PostgresTracker {
    async fn insert_comment(&self, comment: &Comment) -> TrackerRepositoryResult<()> {
        let comment_id = comment.id();
        let task_id = comment.task_id();
        let new_row = comment_to_new_row(comment)?;

        self.run_blocking(move |connection| {
            let parent_exists = task_exists(connection, task_id)?;
            if !parent_exists {
                return Err(TrackerRepositoryError::MissingTask(task_id));
            }

            diesel::insert_into(comments::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        TrackerRepositoryError::MissingTask(task_id)
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TrackerRepositoryError::DuplicateComment(comment_id)
                    }
                    _ => TrackerRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_comments(&self) -> TrackerRepositoryResult<Vec<Comment>> {
        self.run_blocking(|connection| {
            let rows = comments::table
                .order(comments::created_at.desc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(TrackerRepositoryError::persistence)?;
            rows.into_iter().map(row_to_comment).collect()
        })
        .await
    }

    async fn comments_for_task(&self, task_id: TaskId) -> TrackerRepositoryResult<Vec<Comment>> {
        self.run_blocking(move |connection| {
            let rows = comments::table
                .filter(comments::task_id.eq(task_id.into_inner()))
                .order(comments::created_at.desc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(TrackerRepositoryError::persistence)?;
            rows.into_iter().map(row_to_comment).collect()
        })
        .await
    }

    async fn delete_comment(&self, id: CommentId) -> TrackerRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let deleted =
                diesel::delete(comments::table.filter(comments::id.eq(id.into_inner())))
                    .execute(connection)
                    .map_err(TrackerRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }
}

fn project_exists(
    connection: &mut PgConnection,
    id: ProjectId,
) -> TrackerRepositoryResult<bool> {
    let found = projects::table
        .filter(projects::id.eq(id.into_inner()))
        .select(projects::id)
        .first::<uuid::Uuid>(connection)
        .optional()
        .map_err(TrackerRepositoryError::persistence)?;
    Ok(found.is_some())
}

fn task_exists(connection: &mut PgConnection, id: TaskId) -> TrackerRepositoryResult<bool> {
    let found = tasks::table
        .filter(tasks::id.eq(id.into_inner()))
        .select(tasks::id)
        .first::<uuid::Uuid>(connection)
        .optional()
        .map_err(TrackerRepositoryError::persistence)?;
    Ok(found.is_some())
}

fn project_to_new_row(project: &Project) -> NewProjectRow {
    NewProjectRow {
        id: project.id().into_inner(),
        name: project.name().to_owned(),
        description: project.description().to_owned(),
        status: project.status().as_str().to_owned(),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    }
}

fn project_to_changeset(project: &Project) -> ProjectChangeset {
    ProjectChangeset {
        name: project.name().to_owned(),
        description: project.description().to_owned(),
        status: project.status().as_str().to_owned(),
        updated_at: project.updated_at(),
    }
}

fn row_to_project(row: ProjectRow) -> TrackerRepositoryResult<Project> {
    let status = ProjectStatus::try_from(row.status.as_str())
        .map_err(TrackerRepositoryError::persistence)?;
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(row.id),
        name: row.name,
        description: row.description,
        status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn task_to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        assigned_to: task.assigned_to().to_owned(),
        deadline: task.deadline(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn task_to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        assigned_to: task.assigned_to().to_owned(),
        deadline: task.deadline(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TrackerRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TrackerRepositoryError::persistence)?;
    let priority = TaskPriority::try_from(row.priority.as_str())
        .map_err(TrackerRepositoryError::persistence)?;
    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        project_id: ProjectId::from_uuid(row.project_id),
        title: row.title,
        description: row.description,
        status,
        priority,
        assigned_to: row.assigned_to,
        deadline: row.deadline,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn comment_to_new_row(comment: &Comment) -> TrackerRepositoryResult<NewCommentRow> {
    let tags =
        serde_json::to_value(comment.tags()).map_err(TrackerRepositoryError::persistence)?;
    Ok(NewCommentRow {
        id: comment.id().into_inner(),
        task_id: comment.task_id().into_inner(),
        author: comment.author().to_owned(),
        content: comment.content().to_owned(),
        tags,
        created_at: comment.created_at(),
    })
}

fn row_to_comment(row: CommentRow) -> TrackerRepositoryResult<Comment> {
    let tags: Vec<String> =
        serde_json::from_value(row.tags).map_err(TrackerRepositoryError::persistence)?;
    Ok(Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        author: row.author,
        content: row.content,
        tags,
        created_at: row.created_at,
    }))
}
