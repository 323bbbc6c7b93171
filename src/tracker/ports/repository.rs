//! Repository ports for project, task, and comment persistence.
//!
//! The backing store guarantees row-level atomicity per operation; no
//! multi-statement transaction spans a mutation and its side effects.
//! Referential integrity is part of the contract: inserting a child whose
//! parent is missing fails, and deleting a parent cascades to its children.

use crate::tracker::domain::{Comment, CommentId, Project, ProjectId, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for tracker repository operations.
pub type TrackerRepositoryResult<T> = Result<T, TrackerRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::DuplicateProject`] when the
    /// identifier already exists.
    async fn insert_project(&self, project: &Project) -> TrackerRepositoryResult<()>;

    /// Persists changes to an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::ProjectNotFound`] when the project
    /// does not exist.
    async fn update_project(&self, project: &Project) -> TrackerRepositoryResult<()>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_project(&self, id: ProjectId) -> TrackerRepositoryResult<Option<Project>>;

    /// Returns all projects, most recently created first.
    async fn list_projects(&self) -> TrackerRepositoryResult<Vec<Project>>;

    /// Deletes a project, cascading to its tasks and their comments.
    ///
    /// Returns whether the project existed.
    async fn delete_project(&self, id: ProjectId) -> TrackerRepositoryResult<bool>;
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::MissingProject`] when the owning
    /// project does not exist, or
    /// [`TrackerRepositoryError::DuplicateTask`] when the identifier already
    /// exists.
    async fn insert_task(&self, task: &Task) -> TrackerRepositoryResult<()>;

    /// Persists changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::TaskNotFound`] when the task does
    /// not exist.
    async fn update_task(&self, task: &Task) -> TrackerRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, id: TaskId) -> TrackerRepositoryResult<Option<Task>>;

    /// Returns all tasks, most recently created first.
    async fn list_tasks(&self) -> TrackerRepositoryResult<Vec<Task>>;

    /// Deletes a task, cascading to its comments.
    ///
    /// Returns whether the task existed.
    async fn delete_task(&self, id: TaskId) -> TrackerRepositoryResult<bool>;
}

/// Comment persistence contract.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a new comment.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerRepositoryError::MissingTask`] when the owning task
    /// does not exist, or [`TrackerRepositoryError::DuplicateComment`] when
    /// the identifier already exists.
    async fn insert_comment(&self, comment: &Comment) -> TrackerRepositoryResult<()>;

    /// Returns all comments, most recently created first.
    async fn list_comments(&self) -> TrackerRepositoryResult<Vec<Comment>>;

    /// Returns the comments of one task, most recently created first.
    async fn comments_for_task(&self, task_id: TaskId) -> TrackerRepositoryResult<Vec<Comment>>;

    /// Deletes a comment.
    ///
    /// Returns whether the comment existed.
    async fn delete_comment(&self, id: CommentId) -> TrackerRepositoryResult<bool>;
}

/// Errors returned by tracker repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TrackerRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// A comment with the same identifier already exists.
    #[error("duplicate comment identifier: {0}")]
    DuplicateComment(CommentId),

    /// The project was not found.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// A task insert referenced a project that does not exist.
    #[error("task references missing project: {0}")]
    MissingProject(ProjectId),

    /// A comment insert referenced a task that does not exist.
    #[error("comment references missing task: {0}")]
    MissingTask(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TrackerRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
