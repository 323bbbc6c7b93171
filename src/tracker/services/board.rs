//! Board service: denormalized reads and side-effect sequencing around
//! writes.
//!
//! Every mutation follows the same shape: validate, persist, then dispatch
//! notifications. Dispatch happens strictly after a successful write and its
//! outcome never propagates to the caller, so persistence correctness is
//! never sacrificed for notification delivery.

use crate::directory::TeamDirectory;
use crate::mention::MentionParser;
use crate::notification::domain::{AssignmentNotice, CommentNotice};
use crate::notification::ports::MailTransport;
use crate::notification::services::NotificationService;
use crate::tracker::domain::{
    Comment, CommentId, NewComment, NewProject, NewTask, Project, ProjectId, ProjectPatch, Task,
    TaskId, TaskPatch, TrackerDomainError,
};
use crate::tracker::ports::{
    CommentRepository, ProjectRepository, TaskRepository, TrackerRepositoryError,
};
use chrono::NaiveDate;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TrackerDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TrackerRepositoryError),
}

/// Result type for board service operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// A task joined with its comments, most recent comment first.
///
/// This view is recomputed on every read and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskWithComments {
    /// The task itself.
    pub task: Task,
    /// The task's comments, most recently created first.
    pub comments: Vec<Comment>,
}

/// Board orchestration service.
#[derive(Clone)]
pub struct BoardService<S, M, C>
where
    S: ProjectRepository + TaskRepository + CommentRepository,
    M: MailTransport,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    notifier: NotificationService<M>,
    directory: Arc<TeamDirectory>,
    mentions: MentionParser,
    clock: Arc<C>,
}

impl<S, M, C> BoardService<S, M, C>
where
    S: ProjectRepository + TaskRepository + CommentRepository,
    M: MailTransport,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        notifier: NotificationService<M>,
        directory: Arc<TeamDirectory>,
        clock: Arc<C>,
    ) -> Self {
        let mentions = MentionParser::new(Arc::clone(&directory));
        Self {
            store,
            notifier,
            directory,
            mentions,
            clock,
        }
    }

    /// Creates a new project.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when validation fails or the repository
    /// rejects persistence.
    pub async fn create_project(&self, input: NewProject) -> BoardResult<Project> {
        let project = Project::new(input, &*self.clock)?;
        self.store.insert_project(&project).await?;
        Ok(project)
    }

    /// Applies a partial update to a project and refreshes its `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the project does not exist, validation
    /// fails, or the repository rejects the update.
    pub async fn update_project(
        &self,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> BoardResult<Project> {
        let mut project = self
            .store
            .find_project(id)
            .await?
            .ok_or(TrackerRepositoryError::ProjectNotFound(id))?;
        project.apply(patch, &*self.clock)?;
        self.store.update_project(&project).await?;
        Ok(project)
    }

    /// Deletes a project, cascading to its tasks and their comments.
    ///
    /// Returns whether the project existed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] when the repository fails.
    pub async fn delete_project(&self, id: ProjectId) -> BoardResult<bool> {
        Ok(self.store.delete_project(id).await?)
    }

    /// Returns all projects, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] when the repository fails.
    pub async fn list_projects(&self) -> BoardResult<Vec<Project>> {
        Ok(self.store.list_projects().await?)
    }

    /// Creates a new task, then sends an assignment notice when the
    /// assignee resolves to a directory member.
    ///
    /// Notification dispatch is best-effort: its failure does not fail task
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when validation fails, the owning project does
    /// not exist, or the repository rejects persistence.
    pub async fn create_task(&self, input: NewTask) -> BoardResult<Task> {
        let assigned_by = input.assigned_by.clone();
        let task = Task::new(input, &*self.clock)?;
        self.store.insert_task(&task).await?;
        self.notify_assignment(&task, &assigned_by).await;
        Ok(task)
    }

    /// Applies a partial update to a task and refreshes its `updated_at`.
    ///
    /// Status changes are unrestricted; reopening a completed task is legal.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when the task does not exist, validation
    /// fails, or the repository rejects the update.
    pub async fn update_task(&self, id: TaskId, patch: TaskPatch) -> BoardResult<Task> {
        let mut task = self
            .store
            .find_task(id)
            .await?
            .ok_or(TrackerRepositoryError::TaskNotFound(id))?;
        task.apply(patch, &*self.clock)?;
        self.store.update_task(&task).await?;
        Ok(task)
    }

    /// Deletes a task, cascading to its comments.
    ///
    /// Returns whether the task existed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] when the repository fails.
    pub async fn delete_task(&self, id: TaskId) -> BoardResult<bool> {
        Ok(self.store.delete_task(id).await?)
    }

    /// Returns every task joined with its comments.
    ///
    /// Tasks are ordered most recently created first, and so are the
    /// comments within each task. The join is recomputed on every call.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] when the repository fails.
    pub async fn list_tasks_with_comments(&self) -> BoardResult<Vec<TaskWithComments>> {
        let tasks = self.store.list_tasks().await?;
        let comments = self.store.list_comments().await?;

        let mut by_task: HashMap<TaskId, Vec<Comment>> = HashMap::new();
        for comment in comments {
            by_task.entry(comment.task_id()).or_default().push(comment);
        }

        Ok(tasks
            .into_iter()
            .map(|task| {
                let task_comments = by_task.remove(&task.id()).unwrap_or_default();
                TaskWithComments {
                    task,
                    comments: task_comments,
                }
            })
            .collect())
    }

    /// Returns one task joined with its comments, or `None` when the task
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] when the repository fails.
    pub async fn find_task_with_comments(
        &self,
        id: TaskId,
    ) -> BoardResult<Option<TaskWithComments>> {
        let Some(task) = self.store.find_task(id).await? else {
            return Ok(None);
        };
        let comments = self.store.comments_for_task(id).await?;
        Ok(Some(TaskWithComments { task, comments }))
    }

    /// Creates a new comment with mention-derived tags, then fans out
    /// notifications.
    ///
    /// The fan-out notifies the task's assignee (when the assignee resolves
    /// to a directory member and is not the author) and every distinct
    /// member resolved from the comment's mentions (excluding the author).
    /// An assignee who is also mentioned receives both notices. Dispatch is
    /// best-effort; the persisted comment is returned regardless of
    /// notification outcome.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] when validation fails, the owning task does
    /// not exist, or the repository rejects persistence.
    pub async fn create_comment(&self, input: NewComment) -> BoardResult<Comment> {
        let task_id = input.task_id;
        let tags = self.mentions.parse_mentions(&input.content);
        let comment = Comment::new(input, tags, &*self.clock)?;
        let task = self
            .store
            .find_task(task_id)
            .await?
            .ok_or(TrackerRepositoryError::MissingTask(task_id))?;
        self.store.insert_comment(&comment).await?;
        self.fan_out_comment_notices(&task, &comment).await;
        Ok(comment)
    }

    /// Deletes a comment.
    ///
    /// Returns whether the comment existed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Repository`] when the repository fails.
    pub async fn delete_comment(&self, id: CommentId) -> BoardResult<bool> {
        Ok(self.store.delete_comment(id).await?)
    }

    async fn notify_assignment(&self, task: &Task, assigned_by: &str) {
        let Some(assignee) = self.directory.find_by_email(task.assigned_to()) else {
            return;
        };
        let Some(project_name) = self.project_name_for(task.project_id()).await else {
            return;
        };
        let notice = AssignmentNotice {
            to_email: assignee.email.clone(),
            to_name: assignee.name.clone(),
            task_title: task.title().to_owned(),
            project_name,
            deadline: task.deadline().map(format_deadline),
            priority: task.priority().as_str().to_owned(),
            assigned_by: assigned_by.to_owned(),
        };
        self.notifier.send_assignment_notice(&notice).await;
    }

    async fn fan_out_comment_notices(&self, task: &Task, comment: &Comment) {
        let Some(project_name) = self.project_name_for(task.project_id()).await else {
            return;
        };
        let author_name = self.author_display_name(comment.author());

        if let Some(assignee) = self.directory.find_by_email(task.assigned_to()) {
            if assignee.email != comment.author() {
                let notice = CommentNotice {
                    to_email: assignee.email.clone(),
                    to_name: assignee.name.clone(),
                    task_title: task.title().to_owned(),
                    project_name: project_name.clone(),
                    author: author_name.clone(),
                    comment_text: comment.content().to_owned(),
                };
                self.notifier.send_comment_notice(&notice).await;
            }
        }

        let mut notified: Vec<&str> = Vec::new();
        for tag in comment.tags() {
            if tag == comment.author() || notified.contains(&tag.as_str()) {
                continue;
            }
            notified.push(tag.as_str());
            let Some(member) = self.directory.find_by_email(tag) else {
                continue;
            };
            let notice = CommentNotice {
                to_email: member.email.clone(),
                to_name: member.name.clone(),
                task_title: task.title().to_owned(),
                project_name: project_name.clone(),
                author: author_name.clone(),
                comment_text: comment.content().to_owned(),
            };
            self.notifier.send_mention_notice(&notice).await;
        }
    }

    async fn project_name_for(&self, project_id: ProjectId) -> Option<String> {
        match self.store.find_project(project_id).await {
            Ok(Some(project)) => Some(project.name().to_owned()),
            Ok(None) => {
                warn!(%project_id, "project vanished before notification dispatch");
                None
            }
            Err(err) => {
                warn!(%project_id, error = %err, "project lookup for notification failed");
                None
            }
        }
    }

    fn author_display_name(&self, author: &str) -> String {
        self.directory
            .find_by_email(author)
            .map_or_else(|| author.to_owned(), |member| member.name.clone())
    }
}

fn format_deadline(deadline: NaiveDate) -> String {
    deadline.format("%b %d, %Y").to_string()
}
