//! Comment entity and related types.

use super::{CommentId, TaskId, TrackerDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Input payload for creating a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    /// Task the comment belongs to.
    pub task_id: TaskId,
    /// Author email (required, non-empty).
    pub author: String,
    /// Free-text content; may contain `@`-mentions.
    pub content: String,
}

impl NewComment {
    /// Creates an input payload.
    #[must_use]
    pub fn new(task_id: TaskId, author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            task_id,
            author: author.into(),
            content: content.into(),
        }
    }
}

/// Comment entity.
///
/// `tags` holds the member emails resolved from the content's mentions at
/// creation time. They are stored with the comment and never recomputed on
/// read, so later roster changes do not alter existing comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author: String,
    content: String,
    tags: Vec<String>,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Persisted comment identifier.
    pub id: CommentId,
    /// Persisted owning task.
    pub task_id: TaskId,
    /// Persisted author email.
    pub author: String,
    /// Persisted content.
    pub content: String,
    /// Persisted resolved mention emails.
    pub tags: Vec<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment with a server-assigned id and timestamp.
    ///
    /// The caller supplies `tags` already resolved from the content; the
    /// comment stores them as-is.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyCommentContent`] when the content
    /// is empty after trimming, or
    /// [`TrackerDomainError::MissingCommentAuthor`] when the author is empty
    /// after trimming.
    pub fn new(
        input: NewComment,
        tags: Vec<String>,
        clock: &impl Clock,
    ) -> Result<Self, TrackerDomainError> {
        if input.content.trim().is_empty() {
            return Err(TrackerDomainError::EmptyCommentContent);
        }
        if input.author.trim().is_empty() {
            return Err(TrackerDomainError::MissingCommentAuthor);
        }
        Ok(Self {
            id: CommentId::new(),
            task_id: input.task_id,
            author: input.author,
            content: input.content,
            tags,
            created_at: clock.utc(),
        })
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            author: data.author,
            content: data.content,
            tags: data.tags,
            created_at: data.created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the owning task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author email.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the comment content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the resolved mention emails stored at creation.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
