//! Domain types for outbound email notifications.

use serde::{Deserialize, Serialize};

/// A fully rendered outbound email, in the shape the mail endpoint accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Recipient email address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Plain-text fallback body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Identifier returned by the mail transport for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    message_id: String,
}

impl DeliveryReceipt {
    /// Creates a receipt from the transport-assigned message identifier.
    #[must_use]
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
        }
    }

    /// Returns the transport-assigned message identifier.
    #[must_use]
    pub fn message_id(&self) -> &str {
        &self.message_id
    }
}

/// Context for a task assignment notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentNotice {
    /// Recipient email address.
    pub to_email: String,
    /// Recipient display name.
    pub to_name: String,
    /// Title of the assigned task.
    pub task_title: String,
    /// Name of the project the task belongs to.
    pub project_name: String,
    /// Preformatted deadline, when the task has one.
    pub deadline: Option<String>,
    /// Priority label of the task.
    pub priority: String,
    /// Display name of whoever made the assignment.
    pub assigned_by: String,
}

/// Context for a new-comment or mention notice.
///
/// The two notice kinds share the same context; they differ only in the
/// template and subject used to render them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNotice {
    /// Recipient email address.
    pub to_email: String,
    /// Recipient display name.
    pub to_name: String,
    /// Title of the task the comment was added to.
    pub task_title: String,
    /// Name of the project the task belongs to.
    pub project_name: String,
    /// Display name of the comment author.
    pub author: String,
    /// Raw comment text.
    pub comment_text: String,
}
