//! Notification dispatch service.

use crate::notification::domain::{AssignmentNotice, CommentNotice, EmailMessage};
use crate::notification::ports::MailTransport;
use crate::notification::templates;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default bound on a single dispatch call.
///
/// A hung transport must not block the mutation that triggered the notice.
const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Renders notices and hands them to the mail transport.
///
/// Every send is best-effort: exactly one outbound email per call, no
/// retries, and the boolean result only signals whether the transport
/// accepted the message in time. Callers must not treat `false` as a reason
/// to roll back the mutation that triggered the notice.
#[derive(Clone)]
pub struct NotificationService<M>
where
    M: MailTransport,
{
    transport: Arc<M>,
    dispatch_timeout: Duration,
}

impl<M> NotificationService<M>
where
    M: MailTransport,
{
    /// Creates a dispatch service over the given transport.
    #[must_use]
    pub fn new(transport: Arc<M>) -> Self {
        Self {
            transport,
            dispatch_timeout: DEFAULT_DISPATCH_TIMEOUT,
        }
    }

    /// Overrides the per-call dispatch timeout.
    #[must_use]
    pub const fn with_dispatch_timeout(mut self, timeout: Duration) -> Self {
        self.dispatch_timeout = timeout;
        self
    }

    /// Sends a task assignment notice.
    pub async fn send_assignment_notice(&self, notice: &AssignmentNotice) -> bool {
        match templates::render_assignment_email(notice) {
            Ok(message) => self.dispatch("task-assigned", message).await,
            Err(err) => {
                warn!(error = %err, "failed to render assignment notice");
                false
            }
        }
    }

    /// Sends a new-comment notice to a task assignee.
    pub async fn send_comment_notice(&self, notice: &CommentNotice) -> bool {
        match templates::render_comment_email(notice) {
            Ok(message) => self.dispatch("comment-added", message).await,
            Err(err) => {
                warn!(error = %err, "failed to render comment notice");
                false
            }
        }
    }

    /// Sends a mention notice to a tagged member.
    pub async fn send_mention_notice(&self, notice: &CommentNotice) -> bool {
        match templates::render_mention_email(notice) {
            Ok(message) => self.dispatch("mention-added", message).await,
            Err(err) => {
                warn!(error = %err, "failed to render mention notice");
                false
            }
        }
    }

    async fn dispatch(&self, event: &str, message: EmailMessage) -> bool {
        match tokio::time::timeout(self.dispatch_timeout, self.transport.send(&message)).await {
            Ok(Ok(receipt)) => {
                debug!(
                    event,
                    to = message.to.as_str(),
                    message_id = receipt.message_id(),
                    "notification dispatched"
                );
                true
            }
            Ok(Err(err)) => {
                warn!(
                    event,
                    to = message.to.as_str(),
                    error = %err,
                    "notification dispatch failed"
                );
                false
            }
            Err(_) => {
                warn!(
                    event,
                    to = message.to.as_str(),
                    timeout = ?self.dispatch_timeout,
                    "notification dispatch timed out"
                );
                false
            }
        }
    }
}
