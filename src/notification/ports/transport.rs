//! Mail transport port.

use crate::notification::domain::{DeliveryReceipt, EmailMessage};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for mail transport operations.
pub type MailTransportResult<T> = Result<T, MailTransportError>;

/// Outbound mail delivery contract.
///
/// Implementations deliver exactly one message per call and perform no
/// retries of their own.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Delivers a rendered message.
    ///
    /// # Errors
    ///
    /// Returns [`MailTransportError`] when the request fails, the endpoint
    /// rejects the message, or the response cannot be interpreted.
    async fn send(&self, message: &EmailMessage) -> MailTransportResult<DeliveryReceipt>;
}

/// Errors returned by mail transport implementations.
#[derive(Debug, Clone, Error)]
pub enum MailTransportError {
    /// The request to the mail endpoint could not be completed.
    #[error("mail request failed: {0}")]
    Request(Arc<dyn std::error::Error + Send + Sync>),

    /// The mail endpoint rejected the message.
    #[error("mail endpoint rejected the message with status {status}: {detail}")]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,
        /// Error detail extracted from the response payload.
        detail: String,
    },

    /// The mail endpoint accepted the request but returned an
    /// uninterpretable body.
    #[error("mail endpoint returned an invalid response: {0}")]
    InvalidResponse(String),
}

impl MailTransportError {
    /// Wraps a request-level failure.
    pub fn request(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Request(Arc::new(err))
    }
}
