//! HTTP implementation of the mail transport port.
//!
//! Posts the message as JSON to a single configured endpoint backed by an
//! SMTP relay. A success response carries the relay-assigned message
//! identifier; failure responses carry an error payload.

use crate::notification::domain::{DeliveryReceipt, EmailMessage};
use crate::notification::ports::{MailTransport, MailTransportError, MailTransportResult};
use async_trait::async_trait;
use serde::Deserialize;

/// Mail transport delivering over a single HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpMailTransport {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Deserialize)]
struct SendSuccessBody {
    #[serde(rename = "messageId")]
    message_id: String,
}

#[derive(Deserialize)]
struct SendFailureBody {
    error: String,
    details: Option<String>,
}

impl HttpMailTransport {
    /// Creates a transport posting to the given endpoint with a fresh
    /// client.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Creates a transport reusing an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl MailTransport for HttpMailTransport {
    async fn send(&self, message: &EmailMessage) -> MailTransportResult<DeliveryReceipt> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(message)
            .send()
            .await
            .map_err(MailTransportError::request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailTransportError::Rejected {
                status: status.as_u16(),
                detail: failure_detail(&body),
            });
        }

        let body: SendSuccessBody = response
            .json()
            .await
            .map_err(|err| MailTransportError::InvalidResponse(err.to_string()))?;
        Ok(DeliveryReceipt::new(body.message_id))
    }
}

fn failure_detail(body: &str) -> String {
    match serde_json::from_str::<SendFailureBody>(body) {
        Ok(SendFailureBody {
            error,
            details: Some(details),
        }) => format!("{error}: {details}"),
        Ok(SendFailureBody {
            error,
            details: None,
        }) => error,
        Err(_) => body.trim().to_owned(),
    }
}
