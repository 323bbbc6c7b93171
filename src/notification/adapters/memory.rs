//! Recording mail transport for tests.

use crate::notification::domain::{DeliveryReceipt, EmailMessage};
use crate::notification::ports::{MailTransport, MailTransportError, MailTransportResult};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

/// Thread-safe transport that records every message instead of sending it.
///
/// Can be switched into a failing mode to simulate transport errors.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailTransport {
    state: Arc<Mutex<RecordingState>>,
}

#[derive(Debug, Default)]
struct RecordingState {
    sent: Vec<EmailMessage>,
    failing: bool,
    receipts: u64,
}

impl RecordingMailTransport {
    /// Creates an empty recording transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches the transport into or out of failing mode.
    pub fn set_failing(&self, failing: bool) {
        self.lock_state().failing = failing;
    }

    /// Returns a snapshot of every recorded message, in send order.
    #[must_use]
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.lock_state().sent.clone()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, RecordingState> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl MailTransport for RecordingMailTransport {
    async fn send(&self, message: &EmailMessage) -> MailTransportResult<DeliveryReceipt> {
        let mut state = self.lock_state();
        if state.failing {
            return Err(MailTransportError::Rejected {
                status: 500,
                detail: "simulated transport failure".to_owned(),
            });
        }
        state.receipts += 1;
        let receipt = DeliveryReceipt::new(format!("recorded-{}", state.receipts));
        state.sent.push(message.clone());
        Ok(receipt)
    }
}
