//! Port contracts for notification delivery.
//!
//! Ports define infrastructure-agnostic interfaces used by the notification
//! services.

pub mod transport;

pub use transport::{MailTransport, MailTransportError, MailTransportResult};
