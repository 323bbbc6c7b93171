//! Adapter implementations of the notification ports.

pub mod http;
pub mod memory;

pub use http::HttpMailTransport;
pub use memory::RecordingMailTransport;
