//! Application services for notification dispatch.

mod dispatcher;

pub use dispatcher::NotificationService;
