//! Email notification dispatch.
//!
//! Builds transport-specific messages (subject, HTML body, plain-text
//! fallback) for the three notice kinds — task assignment, new comment, and
//! mention — and hands them to a mail transport for delivery. Dispatch is
//! strictly best-effort: exactly one outbound email per call, no retries,
//! failures logged and reported as `false` to callers.
//!
//! - Domain types in [`domain`]
//! - Template rendering in [`templates`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod templates;

#[cfg(test)]
mod tests;
