//! Project, task, and comment tracking.
//!
//! This module implements the tracker's write path (create/update/delete for
//! the three entities, with mention-derived tags and notification fan-out
//! sequenced after successful persistence) and its read path (the
//! denormalized task-with-comments view, recomputed on every read). It
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
