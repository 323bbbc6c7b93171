//! Taskhub: team project and task tracker core.
//!
//! This crate provides the core logic of a small team tracker: projects
//! contain tasks, tasks contain comments, and comments may tag team members,
//! with notification emails dispatched on assignment, comment, and tag
//! events.
//!
//! # Architecture
//!
//! Taskhub follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, mail, etc.)
//!
//! # Modules
//!
//! - [`directory`]: Read-only team member directory
//! - [`mention`]: `@`-mention extraction and highlighting
//! - [`notification`]: Email templating and dispatch over a mail transport
//! - [`tracker`]: Project/task/comment entities, persistence ports, and the
//!   board service that sequences notification side effects around writes

pub mod directory;
pub mod mention;
pub mod notification;
pub mod tracker;
