//! Port contracts for tracker persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by tracker services.

pub mod repository;

pub use repository::{
    CommentRepository, ProjectRepository, TaskRepository, TrackerRepositoryError,
    TrackerRepositoryResult,
};
