//! `PostgreSQL` adapter for tracker persistence.

pub mod models;
pub mod repository;
pub mod schema;

pub use repository::{PostgresTracker, TrackerPgPool};
