//! Step definitions for comment notification BDD scenarios.

pub mod then;
