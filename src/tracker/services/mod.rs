//! Application services for tracker orchestration.

mod board;

pub use board::{BoardError, BoardResult, BoardService, TaskWithComments};
