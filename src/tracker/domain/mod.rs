//! Domain model for the tracker.
//!
//! Projects own tasks by reference, tasks own comments by reference, and all
//! infrastructure concerns stay outside the domain boundary. Status and
//! priority fields are closed enumerations with exhaustive handling at every
//! match site.

mod comment;
mod error;
mod ids;
mod project;
mod task;

pub use comment::{Comment, NewComment, PersistedCommentData};
pub use error::{
    ParseProjectStatusError, ParseTaskPriorityError, ParseTaskStatusError, TrackerDomainError,
};
pub use ids::{CommentId, ProjectId, TaskId};
pub use project::{NewProject, PersistedProjectData, Project, ProjectPatch, ProjectStatus};
pub use task::{NewTask, PersistedTaskData, Task, TaskPatch, TaskPriority, TaskStatus};
