//! Shared test helpers for in-memory integration tests.

use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;
use taskhub::directory::TeamDirectory;
use taskhub::notification::adapters::memory::RecordingMailTransport;
use taskhub::notification::services::NotificationService;
use taskhub::tracker::adapters::memory::InMemoryTracker;
use taskhub::tracker::domain::{NewProject, NewTask, Project, Task};
use taskhub::tracker::services::BoardService;

/// Board service type used by integration tests.
pub type TestBoard = BoardService<InMemoryTracker, RecordingMailTransport, DefaultClock>;

/// Board service plus a handle on its recording transport.
pub struct BoardFixture {
    /// Board service under test.
    pub board: TestBoard,
    /// Recording transport receiving every dispatched notice.
    pub transport: Arc<RecordingMailTransport>,
}

impl BoardFixture {
    /// Creates a project with the given name.
    ///
    /// # Panics
    ///
    /// Panics when project creation fails.
    pub async fn seed_project(&self, name: &str) -> Project {
        self.board
            .create_project(NewProject::new(name))
            .await
            .expect("project creation should succeed")
    }

    /// Creates a task in the given project.
    ///
    /// # Panics
    ///
    /// Panics when task creation fails.
    pub async fn seed_task(&self, project: &Project, title: &str, assigned_to: &str) -> Task {
        self.board
            .create_task(NewTask::new(project.id(), title, assigned_to, "Huzaifa"))
            .await
            .expect("task creation should succeed")
    }
}

/// Provides a board service over a fresh in-memory store, the built-in
/// roster, and a recording transport.
#[fixture]
pub fn board_fixture() -> BoardFixture {
    let transport = Arc::new(RecordingMailTransport::new());
    let board = BoardService::new(
        Arc::new(InMemoryTracker::new()),
        NotificationService::new(Arc::clone(&transport)),
        Arc::new(TeamDirectory::builtin()),
        Arc::new(DefaultClock),
    );
    BoardFixture { board, transport }
}
