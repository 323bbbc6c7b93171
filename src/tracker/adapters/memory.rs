//! In-memory tracker store for tests.
//!
//! A single store backs all three repository ports so referential integrity
//! and cascade deletion behave like the real schema: task inserts check the
//! owning project, comment inserts check the owning task, and deleting a
//! parent removes its children.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::tracker::{
    domain::{Comment, CommentId, Project, ProjectId, Task, TaskId},
    ports::{
        CommentRepository, ProjectRepository, TaskRepository, TrackerRepositoryError,
        TrackerRepositoryResult,
    },
};

/// Thread-safe in-memory tracker store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTracker {
    state: Arc<RwLock<TrackerState>>,
}

#[derive(Debug, Default)]
struct TrackerState {
    projects: HashMap<ProjectId, StoredEntry<Project>>,
    tasks: HashMap<TaskId, StoredEntry<Task>>,
    comments: HashMap<CommentId, StoredEntry<Comment>>,
    next_seq: u64,
}

/// Entity plus its insertion sequence.
///
/// The sequence breaks creation-time ties so most-recent-first listings stay
/// deterministic under a frozen test clock.
#[derive(Debug, Clone)]
struct StoredEntry<T> {
    seq: u64,
    entity: T,
}

impl TrackerState {
    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

impl InMemoryTracker {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read_state(&self) -> TrackerRepositoryResult<RwLockReadGuard<'_, TrackerState>> {
        self.state.read().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> TrackerRepositoryResult<RwLockWriteGuard<'_, TrackerState>> {
        self.state.write().map_err(|err| {
            TrackerRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn most_recent_first<K, T>(
    entries: &HashMap<K, StoredEntry<T>>,
    created_at: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T>
where
    T: Clone,
{
    let mut rows: Vec<&StoredEntry<T>> = entries.values().collect();
    rows.sort_by(|a, b| {
        created_at(&b.entity)
            .cmp(&created_at(&a.entity))
            .then_with(|| b.seq.cmp(&a.seq))
    });
    rows.into_iter().map(|entry| entry.entity.clone()).collect()
}

#[async_trait]
impl ProjectRepository for InMemoryTracker {
    async fn insert_project(&self, project: &Project) -> TrackerRepositoryResult<()> {
        let mut state = self.write_state()?;
        if state.projects.contains_key(&project.id()) {
            return Err(TrackerRepositoryError::DuplicateProject(project.id()));
        }
        let seq = state.bump_seq();
        state.projects.insert(
            project.id(),
            StoredEntry {
                seq,
                entity: project.clone(),
            },
        );
        Ok(())
    }

    async fn update_project(&self, project: &Project) -> TrackerRepositoryResult<()> {
        let mut state = self.write_state()?;
        let Some(entry) = state.projects.get_mut(&project.id()) else {
            return Err(TrackerRepositoryError::ProjectNotFound(project.id()));
        };
        entry.entity = project.clone();
        Ok(())
    }

    async fn find_project(&self, id: ProjectId) -> TrackerRepositoryResult<Option<Project>> {
        let state = self.read_state()?;
        Ok(state.projects.get(&id).map(|entry| entry.entity.clone()))
    }

    async fn list_projects(&self) -> TrackerRepositoryResult<Vec<Project>> {
        let state = self.read_state()?;
        Ok(most_recent_first(&state.projects, Project::created_at))
    }

    async fn delete_project(&self, id: ProjectId) -> TrackerRepositoryResult<bool> {
        let mut state = self.write_state()?;
        if state.projects.remove(&id).is_none() {
            return Ok(false);
        }
        let task_ids: Vec<TaskId> = state
            .tasks
            .values()
            .filter(|entry| entry.entity.project_id() == id)
            .map(|entry| entry.entity.id())
            .collect();
        for task_id in &task_ids {
            state.tasks.remove(task_id);
        }
        state
            .comments
            .retain(|_, entry| !task_ids.contains(&entry.entity.task_id()));
        Ok(true)
    }
}

#[async_trait]
impl TaskRepository for InMemoryTracker {
    async fn insert_task(&self, task: &Task) -> TrackerRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.projects.contains_key(&task.project_id()) {
            return Err(TrackerRepositoryError::MissingProject(task.project_id()));
        }
        if state.tasks.contains_key(&task.id()) {
            return Err(TrackerRepositoryError::DuplicateTask(task.id()));
        }
        let seq = state.bump_seq();
        state.tasks.insert(
            task.id(),
            StoredEntry {
                seq,
                entity: task.clone(),
            },
        );
        Ok(())
    }

    async fn update_task(&self, task: &Task) -> TrackerRepositoryResult<()> {
        let mut state = self.write_state()?;
        let Some(entry) = state.tasks.get_mut(&task.id()) else {
            return Err(TrackerRepositoryError::TaskNotFound(task.id()));
        };
        entry.entity = task.clone();
        Ok(())
    }

    async fn find_task(&self, id: TaskId) -> TrackerRepositoryResult<Option<Task>> {
        let state = self.read_state()?;
        Ok(state.tasks.get(&id).map(|entry| entry.entity.clone()))
    }

    async fn list_tasks(&self) -> TrackerRepositoryResult<Vec<Task>> {
        let state = self.read_state()?;
        Ok(most_recent_first(&state.tasks, Task::created_at))
    }

    async fn delete_task(&self, id: TaskId) -> TrackerRepositoryResult<bool> {
        let mut state = self.write_state()?;
        if state.tasks.remove(&id).is_none() {
            return Ok(false);
        }
        state
            .comments
            .retain(|_, entry| entry.entity.task_id() != id);
        Ok(true)
    }
}

#[async_trait]
impl CommentRepository for InMemoryTracker {
    async fn insert_comment(&self, comment: &Comment) -> TrackerRepositoryResult<()> {
        let mut state = self.write_state()?;
        if !state.tasks.contains_key(&comment.task_id()) {
            return Err(TrackerRepositoryError::MissingTask(comment.task_id()));
        }
        if state.comments.contains_key(&comment.id()) {
            return Err(TrackerRepositoryError::DuplicateComment(comment.id()));
        }
        let seq = state.bump_seq();
        state.comments.insert(
            comment.id(),
            StoredEntry {
                seq,
                entity: comment.clone(),
            },
        );
        Ok(())
    }

    async fn list_comments(&self) -> TrackerRepositoryResult<Vec<Comment>> {
        let state = self.read_state()?;
        Ok(most_recent_first(&state.comments, Comment::created_at))
    }

    async fn comments_for_task(&self, task_id: TaskId) -> TrackerRepositoryResult<Vec<Comment>> {
        let state = self.read_state()?;
        let mut rows: Vec<&StoredEntry<Comment>> = state
            .comments
            .values()
            .filter(|entry| entry.entity.task_id() == task_id)
            .collect();
        rows.sort_by(|a, b| {
            b.entity
                .created_at()
                .cmp(&a.entity.created_at())
                .then_with(|| b.seq.cmp(&a.seq))
        });
        Ok(rows.into_iter().map(|entry| entry.entity.clone()).collect())
    }

    async fn delete_comment(&self, id: CommentId) -> TrackerRepositoryResult<bool> {
        let mut state = self.write_state()?;
        Ok(state.comments.remove(&id).is_some())
    }
}
