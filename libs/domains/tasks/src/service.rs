use chrono::Utc;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{CreateTask, Task};
use crate::store::TaskStore;

/// Service layer for Task business logic
///
/// Holds only a shared handle to the store, so clones can serve concurrent
/// requests without further synchronisation.
pub struct TaskService<S: TaskStore + ?Sized> {
    store: Arc<S>,
}

impl<S: TaskStore + ?Sized> Clone for TaskService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: TaskStore> TaskService<S> {
    pub fn new(store: S) -> Self {
        Self::from_arc(Arc::new(store))
    }
}

impl<S: TaskStore + ?Sized> TaskService<S> {
    pub fn from_arc(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create a new task with validation
    #[instrument(skip(self, input), fields(task_title = %input.title))]
    pub async fn add_task(&self, input: CreateTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(e.to_string()))?;

        self.store.create(input).await
    }

    /// Every task in the store; an empty list is not an error
    #[instrument(skip(self))]
    pub async fn get_tasks(&self) -> TaskResult<Vec<Task>> {
        self.store.list_all().await
    }

    /// Mark a task as completed
    ///
    /// Re-applies on an already completed task: the row is saved again with a
    /// refreshed `updated_at`.
    #[instrument(skip(self), fields(task_id = id))]
    pub async fn complete_task(&self, id: i32) -> TaskResult<Task> {
        let mut task = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        task.mark_completed(Utc::now());
        self.store.update(task).await
    }
}
