use async_trait::async_trait;

use crate::error::TaskResult;
use crate::models::{CreateTask, Task};

/// Persistence seam for tasks
///
/// Implementations must be safe to call from many requests at once; the
/// service adds no locking of its own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a task, assigning a fresh id and both timestamps
    async fn create(&self, input: CreateTask) -> TaskResult<Task>;

    /// Get a task by ID
    async fn find_by_id(&self, id: i32) -> TaskResult<Option<Task>>;

    /// Save every field of an existing task
    async fn update(&self, task: Task) -> TaskResult<Task>;

    /// Every task, ordered by id ascending
    async fn list_all(&self) -> TaskResult<Vec<Task>>;
}
