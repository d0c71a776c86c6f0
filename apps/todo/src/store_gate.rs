//! Store access fence for shutdown
//!
//! Handlers can outlive the server that spawned them (an aborted RPC
//! endpoint does not cancel calls already handed to the executor). Every
//! store call goes through a [`GatedStore`]; once the [`StoreGate`] is
//! closed new calls fail and `close` returns only after in-flight calls
//! have finished.

use std::sync::Arc;

use async_trait::async_trait;
use domain_tasks::{CreateTask, Task, TaskError, TaskResult, TaskStore};
use tokio_util::task::TaskTracker;
use tokio_util::task::task_tracker::TaskTrackerToken;

/// [`TaskStore`] wrapper that refuses calls once its gate is closed.
pub struct GatedStore {
    inner: Arc<dyn TaskStore>,
    tracker: TaskTracker,
}

/// Closing side of a [`GatedStore`].
#[derive(Clone)]
pub struct StoreGate {
    tracker: TaskTracker,
}

impl GatedStore {
    pub fn new(inner: Arc<dyn TaskStore>) -> (Self, StoreGate) {
        let tracker = TaskTracker::new();
        let gate = StoreGate {
            tracker: tracker.clone(),
        };
        (Self { inner, tracker }, gate)
    }

    // Token first, then the check: a call that races `close` is either
    // rejected or waited for.
    fn enter(&self) -> TaskResult<TaskTrackerToken> {
        let token = self.tracker.token();
        if self.tracker.is_closed() {
            return Err(TaskError::Store("task store is closed".to_string()));
        }
        Ok(token)
    }
}

impl StoreGate {
    /// Reject new calls and wait for the ones in flight.
    pub async fn close(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }

    pub fn is_closed(&self) -> bool {
        self.tracker.is_closed()
    }
}

#[async_trait]
impl TaskStore for GatedStore {
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let _token = self.enter()?;
        self.inner.create(input).await
    }

    async fn find_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        let _token = self.enter()?;
        self.inner.find_by_id(id).await
    }

    async fn update(&self, task: Task) -> TaskResult<Task> {
        let _token = self.enter()?;
        self.inner.update(task).await
    }

    async fn list_all(&self) -> TaskResult<Vec<Task>> {
        let _token = self.enter()?;
        self.inner.list_all().await
    }
}
