use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{
    error::{TaskError, TaskResult},
    models::{CreateTask, Task},
    store::TaskStore,
};

#[derive(Default)]
struct Inner {
    last_id: i32,
    tasks: BTreeMap<i32, Task>,
}

/// Process-local [`TaskStore`] for tests and `STORE_BACKEND=memory`.
///
/// Ids start at 1 and are never reused. Clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryTaskStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let mut inner = self.inner.write().await;
        let id = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| TaskError::Store("task id sequence exhausted".to_string()))?;
        inner.last_id = id;

        let now = chrono::Utc::now();
        let task = Task {
            id,
            title: input.title,
            description: input.description,
            is_completed: false,
            created_at: now,
            updated_at: now,
        };
        inner.tasks.insert(id, task.clone());

        tracing::info!(task_id = id, "Created task");
        Ok(task)
    }

    async fn find_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        Ok(self.inner.read().await.tasks.get(&id).cloned())
    }

    async fn update(&self, task: Task) -> TaskResult<Task> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .tasks
            .get_mut(&task.id)
            .ok_or(TaskError::NotFound(task.id))?;
        *slot = task.clone();

        tracing::info!(task_id = task.id, is_completed = task.is_completed, "Updated task");
        Ok(task)
    }

    async fn list_all(&self) -> TaskResult<Vec<Task>> {
        Ok(self.inner.read().await.tasks.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_ids_are_sequential_from_one() {
        let store = InMemoryTaskStore::new();
        let a = store.create(CreateTask::new("A", "")).await.unwrap();
        let b = store.create(CreateTask::new("B", "")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(a.created_at, a.updated_at);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let store = InMemoryTaskStore::new();
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move { store.create(CreateTask::new(format!("t{i}"), "")).await })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap().unwrap().id);
        }
        assert_eq!(ids.len(), 32);
        assert_eq!(store.list_all().await.unwrap().len(), 32);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = InMemoryTaskStore::new();
        let mut task = store.create(CreateTask::new("A", "")).await.unwrap();
        task.id = 99;
        assert!(matches!(store.update(task).await, Err(TaskError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_list_all_is_ordered_by_id() {
        let store = InMemoryTaskStore::new();
        for title in ["C", "A", "B"] {
            store.create(CreateTask::new(title, "")).await.unwrap();
        }
        let titles: Vec<_> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }
}
