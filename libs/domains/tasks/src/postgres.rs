use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{CreateTask, Task},
    store::TaskStore,
};

/// [`TaskStore`] backed by PostgreSQL through SeaORM.
#[derive(Clone)]
pub struct PgTaskStore {
    db: DatabaseConnection,
}

impl PgTaskStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Hands the connection back so the caller can close the pool.
    pub fn into_inner(self) -> DatabaseConnection {
        self.db
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn create(&self, input: CreateTask) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, task: Task) -> TaskResult<Task> {
        let id = task.id;
        let active_model: entity::ActiveModel = task.into();
        let model = active_model.update(&self.db).await.map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => TaskError::NotFound(id),
            other => other.into(),
        })?;

        tracing::info!(task_id = model.id, is_completed = model.is_completed, "Updated task");
        Ok(model.into())
    }

    async fn list_all(&self) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn model(id: i32, title: &str, is_completed: bool) -> entity::Model {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        entity::Model {
            id,
            title: title.to_string(),
            description: String::new(),
            is_completed,
            created_at: ts.into(),
            updated_at: ts.into(),
        }
    }

    #[tokio::test]
    async fn test_create_returns_assigned_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(7, "Buy milk", false)]])
            .into_connection();
        let store = PgTaskStore::new(db);

        let task = store.create(CreateTask::new("Buy milk", "")).await.unwrap();

        assert_eq!(task.id, 7);
        assert!(!task.is_completed);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let store = PgTaskStore::new(db);

        assert!(store.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "A", true), model(2, "B", false)]])
            .into_connection();
        let store = PgTaskStore::new(db);

        let tasks = store.list_all().await.unwrap();
        assert_eq!(tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(tasks[0].is_completed);
        assert!(!tasks[1].is_completed);
    }

    #[tokio::test]
    async fn test_update_saves_completion() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .append_query_results([vec![model(3, "A", true)]])
            .into_connection();
        let store = PgTaskStore::new(db);

        let mut task: Task = model(3, "A", false).into();
        task.mark_completed(Utc::now());
        let saved = store.update(task).await.unwrap();

        assert!(saved.is_completed);
    }

    #[tokio::test]
    async fn test_store_failure_is_wrapped() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".into())])
            .into_connection();
        let store = PgTaskStore::new(db);

        let err = store.list_all().await.unwrap_err();
        assert!(matches!(err, TaskError::Store(ref msg) if msg.contains("connection refused")));
    }
}
