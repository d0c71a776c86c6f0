use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the tasks table
///
/// ```sql
/// CREATE TABLE tasks (
///     id           SERIAL PRIMARY KEY,
///     title        TEXT NOT NULL,
///     description  TEXT NOT NULL DEFAULT '',
///     is_completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at   TIMESTAMPTZ NOT NULL,
///     updated_at   TIMESTAMPTZ NOT NULL
/// );
/// ```
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub is_completed: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Task {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            is_completed: model.is_completed,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Insert model: the id is left to the `SERIAL` sequence.
impl From<crate::models::CreateTask> for ActiveModel {
    fn from(input: crate::models::CreateTask) -> Self {
        let now = chrono::Utc::now();
        ActiveModel {
            id: NotSet,
            title: Set(input.title),
            description: Set(input.description),
            is_completed: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}

/// Full-row save of an existing task.
impl From<crate::models::Task> for ActiveModel {
    fn from(task: crate::models::Task) -> Self {
        ActiveModel {
            id: Set(task.id),
            title: Set(task.title),
            description: Set(task.description),
            is_completed: Set(task.is_completed),
            created_at: Set(task.created_at.into()),
            updated_at: Set(task.updated_at.into()),
        }
    }
}
