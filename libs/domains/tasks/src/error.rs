use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found: {0}")]
    NotFound(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

impl From<sea_orm::DbErr> for TaskError {
    fn from(err: sea_orm::DbErr) -> Self {
        TaskError::Store(err.to_string())
    }
}

/// Validation → INVALID_ARGUMENT, not found → NOT_FOUND, store → INTERNAL.
///
/// Store details are logged here and replaced with a generic message so
/// connection strings or SQL never reach a client.
impl From<TaskError> for tonic::Status {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Validation(msg) => tonic::Status::invalid_argument(msg),
            TaskError::NotFound(id) => tonic::Status::not_found(format!("Task {} not found", id)),
            TaskError::Store(details) => {
                tracing::error!(error = %details, "Task store operation failed");
                tonic::Status::internal("Internal store error")
            }
        }
    }
}
