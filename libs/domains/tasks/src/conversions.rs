//! Proto ↔ domain conversions for `todo.v1`
//!
//! Timestamp helpers come from `grpc_client::conversions`.

use grpc_client::conversions::{datetime_to_timestamp, timestamp_to_datetime};
use rpc::todo as proto;

use crate::models::{CreateTask, Task};

impl From<Task> for proto::Task {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            is_completed: task.is_completed,
            created_at: Some(datetime_to_timestamp(task.created_at)),
            updated_at: Some(datetime_to_timestamp(task.updated_at)),
        }
    }
}

impl TryFrom<proto::Task> for Task {
    type Error = String;

    fn try_from(task: proto::Task) -> Result<Self, Self::Error> {
        let created_at = task
            .created_at
            .as_ref()
            .ok_or_else(|| format!("Task {} is missing created_at", task.id))
            .and_then(timestamp_to_datetime)?;
        // Older servers only guarantee id/isCompleted on completion; fall back to created_at.
        let updated_at = match task.updated_at.as_ref() {
            Some(ts) => timestamp_to_datetime(ts)?,
            None => created_at,
        };

        Ok(Self {
            id: task.id,
            title: task.title,
            description: task.description,
            is_completed: task.is_completed,
            created_at,
            updated_at,
        })
    }
}

impl From<proto::AddTaskRequest> for CreateTask {
    fn from(req: proto::AddTaskRequest) -> Self {
        CreateTask::new(req.title, req.description)
    }
}

impl From<Task> for proto::TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            task: Some(task.into()),
        }
    }
}

impl TryFrom<proto::TaskResponse> for Task {
    type Error = String;

    fn try_from(response: proto::TaskResponse) -> Result<Self, Self::Error> {
        response
            .task
            .ok_or_else(|| "Response did not contain a task".to_string())?
            .try_into()
    }
}

pub fn tasks_to_response(tasks: Vec<Task>) -> proto::GetTasksResponse {
    proto::GetTasksResponse {
        tasks: tasks.into_iter().map(Into::into).collect(),
    }
}

pub fn response_to_tasks(response: proto::GetTasksResponse) -> Result<Vec<Task>, String> {
    response.tasks.into_iter().map(Task::try_from).collect()
}
