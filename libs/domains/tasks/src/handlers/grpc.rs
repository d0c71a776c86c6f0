use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use rpc::todo::{AddTaskRequest, CompleteTaskRequest, GetTasksRequest};

use super::error::{ErrorResponse, GatewayError};
use super::{AddTaskBody, GatewayState, TaskEnvelope, TaskList};
use crate::conversions::response_to_tasks;
use crate::models::Task;

/// Create a task
#[utoipa::path(
    post,
    path = "/v1/tasks",
    tag = "tasks",
    request_body = AddTaskBody,
    responses(
        (status = 200, description = "Task created", body = TaskEnvelope),
        (status = 400, description = "Blank title or malformed body", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn add_task(
    State(state): State<GatewayState>,
    body: Result<Json<AddTaskBody>, JsonRejection>,
) -> Result<Json<TaskEnvelope>, GatewayError> {
    let Json(body) = body?;
    let mut client = state.client.clone();

    let response = client
        .add_task(state.request(AddTaskRequest {
            title: body.title,
            description: body.description,
        }))
        .await?;

    let task = Task::try_from(response.into_inner()).map_err(GatewayError::Malformed)?;
    Ok(Json(TaskEnvelope { task }))
}

/// List every task
#[utoipa::path(
    get,
    path = "/v1/tasks",
    tag = "tasks",
    responses(
        (status = 200, description = "All tasks", body = TaskList),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_tasks(State(state): State<GatewayState>) -> Result<Json<TaskList>, GatewayError> {
    let mut client = state.client.clone();

    let response = client.get_tasks(state.request(GetTasksRequest {})).await?;

    let tasks = response_to_tasks(response.into_inner()).map_err(GatewayError::Malformed)?;
    Ok(Json(TaskList { tasks }))
}

/// Mark a task completed
#[utoipa::path(
    post,
    path = "/v1/tasks/{id}/complete",
    tag = "tasks",
    params(
        ("id" = i32, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task completed", body = TaskEnvelope),
        (status = 400, description = "Non-numeric task ID", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn complete_task(
    State(state): State<GatewayState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<TaskEnvelope>, GatewayError> {
    let Path(id) = id?;
    let mut client = state.client.clone();

    let response = client
        .complete_task(state.request(CompleteTaskRequest { id }))
        .await?;

    let task = Task::try_from(response.into_inner()).map_err(GatewayError::Malformed)?;
    Ok(Json(TaskEnvelope { task }))
}
