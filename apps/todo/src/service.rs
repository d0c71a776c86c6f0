//! gRPC service implementation
//!
//! Thin adapter between `todo.v1.TodoService` and the domain [`TaskService`].
//! Validation and completion rules live in the domain layer; this module only
//! converts messages and maps [`domain_tasks::TaskError`] onto [`Status`].

use std::sync::Arc;

use domain_tasks::conversions::tasks_to_response;
use domain_tasks::{TaskService, TaskStore};
use rpc::todo::todo_service_server::TodoService;
use rpc::todo::{AddTaskRequest, CompleteTaskRequest, GetTasksRequest, GetTasksResponse, TaskResponse};
use tonic::{Request, Response, Status};

/// gRPC service implementation for `todo.v1.TodoService`
pub struct TodoServiceImpl<S>
where
    S: TaskStore + ?Sized + 'static,
{
    service: Arc<TaskService<S>>,
}

impl<S> TodoServiceImpl<S>
where
    S: TaskStore + ?Sized + 'static,
{
    pub fn new(service: TaskService<S>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[tonic::async_trait]
impl<S> TodoService for TodoServiceImpl<S>
where
    S: TaskStore + ?Sized + 'static,
{
    async fn add_task(&self, request: Request<AddTaskRequest>) -> Result<Response<TaskResponse>, Status> {
        let task = self.service.add_task(request.into_inner().into()).await?;

        Ok(Response::new(task.into()))
    }

    async fn get_tasks(
        &self,
        _request: Request<GetTasksRequest>,
    ) -> Result<Response<GetTasksResponse>, Status> {
        let tasks = self.service.get_tasks().await?;

        Ok(Response::new(tasks_to_response(tasks)))
    }

    async fn complete_task(
        &self,
        request: Request<CompleteTaskRequest>,
    ) -> Result<Response<TaskResponse>, Status> {
        let task = self.service.complete_task(request.into_inner().id).await?;

        Ok(Response::new(task.into()))
    }
}
