//! HTTP/JSON gateway over `todo.v1.TodoService`
//!
//! Every route transcodes its request into the matching RPC and the RPC
//! result back into JSON. No validation or business rule lives here.
//!
//! | RPC | Route |
//! |---|---|
//! | AddTask | `POST /v1/tasks` |
//! | GetTasks | `GET /v1/tasks` |
//! | CompleteTask | `POST /v1/tasks/{id}/complete` |

mod error;
mod grpc;

use axum::{
    Json, Router,
    routing::{get, post},
};
use rpc::todo::todo_service_client::TodoServiceClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tonic::transport::Channel;
use utoipa::{OpenApi, ToSchema};

use crate::models::Task;

pub use error::{ErrorResponse, GatewayError, http_status};

/// JSON body of `POST /v1/tasks`; absent fields default to empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AddTaskBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// `{"task": {...}}`, the JSON form of `TaskResponse`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskEnvelope {
    pub task: Task,
}

/// `{"tasks": [...]}`, the JSON form of `GetTasksResponse`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct Liveness {
    pub status: String,
}

/// OpenAPI documentation for the gateway
#[derive(OpenApi)]
#[openapi(
    paths(grpc::add_task, grpc::get_tasks, grpc::complete_task),
    components(schemas(Task, AddTaskBody, TaskEnvelope, TaskList, ErrorResponse)),
    tags(
        (name = "tasks", description = "Task operations transcoded to todo.v1.TodoService")
    )
)]
pub struct GatewayApiDoc;

/// Shared by every gateway handler
#[derive(Clone)]
pub struct GatewayState {
    client: TodoServiceClient<Channel>,
    request_timeout: Option<Duration>,
}

impl GatewayState {
    pub fn new(client: TodoServiceClient<Channel>) -> Self {
        Self {
            client,
            request_timeout: None,
        }
    }

    /// Deadline forwarded to the RPC server as `grpc-timeout`.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    fn request<T>(&self, message: T) -> tonic::Request<T> {
        let mut request = tonic::Request::new(message);
        if let Some(timeout) = self.request_timeout {
            request.set_timeout(timeout);
        }
        request
    }
}

/// Create router for the gRPC-backed gateway
pub fn gateway_router(state: GatewayState) -> Router {
    Router::new()
        .route("/v1/tasks", get(grpc::get_tasks).post(grpc::add_task))
        .route("/v1/tasks/{id}/complete", post(grpc::complete_task))
        .route("/healthz", get(liveness))
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
}

async fn liveness() -> Json<Liveness> {
    Json(Liveness {
        status: "ok".to_string(),
    })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(GatewayApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// Nothing listens on port 1, so any request that reaches the RPC layer fails.
    fn app() -> Router {
        let channel = tonic::transport::Endpoint::from_static("http://127.0.0.1:1")
            .connect_timeout(Duration::from_millis(200))
            .connect_lazy();
        gateway_router(GatewayState::new(TodoServiceClient::new(channel)))
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/tasks")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["code"], 3);
        assert_eq!(body["error"], "INVALID_ARGUMENT");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_bad_request() {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/tasks/abc/complete")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unreachable_rpc_is_server_error() {
        let request = Request::builder()
            .method("GET")
            .uri("/v1/tasks")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert!(response.status().is_server_error());
        let body = json_body(response).await;
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_liveness() {
        let request = Request::builder().uri("/healthz").body(Body::empty()).unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_openapi_lists_gateway_routes() {
        let request = Request::builder()
            .uri("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        let body = json_body(response).await;
        assert!(body["paths"]["/v1/tasks"].is_object());
        assert!(body["paths"]["/v1/tasks/{id}/complete"].is_object());
    }
}
