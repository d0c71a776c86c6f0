//! End-to-end scenarios against a real process: in-memory store, RPC endpoint
//! and HTTP gateway bound to ephemeral loopback ports.

use std::collections::HashSet;
use std::time::Duration;

use reqwest::StatusCode;
use rpc::todo::todo_service_client::TodoServiceClient;
use rpc::todo::{AddTaskRequest, CompleteTaskRequest, GetTasksRequest, Task};
use serde_json::{Value, json};
use todo::server::loopback_client;
use todo::{
    Config, ConsoleExit, InteractiveClient, LifecycleState, LifecycleSupervisor, RunningSupervisor,
    ShutdownCoordinator,
};
use tonic::Code;
use tonic::transport::Channel;

struct TestApp {
    shutdown: ShutdownCoordinator,
    running: RunningSupervisor,
    rpc: TodoServiceClient<Channel>,
    http: reqwest::Client,
    base_url: String,
}

impl TestApp {
    async fn spawn() -> Self {
        let shutdown = ShutdownCoordinator::new();
        let running = LifecycleSupervisor::new(Config::ephemeral(), shutdown.clone())
            .start()
            .await
            .unwrap();

        Self {
            rpc: loopback_client(running.rpc_addr()).unwrap(),
            http: reqwest::Client::new(),
            base_url: format!("http://{}", running.http_addr()),
            shutdown,
            running,
        }
    }

    async fn add(&mut self, title: &str, description: &str) -> Task {
        let request = AddTaskRequest {
            title: title.to_string(),
            description: description.to_string(),
        };
        self.rpc.add_task(request).await.unwrap().into_inner().task.unwrap()
    }

    async fn list(&mut self) -> Vec<Task> {
        self.rpc
            .get_tasks(GetTasksRequest {})
            .await
            .unwrap()
            .into_inner()
            .tasks
    }

    async fn complete(&mut self, id: i32) -> Result<Task, tonic::Status> {
        let response = self.rpc.complete_task(CompleteTaskRequest { id }).await?;
        Ok(response.into_inner().task.unwrap())
    }

    async fn stop(self) {
        let mut states = self.running.subscribe();
        self.shutdown.shutdown();
        tokio::time::timeout(Duration::from_secs(10), self.running.wait())
            .await
            .unwrap();
        assert_eq!(*states.borrow_and_update(), LifecycleState::Stopped);
    }
}

fn millis(ts: &Option<prost_types::Timestamp>) -> i64 {
    let ts = ts.as_ref().unwrap();
    ts.seconds * 1_000 + i64::from(ts.nanos) / 1_000_000
}

#[tokio::test]
async fn test_add_then_list_round_trip() {
    let mut app = TestApp::spawn().await;

    let added = app.add("Buy milk", "2%").await;
    assert!(added.id > 0);
    assert!(!added.is_completed);
    assert_eq!(added.created_at, added.updated_at);

    let tasks = app.list().await;
    assert_eq!(tasks, vec![added]);

    app.stop().await;
}

#[tokio::test]
async fn test_complete_then_complete_again() {
    let mut app = TestApp::spawn().await;
    let added = app.add("Ship release", "").await;

    let first = app.complete(added.id).await.unwrap();
    assert_eq!(first.id, added.id);
    assert!(first.is_completed);
    assert!(millis(&first.updated_at) >= millis(&added.updated_at));

    let second = app.complete(added.id).await.unwrap();
    assert!(second.is_completed);
    assert!(millis(&second.updated_at) >= millis(&first.updated_at));
    assert_eq!(second.created_at, added.created_at);

    let listed = app.list().await;
    assert!(listed[0].is_completed);

    app.stop().await;
}

#[tokio::test]
async fn test_complete_touches_only_the_named_task() {
    let mut app = TestApp::spawn().await;
    let first = app.add("A", "").await;
    let second = app.add("B", "").await;

    app.complete(first.id).await.unwrap();

    let listed = app.list().await;
    assert_eq!(listed.len(), 2);
    assert_eq!((listed[0].id, listed[0].is_completed), (first.id, true));
    assert_eq!(listed[1], second);

    let body: Value = app
        .http
        .get(format!("{}/v1/tasks", app.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let listed = body["tasks"].as_array().unwrap();
    assert_eq!(listed[0]["title"], "A");
    assert_eq!(listed[0]["isCompleted"], true);
    assert_eq!(listed[1]["title"], "B");
    assert_eq!(listed[1]["isCompleted"], false);

    app.stop().await;
}

#[tokio::test]
async fn test_complete_unknown_id_on_both_transports() {
    let mut app = TestApp::spawn().await;
    app.add("Existing", "").await;

    let status = app.complete(9999).await.unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let response = app
        .http
        .post(format!("{}/v1/tasks/9999/complete", app.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], 5);

    let tasks = app.list().await;
    assert_eq!(tasks.len(), 1);
    assert!(!tasks[0].is_completed);

    app.stop().await;
}

#[tokio::test]
async fn test_blank_title_persists_nothing() {
    let mut app = TestApp::spawn().await;

    let status = app
        .rpc
        .add_task(AddTaskRequest {
            title: String::new(),
            description: "no title".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::InvalidArgument);

    let response = app
        .http
        .post(format!("{}/v1/tasks", app.base_url))
        .json(&json!({ "title": "   ", "description": "still no title" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], 3);

    assert!(app.list().await.is_empty());

    app.stop().await;
}

#[tokio::test]
async fn test_transports_share_one_store() {
    let mut app = TestApp::spawn().await;

    let response = app
        .http
        .post(format!("{}/v1/tasks", app.base_url))
        .json(&json!({ "title": "From HTTP", "description": "gateway" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    let http_id = body["task"]["id"].as_i64().unwrap();
    assert_eq!(body["task"]["isCompleted"], false);
    assert!(body["task"]["createdAt"].is_string());

    let rpc_task = app.add("From RPC", "native").await;

    let rpc_ids: Vec<i64> = app.list().await.iter().map(|t| i64::from(t.id)).collect();
    assert_eq!(rpc_ids, vec![http_id, i64::from(rpc_task.id)]);

    let response = app
        .http
        .post(format!("{}/v1/tasks/{}/complete", app.base_url, rpc_task.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["task"]["isCompleted"], true);

    let body: Value = app
        .http
        .get(format!("{}/v1/tasks", app.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let listed = body["tasks"].as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["title"], "From HTTP");
    assert_eq!(listed[0]["isCompleted"], false);
    assert_eq!(listed[1]["title"], "From RPC");
    assert_eq!(listed[1]["isCompleted"], true);

    let rpc_view = app.list().await;
    assert!(!rpc_view[0].is_completed);
    assert!(rpc_view[1].is_completed);

    app.stop().await;
}

#[tokio::test]
async fn test_concurrent_adds_get_distinct_ids() {
    let app = TestApp::spawn().await;

    let adds = (0..20).map(|i| {
        let mut client = app.rpc.clone();
        tokio::spawn(async move {
            let request = AddTaskRequest {
                title: format!("Task {}", i),
                description: String::new(),
            };
            client.add_task(request).await.unwrap().into_inner().task.unwrap().id
        })
    });

    let mut ids = HashSet::new();
    for handle in adds.collect::<Vec<_>>() {
        assert!(ids.insert(handle.await.unwrap()));
    }
    assert_eq!(ids.len(), 20);

    app.stop().await;
}

#[tokio::test]
async fn test_health_reports_serving() {
    use tonic_health::pb::HealthCheckRequest;
    use tonic_health::pb::health_check_response::ServingStatus;
    use tonic_health::pb::health_client::HealthClient;

    let app = TestApp::spawn().await;
    let channel = grpc_client::create_channel(format!("http://{}", app.running.rpc_addr()))
        .await
        .unwrap();
    let mut health = HealthClient::new(channel);

    let response = health
        .check(HealthCheckRequest {
            service: "todo.v1.TodoService".to_string(),
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(response.status, ServingStatus::Serving as i32);

    let liveness: Value = app
        .http
        .get(format!("{}/healthz", app.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(liveness["status"], "ok");

    app.stop().await;
}

#[tokio::test]
async fn test_console_session() {
    let app = TestApp::spawn().await;
    let script = "1\nBuy milk\n2%\n2\n3\n1\n3\n42\n2\n4\n";

    let mut output = Vec::new();
    let console = InteractiveClient::new(
        app.rpc.clone(),
        script.as_bytes(),
        &mut output,
        app.shutdown.token(),
    );
    let exit = console.run().await.unwrap();
    let output = String::from_utf8(output).unwrap();

    assert_eq!(exit, ConsoleExit::Requested);
    assert!(output.contains("Task added successfully!"));
    assert!(output.contains("ID: 1, Title: Buy milk, Description: 2%, Status: Incomplete"));
    assert!(output.contains("Task completed successfully!"));
    assert!(output.contains("Error: Task 42 not found"));
    assert!(output.contains("ID: 1, Title: Buy milk, Description: 2%, Status: Completed"));

    // Leaving the console does not stop the servers.
    assert_eq!(app.running.state(), LifecycleState::Running);
    app.stop().await;
}
