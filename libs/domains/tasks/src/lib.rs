//! Tasks Domain
//!
//! Everything the todo services know about a task: the model, the storage
//! seam, the business rules and the HTTP/JSON gateway that transcodes onto
//! the `todo.v1.TodoService` RPC contract.
//!
//! # Architecture
//!
//! ```text
//!  HTTP/JSON ──► handlers (gateway) ──► TodoServiceClient ─┐
//!                                                          │ gRPC
//!  gRPC clients ───────────────────────────────────────────┤
//!                                                          ▼
//!                                  ┌─────────────┐  (apps/todo)
//!                                  │ TaskService │  ← validation, completion rules
//!                                  └──────┬──────┘
//!                                  ┌──────▼──────┐
//!                                  │  TaskStore  │  ← PgTaskStore | InMemoryTaskStore
//!                                  └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{CreateTask, PgTaskStore, TaskService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://...").await?;
//! let service = TaskService::new(PgTaskStore::new(db));
//! let task = service.add_task(CreateTask::new("Buy milk", "2%")).await?;
//! # Ok(())
//! # }
//! ```

pub mod conversions;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod service;
pub mod store;

pub use error::{TaskError, TaskResult};
pub use handlers::{GatewayApiDoc, GatewayState, gateway_router};
pub use memory::InMemoryTaskStore;
pub use models::{CompletionStatus, CreateTask, Task};
pub use postgres::PgTaskStore;
pub use service::TaskService;
pub use store::TaskStore;
