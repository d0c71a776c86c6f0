//! Todo service
//!
//! One process hosting the `todo.v1.TodoService` RPC endpoint, an HTTP/JSON
//! gateway that transcodes onto it, and an optional interactive console.
//!
//! ## Architecture
//!
//! ```text
//! HTTP/JSON ──► gateway (axum) ──┐
//!                                │ gRPC over loopback
//! console (stdin/stdout) ────────┤
//!                                ▼
//! gRPC clients ──────────► TodoServiceImpl (service.rs)
//!                                ↓
//!                          TaskService (domain layer)
//!                                ↓
//!                          GatedStore
//!                                ↓
//!                    PgTaskStore | InMemoryTaskStore
//! ```
//!
//! All units share one cancellation token owned by the
//! [`ShutdownCoordinator`]; the [`LifecycleSupervisor`] drives startup and the
//! ordered shutdown.
//!
//! ## Modules
//!
//! - `config`: environment-driven application configuration
//! - `server`: RPC endpoint lifecycle and the loopback client
//! - `gateway`: HTTP middleware stack and bounded drain
//! - `console`: interactive operator menu
//! - `shutdown`: signal handling and the shared cancellation token
//! - `store_gate`: fences store calls off once shutdown has begun
//! - `supervisor`: startup ordering and lifecycle state

pub mod config;
pub mod console;
pub mod gateway;
pub mod server;
pub mod service;
pub mod shutdown;
pub mod store_gate;
pub mod supervisor;

pub use config::{Config, StoreBackend};
pub use console::{ConsoleExit, InteractiveClient};
pub use service::TodoServiceImpl;
pub use shutdown::ShutdownCoordinator;
pub use store_gate::{GatedStore, StoreGate};
pub use supervisor::{LifecycleState, LifecycleSupervisor, RunningSupervisor, SupervisorError};
