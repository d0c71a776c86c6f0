//! gRPC server-side helpers: listener configuration and health reporting.
//!
//! ```ignore
//! use grpc_client::server::{GrpcHealth, ServerConfig};
//! use rpc::todo::todo_service_server::SERVICE_NAME;
//!
//! let config = ServerConfig::from_env()?;
//! let (health, health_service) = GrpcHealth::service();
//! health.set_serving(&[SERVICE_NAME]).await;
//! ```

mod config;
mod health;

pub use config::ServerConfig;
pub use health::GrpcHealth;
