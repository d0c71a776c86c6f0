//! # gRPC plumbing shared by the todo services
//!
//! - **Channels**: HTTP/2-tuned [`Channel`](tonic::transport::Channel)
//!   construction for the gateway and console clients
//! - **Server config**: `GRPC_HOST` / `GRPC_PORT` listener settings and the
//!   loopback URI clients use to reach them
//! - **Health**: `grpc.health.v1.Health` serving/not-serving helpers
//! - **Conversions**: `chrono` ↔ `google.protobuf.Timestamp`
//!
//! ## Quick Start
//! ```ignore
//! use grpc_client::{ChannelConfig, create_channel_lazy_with_config, server::ServerConfig};
//! use rpc::todo::todo_service_client::TodoServiceClient;
//!
//! let config = ServerConfig::from_env()?;
//! let uri = ServerConfig::loopback_uri(config.socket_addr()?);
//! let channel = create_channel_lazy_with_config(uri, ChannelConfig::default())?;
//! let client = TodoServiceClient::new(channel);
//! ```

pub mod channel;
pub mod conversions;
pub mod error;
pub mod server;

pub use channel::{
  ChannelConfig, create_channel, create_channel_lazy_with_config, create_channel_with_config,
};
pub use error::{GrpcError, GrpcResult};
