pub mod config;

pub use config::ChannelConfig;

use crate::error::{GrpcError, GrpcResult};
use tonic::transport::{Channel, Endpoint};

/// Creates a gRPC channel with the default [`ChannelConfig`] and connects eagerly.
///
/// ## Example
/// ```ignore
/// use grpc_client::create_channel;
/// use rpc::todo::todo_service_client::TodoServiceClient;
///
/// let channel = create_channel("http://127.0.0.1:50054").await?;
/// let client = TodoServiceClient::new(channel);
/// ```
pub async fn create_channel(addr: impl Into<String>) -> GrpcResult<Channel> {
  create_channel_with_config(addr, ChannelConfig::default()).await
}

/// Creates a lazy gRPC channel that connects on first request
///
/// Returns immediately without establishing a connection, so a client can be
/// built before its server has finished starting.
pub fn create_channel_lazy_with_config(
  addr: impl Into<String>,
  config: ChannelConfig,
) -> GrpcResult<Channel> {
  let addr_string = addr.into();
  let endpoint = endpoint(&addr_string, config)?;

  tracing::debug!(
    target: "grpc_client",
    addr = %addr_string,
    "Creating lazy gRPC channel (connects on first request)"
  );

  Ok(endpoint.connect_lazy())
}

/// Creates a gRPC channel with custom configuration
///
/// ## Example
/// ```ignore
/// let config = ChannelConfig::default().with_connect_timeout(Duration::from_secs(2));
///
/// let channel = create_channel_with_config("http://127.0.0.1:50054", config).await?;
/// ```
pub async fn create_channel_with_config(
  addr: impl Into<String>,
  config: ChannelConfig,
) -> GrpcResult<Channel> {
  let addr_string = addr.into();
  let endpoint = endpoint(&addr_string, config)?;

  tracing::debug!(target: "grpc_client", addr = %addr_string, "Creating gRPC channel");

  endpoint.connect().await.map_err(|e| {
    tracing::error!(
      target: "grpc_client",
      addr = %addr_string,
      error = ?e,
      "Failed to connect to gRPC service"
    );
    GrpcError::ConnectionFailed(e)
  })
}

fn endpoint(addr: &str, config: ChannelConfig) -> GrpcResult<Endpoint> {
  let endpoint = Endpoint::from_shared(addr.to_string()).map_err(|e| {
    tracing::error!(target: "grpc_client", addr = %addr, error = ?e, "Invalid URI");
    GrpcError::InvalidUri(e)
  })?;

  Ok(config.apply_to_endpoint(endpoint))
}
