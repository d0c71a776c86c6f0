//! RPC endpoint lifecycle
//!
//! Serves `todo.v1.TodoService` plus `grpc.health.v1.Health` on an already
//! bound listener until the shutdown token fires.

use std::net::SocketAddr;
use std::time::Duration;

use domain_tasks::{TaskService, TaskStore};
use grpc_client::server::{GrpcHealth, ServerConfig};
use grpc_client::{ChannelConfig, GrpcResult, create_channel_lazy_with_config};
use rpc::todo::todo_service_client::TodoServiceClient;
use rpc::todo::todo_service_server::{SERVICE_NAME, TodoServiceServer};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::codec::CompressionEncoding;
use tonic::transport::{Channel, Server};
use tracing::info;

use crate::service::TodoServiceImpl;

/// Serve the RPC endpoint on `listener`.
///
/// In-flight calls are allowed to finish once `shutdown` is cancelled; the
/// health service reports NOT_SERVING from that moment on. Calls that overrun
/// the drain budget are cut off by the supervisor aborting this future.
///
/// # Errors
///
/// Returns an error if the transport fails while serving.
pub async fn serve<S>(
    listener: TcpListener,
    service: TaskService<S>,
    config: &ServerConfig,
    shutdown: CancellationToken,
) -> Result<(), tonic::transport::Error>
where
    S: TaskStore + ?Sized + 'static,
{
    let mut todo_service = TodoServiceServer::new(TodoServiceImpl::new(service));
    if config.enable_compression {
        todo_service = todo_service
            .accept_compressed(CompressionEncoding::Zstd)
            .send_compressed(CompressionEncoding::Zstd);
    }

    let (health, health_service) = GrpcHealth::service();
    health.set_serving(&[SERVICE_NAME]).await;

    if let Ok(addr) = listener.local_addr() {
        info!(%addr, compression = config.enable_compression, "TodoService listening");
    }

    let signal = async move {
        shutdown.cancelled().await;
        health.set_not_serving(&[SERVICE_NAME]).await;
        info!("RPC server draining in-flight calls");
    };

    Server::builder()
        .add_service(health_service)
        .add_service(todo_service)
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), signal)
        .await?;

    info!("RPC server stopped");
    Ok(())
}

/// Client for the RPC endpoint bound at `addr`.
///
/// The channel is lazy so callers can be built before the server accepts its
/// first connection.
pub fn loopback_client(addr: SocketAddr) -> GrpcResult<TodoServiceClient<Channel>> {
    let channel = create_channel_lazy_with_config(
        ServerConfig::loopback_uri(addr),
        ChannelConfig::default().with_connect_timeout(Duration::from_secs(2)),
    )?;
    Ok(TodoServiceClient::new(channel))
}
