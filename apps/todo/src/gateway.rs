//! HTTP/JSON gateway lifecycle
//!
//! The router itself lives in `domain_tasks::handlers`; this module adds the
//! HTTP middleware stack and owns the bounded drain on shutdown.

use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use domain_tasks::{GatewayState, gateway_router};
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use hyper_util::service::TowerToHyperService;
use rpc::todo::todo_service_client::TodoServiceClient;
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tonic::transport::Channel;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, debug, info, warn};

#[derive(Debug, Error)]
pub enum GatewayServeError {
    #[error("HTTP server failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP drain did not finish within {0:?}")]
    DrainTimeout(Duration),
}

/// Gateway router with tracing and a per-request timeout.
///
/// The timeout is also forwarded to the RPC call as `grpc-timeout`, so the
/// server abandons work the HTTP client is no longer waiting for.
pub fn router(client: TodoServiceClient<Channel>, request_timeout: Duration) -> Router {
    let state = GatewayState::new(client).with_request_timeout(request_timeout);

    gateway_router(state)
        .layer(TimeoutLayer::with_status_code(StatusCode::GATEWAY_TIMEOUT, request_timeout))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Serve `router` until `shutdown` fires, then drain for at most `drain_timeout`.
///
/// Each connection runs in its own task. On shutdown the listener is closed
/// and every connection finishes its in-flight request; connections still
/// open when the drain deadline passes are aborted and their sockets closed.
///
/// # Errors
///
/// Returns an error if the listener address cannot be read or the drain
/// deadline is exceeded.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    shutdown: CancellationToken,
    drain_timeout: Duration,
) -> Result<(), GatewayServeError> {
    let addr = listener.local_addr()?;
    info!(%addr, "HTTP gateway listening");

    let mut connections = JoinSet::new();
    loop {
        let (stream, peer) = tokio::select! {
            _ = shutdown.cancelled() => break,
            accepted = listener.accept() => match accepted {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "Failed to accept HTTP connection");
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    continue;
                }
            },
        };
        while connections.try_join_next().is_some() {}
        connections.spawn(serve_connection(stream, peer, router.clone(), shutdown.clone()));
    }
    drop(listener);

    info!(timeout = ?drain_timeout, open = connections.len(), "HTTP gateway draining");
    let drained = tokio::time::timeout(drain_timeout, async {
        while connections.join_next().await.is_some() {}
    })
    .await;

    if drained.is_ok() {
        info!("HTTP gateway stopped");
        return Ok(());
    }

    warn!(timeout = ?drain_timeout, open = connections.len(), "HTTP drain timed out, closing open connections");
    connections.shutdown().await;
    Err(GatewayServeError::DrainTimeout(drain_timeout))
}

async fn serve_connection(
    stream: TcpStream,
    peer: SocketAddr,
    router: Router,
    shutdown: CancellationToken,
) {
    let service = TowerToHyperService::new(router);
    let conn = http1::Builder::new()
        .serve_connection(TokioIo::new(stream), service)
        .with_upgrades();
    let mut conn = std::pin::pin!(conn);
    let mut cancelled = std::pin::pin!(shutdown.cancelled_owned());
    let mut draining = false;

    loop {
        tokio::select! {
            result = conn.as_mut() => {
                if let Err(e) = result {
                    debug!(%peer, error = %e, "HTTP connection closed with error");
                }
                break;
            }
            _ = &mut cancelled, if !draining => {
                draining = true;
                conn.as_mut().graceful_shutdown();
            }
        }
    }
}
