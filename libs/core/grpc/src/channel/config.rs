use std::time::Duration;
use tonic::transport::Endpoint;

/// Configuration for gRPC channel creation
///
/// Connect timeout plus HTTP/2 keep-alive, applied to every [`Endpoint`].
/// Per-call deadlines are set by callers (`grpc-timeout`), not here.
#[derive(Debug, Clone)]
pub struct ChannelConfig {
  pub connect_timeout: Duration,

  // HTTP/2 Keep-Alive
  pub http2_keep_alive_interval: Option<Duration>,
  pub keep_alive_timeout: Duration,
  pub keep_alive_while_idle: bool,
}

impl Default for ChannelConfig {
  fn default() -> Self {
    Self {
      connect_timeout: Duration::from_secs(5),
      http2_keep_alive_interval: Some(Duration::from_secs(30)),
      keep_alive_timeout: Duration::from_secs(10),
      keep_alive_while_idle: true,
    }
  }
}

impl ChannelConfig {
  /// Set the connection timeout
  pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
    self.connect_timeout = timeout;
    self
  }

  pub(crate) fn apply_to_endpoint(self, mut endpoint: Endpoint) -> Endpoint {
    endpoint = endpoint.connect_timeout(self.connect_timeout);
    if let Some(interval) = self.http2_keep_alive_interval {
      endpoint = endpoint
        .http2_keep_alive_interval(interval)
        .keep_alive_timeout(self.keep_alive_timeout)
        .keep_alive_while_idle(self.keep_alive_while_idle);
    }
    endpoint
  }
}
