use crate::{env_or_default, env_parse, ConfigError, FromEnv};
use std::net::{Ipv4Addr, SocketAddr};

/// Listener configuration for the HTTP gateway.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Reads `{PREFIX}_HOST` and `{PREFIX}_PORT`.
    pub fn from_prefixed_env(prefix: &str, default_port: u16) -> Result<Self, ConfigError> {
        let host = env_or_default(&format!("{prefix}_HOST"), &Ipv4Addr::UNSPECIFIED.to_string());
        let port = env_parse(&format!("{prefix}_PORT"), default_port)?;

        Ok(Self { host, port })
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.address().parse().map_err(|e| ConfigError::ParseError {
            key: "HTTP_HOST".to_string(),
            details: format!("{}: {}", self.address(), e),
        })
    }
}

impl FromEnv for ServerConfig {
    /// - HTTP_HOST: defaults to 0.0.0.0
    /// - HTTP_PORT: defaults to 4000
    fn from_env() -> Result<Self, ConfigError> {
        Self::from_prefixed_env("HTTP", 4000)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 4000,
        }
    }
}
