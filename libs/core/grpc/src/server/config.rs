//! Listener configuration loaded from environment variables.

use core_config::{ConfigError, FromEnv, env_flag, env_or_default, env_parse};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

/// Configuration for the gRPC listener.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to (default: 0.0.0.0)
    pub host: String,
    /// Port to listen on (default: 50054)
    pub port: u16,
    /// Enable Zstd compression (default: true)
    pub enable_compression: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 50054,
            enable_compression: true,
        }
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_compression(mut self, enable: bool) -> Self {
        self.enable_compression = enable;
        self
    }

    /// Get the socket address to bind to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.addr_string().parse().map_err(|e| ConfigError::ParseError {
            key: "GRPC_HOST".to_string(),
            details: format!("{}: {}", self.addr_string(), e),
        })
    }

    /// Get the address string (for logging).
    pub fn addr_string(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// URI a co-located client dials to reach a listener bound at `addr`.
    ///
    /// Wildcard binds are rewritten to the matching loopback address.
    pub fn loopback_uri(addr: SocketAddr) -> String {
        let ip = match addr.ip() {
            IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
            IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
            ip => ip,
        };
        format!("http://{}", SocketAddr::new(ip, addr.port()))
    }
}

impl FromEnv for ServerConfig {
    /// Reads:
    /// - `GRPC_HOST` (default: 0.0.0.0)
    /// - `GRPC_PORT` (default: 50054)
    /// - `GRPC_COMPRESSION` (default: true)
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env_or_default("GRPC_HOST", &Ipv4Addr::UNSPECIFIED.to_string()),
            port: env_parse("GRPC_PORT", 50054)?,
            enable_compression: env_flag("GRPC_COMPRESSION", true)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.addr_string(), "0.0.0.0:50054");
        assert!(config.enable_compression);
    }

    #[test]
    fn test_from_env() {
        temp_env::with_vars(
            [
                ("GRPC_HOST", Some("127.0.0.1")),
                ("GRPC_PORT", Some("6000")),
                ("GRPC_COMPRESSION", Some("false")),
            ],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:6000");
                assert!(!config.enable_compression);
            },
        );
    }

    #[test]
    fn test_from_env_invalid_port() {
        temp_env::with_var("GRPC_PORT", Some("grpc"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("GRPC_PORT"));
        });
    }

    #[test]
    fn test_loopback_uri_rewrites_wildcards() {
        let v4: SocketAddr = "0.0.0.0:50054".parse().unwrap();
        assert_eq!(ServerConfig::loopback_uri(v4), "http://127.0.0.1:50054");

        let v6: SocketAddr = "[::]:7000".parse().unwrap();
        assert_eq!(ServerConfig::loopback_uri(v6), "http://[::1]:7000");

        let fixed: SocketAddr = "10.0.0.5:1234".parse().unwrap();
        assert_eq!(ServerConfig::loopback_uri(fixed), "http://10.0.0.5:1234");
    }
}
