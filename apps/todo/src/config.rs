use std::time::Duration;

use core_config::{FromEnv, env_flag, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;
use strum::{Display, EnumString};

pub use core_config::Environment;

/// Where tasks are persisted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum StoreBackend {
    #[default]
    Postgres,
    Memory,
}

/// Application configuration, built once at startup and passed down by value.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,
    pub store: StoreBackend,
    pub database: PostgresConfig,
    pub grpc: grpc_client::server::ServerConfig,
    pub http: ServerConfig,
    /// Upper bound on the gateway drain once shutdown begins
    pub shutdown_timeout: Duration,
    /// Per-request deadline applied by the gateway
    pub request_timeout: Duration,
    pub interactive: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let store = env_parse("STORE_BACKEND", StoreBackend::default())?;
        let database = PostgresConfig::from_env()?;
        let grpc = grpc_client::server::ServerConfig::from_env()?;
        let http = ServerConfig::from_env()?;
        let shutdown_timeout = Duration::from_secs(env_parse("HTTP_SHUTDOWN_TIMEOUT_SECS", 5)?);
        let request_timeout = Duration::from_secs(env_parse("HTTP_REQUEST_TIMEOUT_SECS", 30)?);
        let interactive = env_flag("INTERACTIVE", true)?;

        Ok(Self {
            environment,
            store,
            database,
            grpc,
            http,
            shutdown_timeout,
            request_timeout,
            interactive,
        })
    }

    /// In-memory store, ephemeral loopback ports, no console.
    ///
    /// Used by integration tests and local demos.
    pub fn ephemeral() -> Self {
        Self {
            environment: Environment::Development,
            store: StoreBackend::Memory,
            database: PostgresConfig::from_parts("localhost", 5432, "postgres", "postgres", "todo_app"),
            grpc: grpc_client::server::ServerConfig::new()
                .with_host("127.0.0.1")
                .with_port(0),
            http: ServerConfig::new("127.0.0.1", 0),
            shutdown_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            interactive: false,
        }
    }
}
