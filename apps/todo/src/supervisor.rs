//! Process lifecycle
//!
//! ```text
//! Starting ──► Running ──► ShuttingDown ──► Stopped
//!     │                                        ▲
//!     └──────────── startup failure ───────────┘
//! ```
//!
//! Startup is ordered (store, RPC listener, gateway listener, units) and any
//! failure on the way is fatal. Once running, the RPC endpoint, the gateway and
//! the optional console run as independent tasks that all observe the same
//! cancellation token. Shutdown joins or aborts every unit and closes the
//! store gate before reporting `Stopped`.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use database::postgres::{self as pg, DatabaseConnection};
use domain_tasks::{InMemoryTaskStore, PgTaskStore, TaskService, TaskStore};
use strum::Display;
use thiserror::Error;
use tokio::io::BufReader;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::{Config, StoreBackend};
use crate::console::InteractiveClient;
use crate::shutdown::ShutdownCoordinator;
use crate::store_gate::{GatedStore, StoreGate};
use crate::{gateway, server};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LifecycleState {
    Starting,
    Running,
    ShuttingDown,
    Stopped,
}

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("Startup failed while {stage}: {source}")]
    Startup {
        stage: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SupervisorError {
    fn startup(stage: &'static str, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Startup {
            stage,
            source: source.into(),
        }
    }
}

/// Owns startup, the running units and the ordered shutdown of the process.
pub struct LifecycleSupervisor {
    config: Config,
    shutdown: ShutdownCoordinator,
    state: watch::Sender<LifecycleState>,
}

impl LifecycleSupervisor {
    pub fn new(config: Config, shutdown: ShutdownCoordinator) -> Self {
        let (state, _) = watch::channel(LifecycleState::Starting);
        Self {
            config,
            shutdown,
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.borrow()
    }

    /// Start every unit and block until shutdown has completed.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError::Startup`] if any startup step fails.
    pub async fn run(self) -> Result<(), SupervisorError> {
        self.start().await?.wait().await;
        Ok(())
    }

    /// Run the startup sequence and return once every unit is spawned.
    ///
    /// On failure the state moves straight to `Stopped`, the shutdown token is
    /// cancelled and nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError::Startup`] naming the step that failed.
    pub async fn start(self) -> Result<RunningSupervisor, SupervisorError> {
        let shutdown = self.shutdown.clone();
        match self.start_units().await {
            Ok(running) => {
                running.state.send_replace(LifecycleState::Running);
                info!(rpc = %running.rpc_addr, http = %running.http_addr, "Todo service running");
                Ok(running)
            }
            Err((state, err)) => {
                error!(error = %err, "Startup failed");
                shutdown.shutdown();
                state.send_replace(LifecycleState::Stopped);
                Err(err)
            }
        }
    }

    async fn start_units(
        self,
    ) -> Result<RunningSupervisor, (watch::Sender<LifecycleState>, SupervisorError)> {
        let Self {
            config,
            shutdown,
            state,
        } = self;

        macro_rules! step {
            ($expr:expr) => {
                match $expr {
                    Ok(value) => value,
                    Err(err) => return Err((state, err)),
                }
            };
        }

        let (store, database) = step!(open_store(&config).await);
        let (store, store_gate) = GatedStore::new(store);
        let service = TaskService::new(store);

        let rpc_addr = step!(
            config
                .grpc
                .socket_addr()
                .map_err(|e| SupervisorError::startup("resolving the RPC address", e))
        );
        let rpc_listener = step!(
            TcpListener::bind(rpc_addr)
                .await
                .map_err(|e| SupervisorError::startup("binding the RPC listener", e))
        );
        let rpc_addr = step!(
            rpc_listener
                .local_addr()
                .map_err(|e| SupervisorError::startup("binding the RPC listener", e))
        );

        let http_addr = step!(
            config
                .http
                .socket_addr()
                .map_err(|e| SupervisorError::startup("resolving the HTTP address", e))
        );
        let http_listener = step!(
            TcpListener::bind(http_addr)
                .await
                .map_err(|e| SupervisorError::startup("binding the HTTP listener", e))
        );
        let http_addr = step!(
            http_listener
                .local_addr()
                .map_err(|e| SupervisorError::startup("binding the HTTP listener", e))
        );

        let gateway_client = step!(
            server::loopback_client(rpc_addr)
                .map_err(|e| SupervisorError::startup("creating the gateway client", e))
        );
        let console_client = gateway_client.clone();

        let token = shutdown.token();
        let grpc_config = config.grpc.clone();
        let rpc = spawn_unit("rpc", {
            let token = token.clone();
            async move { server::serve(rpc_listener, service, &grpc_config, token).await }
        });

        let router = gateway::router(gateway_client, config.request_timeout);
        let gateway = spawn_unit(
            "gateway",
            gateway::serve(http_listener, router, token.clone(), config.shutdown_timeout),
        );

        let console = config.interactive.then(|| {
            let console = InteractiveClient::new(
                console_client,
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
                token.clone(),
            );
            spawn_unit("console", async move { console.run().await.map(|_| ()) })
        });

        Ok(RunningSupervisor {
            state,
            shutdown,
            rpc_addr,
            http_addr,
            rpc,
            gateway,
            console,
            store_gate,
            database,
            drain_timeout: config.shutdown_timeout,
        })
    }
}

/// Handle to a started process.
pub struct RunningSupervisor {
    state: watch::Sender<LifecycleState>,
    shutdown: ShutdownCoordinator,
    rpc_addr: SocketAddr,
    http_addr: SocketAddr,
    rpc: JoinHandle<()>,
    gateway: JoinHandle<()>,
    console: Option<JoinHandle<()>>,
    store_gate: StoreGate,
    database: Option<DatabaseConnection>,
    drain_timeout: Duration,
}

impl RunningSupervisor {
    /// Address the RPC endpoint is bound to.
    pub fn rpc_addr(&self) -> SocketAddr {
        self.rpc_addr
    }

    /// Address the HTTP gateway is bound to.
    pub fn http_addr(&self) -> SocketAddr {
        self.http_addr
    }

    pub fn subscribe(&self) -> watch::Receiver<LifecycleState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.borrow()
    }

    /// Wait for cancellation, then stop every unit and release the store.
    ///
    /// `Stopped` is published only once no unit task and no store call is
    /// left running.
    pub async fn wait(self) {
        self.shutdown.cancelled().await;
        self.state.send_replace(LifecycleState::ShuttingDown);
        info!("Shutting down");

        // The gateway bounds its own drain; the RPC endpoint gets the same budget.
        join_unit("gateway", self.gateway, None).await;
        join_unit("rpc", self.rpc, Some(self.drain_timeout)).await;
        if let Some(console) = self.console {
            join_unit("console", console, Some(self.drain_timeout)).await;
        }

        // RPC calls already handed to the executor survive the endpoint abort.
        self.store_gate.close().await;

        self.state.send_replace(LifecycleState::Stopped);

        if let Some(db) = self.database
            && let Err(e) = pg::close(db).await
        {
            warn!(error = %e, "Failed to close the database pool");
        }
        info!("Shutdown complete");
    }
}

async fn open_store(
    config: &Config,
) -> Result<(Arc<dyn TaskStore>, Option<DatabaseConnection>), SupervisorError> {
    match config.store {
        StoreBackend::Memory => {
            info!("Using in-memory task store");
            Ok((Arc::new(InMemoryTaskStore::new()), None))
        }
        StoreBackend::Postgres => {
            info!(target = %config.database.redacted_url(), "Connecting to PostgreSQL");
            let db = pg::connect_from_config(config.database.clone())
                .await
                .map_err(|e| SupervisorError::startup("connecting to the store", e))?;
            pg::check_health(&db)
                .await
                .map_err(|e| SupervisorError::startup("checking the store", e))?;
            Ok((Arc::new(PgTaskStore::new(db.clone())), Some(db)))
        }
    }
}

/// Spawn a unit whose failure is logged without affecting the others.
fn spawn_unit<F, E>(name: &'static str, unit: F) -> JoinHandle<()>
where
    F: Future<Output = Result<(), E>> + Send + 'static,
    E: std::fmt::Display + Send + 'static,
{
    tokio::spawn(async move {
        match unit.await {
            Ok(()) => info!(unit = name, "Unit stopped"),
            Err(e) => error!(unit = name, error = %e, "Unit failed"),
        }
    })
}

async fn join_unit(name: &'static str, mut handle: JoinHandle<()>, limit: Option<Duration>) {
    let joined = match limit {
        Some(limit) => match tokio::time::timeout(limit, &mut handle).await {
            Ok(joined) => joined,
            Err(_) => {
                warn!(unit = name, timeout = ?limit, "Unit did not stop in time, aborting");
                handle.abort();
                handle.await
            }
        },
        None => handle.await,
    };

    if let Err(e) = joined
        && e.is_panic()
    {
        error!(unit = name, "Unit panicked");
    }
}
