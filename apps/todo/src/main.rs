use core_config::tracing::{init_tracing, install_color_eyre};
use eyre::WrapErr;
use todo::{Config, LifecycleSupervisor, ShutdownCoordinator};
use tracing::info;

fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // A missing .env file is fine; variables may come from the environment
    let _ = dotenvy::dotenv();

    let config = Config::from_env().wrap_err("Failed to load configuration")?;
    init_tracing(&config.environment);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("Failed to build the async runtime")?;

    let result = runtime.block_on(async move {
        let shutdown = ShutdownCoordinator::new();
        let signals = shutdown.clone();
        tokio::spawn(async move { signals.wait_for_signal().await });

        info!(store = %config.store, interactive = config.interactive, "Starting todo service");
        LifecycleSupervisor::new(config, shutdown).run().await
    });

    // A console read on stdin cannot be cancelled; don't wait for it.
    runtime.shutdown_background();

    result.wrap_err("Todo service failed to start")
}
