use sea_orm::{Database, DatabaseConnection};
use tracing::info;

use super::PostgresConfig;
use crate::common::DatabaseError;

/// Open a connection pool using a [`PostgresConfig`].
///
/// There is no retry: a failure here is reported to the caller as is.
///
/// # Example
/// ```ignore
/// use database::postgres::{PostgresConfig, connect_from_config};
/// use core_config::FromEnv;
///
/// let config = PostgresConfig::from_env()?;
/// let db = connect_from_config(config).await?;
/// ```
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DatabaseError> {
    let target = config.redacted_url();
    let options = config.into_connect_options();

    let db = Database::connect(options)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed {
            target: target.clone(),
            details: e.to_string(),
        })?;

    info!(target = %target, "Connected to PostgreSQL");
    Ok(db)
}

/// Close the pool, waiting for checked-out connections to be returned.
pub async fn close(db: DatabaseConnection) -> Result<(), DatabaseError> {
    db.close().await?;
    info!("PostgreSQL connection pool closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_server_is_connection_failed() {
        let mut config =
            PostgresConfig::from_parts("127.0.0.1", 1, "postgres", "secret", "todo_app");
        config.connect_timeout_secs = 1;
        config.acquire_timeout_secs = 1;

        let err = connect_from_config(config).await.unwrap_err();
        match err {
            DatabaseError::ConnectionFailed { target, .. } => {
                assert!(!target.contains("secret"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
