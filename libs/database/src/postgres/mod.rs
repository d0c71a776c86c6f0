//! PostgreSQL connector and health check

mod config;
mod connector;
mod health;

pub use config::PostgresConfig;
pub use connector::{close, connect_from_config};
pub use health::check_health;

// Re-export SeaORM types for convenience
pub use sea_orm::{DatabaseConnection, DbErr};
