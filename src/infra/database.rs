//! For interacting with the database.

use super::config::DatabaseConfig;
use sqlx::{
    migrate::MigrateError,
    pool::PoolOptions,
    postgres::{PgConnectOptions, PgSslMode},
    ConnectOptions, PgPool,
};
use std::time::Duration;
use tracing::log::LevelFilter;

/// A common database pool type.
pub type DbPool = PgPool;

/// Connects to the database based on some configuration.
pub fn init_db(config: &DatabaseConfig) -> DbPool {
    let db_options = PgConnectOptions::default()
        .username(&config.username)
        .password(&config.password)
        .host(&config.host)
        .port(config.port)
        .database(&config.database_name)
        .ssl_mode(PgSslMode::Prefer)
        .log_statements(LevelFilter::Debug);
    PoolOptions::default()
        .acquire_timeout(Duration::from_secs(5))
        .min_connections(1)
        .max_connections(100)
        .connect_lazy_with(db_options)
}

/// Applies the migrations in `migrations/`.
#[tracing::instrument(skip(db))]
pub async fn migrate(db: &DbPool) -> Result<(), MigrateError> {
    tracing::info!("Running migrations");
    sqlx::migrate!().run(db).await?;
    tracing::info!("Migrations done");
    Ok(())
}
