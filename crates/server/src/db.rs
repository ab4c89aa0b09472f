use std::time::Duration;

use anyhow::Context;
use registrar_migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseConfig;

pub async fn init_pool_and_migrate(config: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .context("failed to connect to the registrar database")?;
    info!(max_connections = config.max_connections, "database pool ready");

    Migrator::up(&db, None)
        .await
        .context("failed to apply database migrations")?;
    info!("database migrations applied");

    Ok(db)
}
