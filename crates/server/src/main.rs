use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use registrar_server::api::{AppState, create_router};
use registrar_server::config::{DEFAULT_CONFIG_FILE, RegistrarConfig};
use registrar_server::db;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    info!("starting registrar server");
    let config = load_config()?;

    let db = db::init_pool_and_migrate(&config.database)
        .await
        .context("failed to initialize the database")?;

    let state = Arc::new(AppState::new(db, &config).context("failed to build application state")?);
    if config.registration.seed_catalog {
        state
            .catalog
            .seed()
            .await
            .context("failed to seed the course catalog")?;
    }

    let app = create_router(state);
    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    info!(address = %config.server.bind, "server is ready, press Ctrl+C to shut down");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    info!("server shutdown complete");
    Ok(())
}

fn load_config() -> anyhow::Result<RegistrarConfig> {
    let config = if Path::new(DEFAULT_CONFIG_FILE).exists() {
        info!(path = DEFAULT_CONFIG_FILE, "loading registrar config");
        RegistrarConfig::from_file(DEFAULT_CONFIG_FILE)
            .with_context(|| format!("failed to load config from {DEFAULT_CONFIG_FILE}"))?
    } else {
        warn!(path = DEFAULT_CONFIG_FILE, "config file not found, using defaults");
        RegistrarConfig::default()
    };

    Ok(config.with_database_url(std::env::var("DATABASE_URL").ok()))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, stopping server");
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
