//! Movie catalog server: loads config, prepares the store, serves the REST API.

use movie_catalog::{
    app, ensure_database_exists, ensure_schema, AppConfig, AppState, Catalog, MemoryCatalog,
    PgCatalog, StaticToken,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.env.default_log_directive())),
        )
        .init();
    tracing::info!(env = ?config.env, "starting movie catalog");
    tracing::debug!(config = ?config, "loaded config");

    let catalog: Arc<dyn Catalog> = if config.uses_memory_store() {
        tracing::warn!("using in-process store; data is lost on exit");
        Arc::new(MemoryCatalog::new())
    } else {
        if config.bootstrap_schema {
            ensure_database_exists(&config.database_url).await?;
        }
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        if config.bootstrap_schema {
            ensure_schema(&pool).await?;
        }
        tracing::info!("connected to database");
        Arc::new(PgCatalog::new(pool))
    };

    let state = AppState::new(catalog, Arc::new(StaticToken::new(config.auth_token.clone())));

    let listener = TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
