mod catalog;
mod config;
mod errors;
mod matching;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::{BuiltinCatalogSource, CatalogSource, CatalogStore, FileCatalogSource};
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; invalid values abort startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career API v{}", env!("CARGO_PKG_VERSION"));

    // Load the career catalog; an invalid catalog aborts startup
    let catalog_source: Arc<dyn CatalogSource> = match &config.catalog_path {
        Some(path) => Arc::new(FileCatalogSource::new(path)),
        None => Arc::new(BuiltinCatalogSource),
    };
    let catalog = CatalogStore::load(catalog_source.as_ref())
        .await
        .with_context(|| {
            format!(
                "Failed to load career catalog from {}",
                catalog_source.describe()
            )
        })?;

    // Build app state
    let state = AppState {
        config: config.clone(),
        catalog: Arc::new(catalog),
        catalog_source,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the deployed front end

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
