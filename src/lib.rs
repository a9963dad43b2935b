pub mod api; // HTTP API: router, endpoints, server lifecycle
pub mod catalog; // Immutable condition → treatments mapping
pub mod config;
pub mod lookup; // TreatmentLookupService
pub mod models;

use std::sync::Arc;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::catalog::{CatalogError, TreatmentCatalog};
use crate::config::{ConfigError, ServerConfig};
use crate::lookup::TreatmentLookupService;

/// Anything that stops the service from coming up.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Server(#[from] api::ServerError),
}

/// Build the catalog named by `config`, or the built-in one.
pub fn load_catalog(config: &ServerConfig) -> Result<TreatmentCatalog, CatalogError> {
    match &config.catalog_path {
        Some(path) => TreatmentCatalog::load(path),
        None => Ok(TreatmentCatalog::builtin()),
    }
}

/// Process entry point: logging, config, catalog, server, then wait for Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = ServerConfig::from_env()?;
    let catalog = load_catalog(&config)?;
    tracing::info!(conditions = catalog.len(), "Treatment catalog ready");

    let lookup = Arc::new(TreatmentLookupService::new(Arc::new(catalog)));
    let mut server = api::server::start_api_server(&config, lookup).await?;

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl-C: {e}");
    }

    server.shutdown();
    server.wait().await;
    Ok(())
}
