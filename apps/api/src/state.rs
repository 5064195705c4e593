use std::sync::Arc;

use crate::catalog::{CatalogSource, CatalogStore};
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Published catalog snapshot. Handlers call `snapshot()` once per request.
    pub catalog: Arc<CatalogStore>,
    /// Where reloads read from. Builtin unless CATALOG_PATH is set.
    pub catalog_source: Arc<dyn CatalogSource>,
}
