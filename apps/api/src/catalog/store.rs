use std::sync::{Arc, PoisonError, RwLock};

use tracing::{error, info};

use crate::catalog::{Catalog, CatalogError, CatalogSource};

/// Holds the published catalog snapshot.
///
/// Readers take an `Arc` and keep it for the whole request; a reload builds a
/// complete new catalog and swaps the pointer, so no request ever sees a
/// half-updated catalog. Catalogs are never mutated in place.
pub struct CatalogStore {
    current: RwLock<Arc<Catalog>>,
}

impl CatalogStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Fetches and validates a catalog from `source` and wraps it in a store.
    pub async fn load(source: &dyn CatalogSource) -> Result<Self, CatalogError> {
        let catalog = load_catalog(source).await?;
        Ok(Self::new(catalog))
    }

    pub fn snapshot(&self) -> Arc<Catalog> {
        // The lock only guards a pointer swap; a poisoned lock still holds a
        // complete catalog.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&next);
        next
    }

    /// Re-reads `source` and publishes the result. On failure the previous
    /// snapshot stays live.
    pub async fn reload(&self, source: &dyn CatalogSource) -> Result<Arc<Catalog>, CatalogError> {
        match load_catalog(source).await {
            Ok(catalog) => Ok(self.replace(catalog)),
            Err(e) => {
                error!(source = %source.describe(), "Catalog reload rejected, keeping previous catalog: {e}");
                Err(e)
            }
        }
    }
}

async fn load_catalog(source: &dyn CatalogSource) -> Result<Catalog, CatalogError> {
    let doc = source.fetch().await?;
    let catalog = Catalog::from_document(doc)?;
    catalog.log_warnings();
    info!(
        source = %source.describe(),
        careers = catalog.careers().len(),
        skills = catalog.skills().len(),
        "Career catalog loaded"
    );
    Ok(catalog)
}
