//! Catalog sources — where the career catalog document comes from.
//!
//! Default: `BuiltinCatalogSource` (JSON compiled into the binary).
//! `FileCatalogSource` reads an operator-managed file and is selected when
//! `CATALOG_PATH` is set. `AppState` holds an `Arc<dyn CatalogSource>` so
//! reloads re-read the same source.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::catalog::{CatalogDocument, CatalogError};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<CatalogDocument, CatalogError>;

    /// Short description for logs ("builtin", "file:/etc/careers.json").
    fn describe(&self) -> String;
}

pub struct BuiltinCatalogSource;

#[async_trait]
impl CatalogSource for BuiltinCatalogSource {
    async fn fetch(&self) -> Result<CatalogDocument, CatalogError> {
        Ok(serde_json::from_str(BUILTIN_CATALOG)?)
    }

    fn describe(&self) -> String {
        "builtin".to_string()
    }
}

pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn fetch(&self) -> Result<CatalogDocument, CatalogError> {
        debug!(path = %self.path.display(), "Reading catalog file");
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                location: self.path.display().to_string(),
                source,
            })?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use std::io::Write;

    #[tokio::test]
    async fn test_builtin_catalog_is_valid_and_consistent() {
        let doc = BuiltinCatalogSource.fetch().await.unwrap();
        let catalog = Catalog::from_document(doc).unwrap();

        assert!(catalog.careers().len() >= 5);
        assert!(catalog.consistency_issues().is_empty());
        assert!(catalog.dangling_related_careers().is_empty());
        assert!(catalog
            .careers()
            .iter()
            .all(|c| c.difficulty.is_some() && c.growth_rate.is_some()));
    }

    #[tokio::test]
    async fn test_file_source_reads_document() {
        let doc = crate::catalog::tests::sample_document();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&doc).unwrap()).unwrap();

        let source = FileCatalogSource::new(file.path());
        let fetched = source.fetch().await.unwrap();

        assert_eq!(fetched.careers.len(), 2);
        assert!(source.describe().starts_with("file:"));
    }

    #[tokio::test]
    async fn test_file_source_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileCatalogSource::new(dir.path().join("missing.json"));
        assert!(matches!(
            source.fetch().await,
            Err(CatalogError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_file_source_malformed_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ \"skills\": [").unwrap();

        let source = FileCatalogSource::new(file.path());
        assert!(matches!(
            source.fetch().await,
            Err(CatalogError::Parse(_))
        ));
    }
}
