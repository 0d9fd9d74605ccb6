//! Cache-aside loading of the collectible catalogue.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::Catalog;
use crate::domain::Error;
use crate::domain::ports::{
    CacheKey, CatalogCache, CatalogCacheError, CatalogRepository, CatalogRepositoryError,
};

pub(crate) fn map_catalog_repository_error(error: CatalogRepositoryError) -> Error {
    match error {
        CatalogRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalogue repository unavailable: {message}"))
        }
        CatalogRepositoryError::Query { message } => {
            Error::internal(format!("catalogue repository error: {message}"))
        }
    }
}

fn map_cache_error(error: CatalogCacheError) -> Error {
    match error {
        CatalogCacheError::Backend { message } => {
            Error::service_unavailable(format!("catalogue cache unavailable: {message}"))
        }
        CatalogCacheError::Serialization { message } => {
            Error::internal(format!("catalogue cache payload invalid: {message}"))
        }
    }
}

/// Reads the catalogue from cache, falling back to the repository on a miss.
///
/// A miss populates the cache with the repository snapshot. Cache errors
/// other than a miss are returned unchanged; the loader never serves a
/// repository read to hide a broken cache.
#[derive(Clone)]
pub struct CatalogLoader {
    repository: Arc<dyn CatalogRepository>,
    cache: Arc<dyn CatalogCache>,
    key: CacheKey,
}

impl CatalogLoader {
    /// Build a loader caching under [`CacheKey::catalog`].
    pub fn new(repository: Arc<dyn CatalogRepository>, cache: Arc<dyn CatalogCache>) -> Self {
        Self {
            repository,
            cache,
            key: CacheKey::catalog(),
        }
    }

    /// Current catalogue.
    pub async fn load(&self) -> Result<Catalog, Error> {
        if let Some(catalog) = self.cache.get(&self.key).await.map_err(map_cache_error)? {
            debug!(key = %self.key, items = catalog.len(), "catalogue cache hit");
            return Ok(catalog);
        }

        info!(key = %self.key, "catalogue cache miss; loading from repository");
        let catalog = self
            .repository
            .list()
            .await
            .map_err(map_catalog_repository_error)?;
        self.cache
            .put(&self.key, &catalog)
            .await
            .map_err(map_cache_error)?;
        Ok(catalog)
    }

    /// Drop the cached catalogue so the next load reads the repository.
    pub async fn invalidate(&self) -> Result<(), Error> {
        self.cache.delete(&self.key).await.map_err(map_cache_error)
    }
}
