//! Process-local catalogue cache.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::Catalog;
use crate::domain::ports::{CacheKey, CatalogCache, CatalogCacheError};

/// [`CatalogCache`] over a shared map. Entries live until deleted.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogCache {
    entries: Arc<RwLock<HashMap<CacheKey, Catalog>>>,
}

impl MemoryCatalogCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogCache for MemoryCatalogCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<Catalog>, CatalogCacheError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &CacheKey, catalog: &Catalog) -> Result<(), CatalogCacheError> {
        self.entries
            .write()
            .await
            .insert(key.clone(), catalog.clone());
        Ok(())
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), CatalogCacheError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
