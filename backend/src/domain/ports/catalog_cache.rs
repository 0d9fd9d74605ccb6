//! Cache port for the catalogue read path.
//!
//! A miss is `Ok(None)`, never an error: callers fall back to the durable
//! store on `None` and surface every `Err` unchanged.

use async_trait::async_trait;

use crate::domain::Catalog;

use super::{CacheKey, define_port_error};

define_port_error! {
    /// Errors raised by catalogue cache adapters.
    pub enum CatalogCacheError {
        /// Cache backend is unavailable or timing out.
        Backend { message: String } =>
            "catalogue cache backend failure: {message}",
        /// Cached payload could not be encoded or decoded.
        Serialization { message: String } =>
            "catalogue cache serialisation failed: {message}",
    }
}

/// Key/value cache for catalogue snapshots. Entries never expire.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogCache: Send + Sync {
    /// Read a cached catalogue; `Ok(None)` signals a miss.
    async fn get(&self, key: &CacheKey) -> Result<Option<Catalog>, CatalogCacheError>;

    /// Store a catalogue without expiry.
    async fn put(&self, key: &CacheKey, catalog: &Catalog) -> Result<(), CatalogCacheError>;

    /// Drop a cached entry; deleting a missing key succeeds.
    async fn delete(&self, key: &CacheKey) -> Result<(), CatalogCacheError>;
}
