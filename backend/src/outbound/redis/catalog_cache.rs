//! Redis-backed catalogue cache.
//!
//! Catalogues are stored as one JSON string per key with no expiry.

use async_trait::async_trait;
use bb8_redis::redis::{AsyncCommands, RedisError};
use tracing::debug;

use crate::domain::Catalog;
use crate::domain::ports::{CacheKey, CatalogCache, CatalogCacheError};

use super::pool::{RedisPool, RedisPoolError};

fn map_pool_error(error: RedisPoolError) -> CatalogCacheError {
    CatalogCacheError::backend(error.into_message())
}

fn map_redis_error(error: RedisError) -> CatalogCacheError {
    debug!(kind = ?error.kind(), %error, "redis cache command failed");
    CatalogCacheError::backend(error.to_string())
}

pub(crate) fn encode(catalog: &Catalog) -> Result<String, CatalogCacheError> {
    serde_json::to_string(catalog).map_err(|err| CatalogCacheError::serialization(err.to_string()))
}

pub(crate) fn decode(payload: &str) -> Result<Catalog, CatalogCacheError> {
    serde_json::from_str(payload).map_err(|err| CatalogCacheError::serialization(err.to_string()))
}

/// [`CatalogCache`] over a Redis string key.
#[derive(Clone)]
pub struct RedisCatalogCache {
    pool: RedisPool,
}

impl RedisCatalogCache {
    /// Cache using connections from `pool`.
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogCache for RedisCatalogCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<Catalog>, CatalogCacheError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let payload: Option<String> = conn.get(key.as_str()).await.map_err(map_redis_error)?;
        payload.as_deref().map(decode).transpose()
    }

    async fn put(&self, key: &CacheKey, catalog: &Catalog) -> Result<(), CatalogCacheError> {
        let payload = encode(catalog)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.set::<_, _, ()>(key.as_str(), payload)
            .await
            .map_err(map_redis_error)
    }

    async fn delete(&self, key: &CacheKey) -> Result<(), CatalogCacheError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.del::<_, ()>(key.as_str())
            .await
            .map_err(map_redis_error)
    }
}
