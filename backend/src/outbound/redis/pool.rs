//! Pooled Redis connections via `bb8-redis`.
//!
//! Mirrors the Postgres pool wrapper: a cloneable handle, a small builder
//! style config and errors flattened to strings at the adapter boundary.

use std::time::Duration;

use bb8_redis::RedisConnectionManager;
use bb8_redis::bb8::{Pool, PooledConnection};

/// Errors raised while building or checking out from the Redis pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RedisPoolError {
    /// No connection became available within the timeout.
    #[error("failed to get redis connection: {message}")]
    Checkout { message: String },

    /// The URL was invalid or the initial connection failed.
    #[error("failed to build redis pool: {message}")]
    Build { message: String },
}

impl RedisPoolError {
    /// Checkout failure.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Build failure.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Underlying message, for adapters that fold both variants together.
    pub fn into_message(self) -> String {
        match self {
            Self::Checkout { message } | Self::Build { message } => message,
        }
    }
}

/// Redis pool settings.
///
/// Defaults: 8 connections, 5 second checkout timeout.
#[derive(Debug, Clone)]
pub struct RedisPoolConfig {
    url: String,
    max_size: u32,
    connection_timeout: Duration,
}

impl RedisPoolConfig {
    /// Settings for `url` with default limits.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_size: 8,
            connection_timeout: Duration::from_secs(5),
        }
    }

    /// Cap the number of pooled connections.
    #[must_use]
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the checkout timeout.
    #[must_use]
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Target URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Cloneable Redis pool handle shared by the cache and leaderboard adapters.
#[derive(Clone)]
pub struct RedisPool {
    inner: Pool<RedisConnectionManager>,
}

impl RedisPool {
    /// Build the pool and open its first connection.
    ///
    /// # Errors
    ///
    /// [`RedisPoolError::Build`] when the URL does not parse or the server
    /// cannot be reached.
    pub async fn new(config: RedisPoolConfig) -> Result<Self, RedisPoolError> {
        let manager = RedisConnectionManager::new(config.url.as_str())
            .map_err(|err| RedisPoolError::build(err.to_string()))?;
        let inner = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| RedisPoolError::build(err.to_string()))?;
        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// [`RedisPoolError::Checkout`] when the pool is exhausted past the
    /// timeout or the connection is broken.
    pub async fn get(&self) -> Result<PooledConnection<'_, RedisConnectionManager>, RedisPoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| RedisPoolError::checkout(err.to_string()))
    }
}
