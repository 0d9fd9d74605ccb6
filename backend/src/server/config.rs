//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use arcade_backend::domain::EconomyPolicy;
use arcade_backend::outbound::persistence::DbPool;
use arcade_backend::outbound::redis::RedisPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) policy: EconomyPolicy,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) redis_pool: Option<RedisPool>,
}

impl ServerConfig {
    /// Construct a configuration backed by in-memory stores.
    #[must_use]
    pub fn new(
        key: Key,
        cookie_secure: bool,
        same_site: SameSite,
        bind_addr: SocketAddr,
        policy: EconomyPolicy,
    ) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            policy,
            db_pool: None,
            redis_pool: None,
        }
    }

    /// Use Postgres for the ledger, scores, ownership and catalogue.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Use Redis for the catalogue cache and leaderboard.
    #[must_use]
    pub fn with_redis_pool(mut self, pool: RedisPool) -> Self {
        self.redis_pool = Some(pool);
        self
    }
}
