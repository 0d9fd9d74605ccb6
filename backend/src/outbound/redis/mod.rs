//! Redis adapters: the catalogue cache and the sorted-set leaderboard.
//!
//! Both share one [`RedisPool`]. Command failures surface as the port's
//! `Backend` error; nothing here retries.

mod catalog_cache;
mod leaderboard;
mod pool;

pub use catalog_cache::RedisCatalogCache;
pub use leaderboard::RedisLeaderboard;
pub use pool::{RedisPool, RedisPoolConfig, RedisPoolError};
