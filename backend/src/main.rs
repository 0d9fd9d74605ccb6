//! Backend entry-point: loads settings, prepares stores and serves the API.

mod server;

use std::path::Path;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use arcade_backend::inbound::http::health::HealthState;
use arcade_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use arcade_backend::outbound::redis::{RedisPool, RedisPoolConfig};
use arcade_backend::settings::AppSettings;
use server::{ServerConfig, create_server};

/// `Key::derive_from` needs at least this much key material.
const SESSION_KEY_MIN_LEN: usize = 32;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let policy = settings.economy_policy().map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let key = load_session_key(&settings.session_key_file(), settings.session_allow_ephemeral)?;

    let mut config = ServerConfig::new(
        key,
        settings.cookie_secure(),
        SameSite::Lax,
        bind_addr,
        policy,
    );

    if let Some(url) = settings.database_url.clone() {
        let max_connections = settings.db_max_connections().map_err(std::io::Error::other)?;
        let migration_url = url.clone();
        web::block(move || run_migrations(&migration_url))
            .await
            .map_err(std::io::Error::other)?
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(url).with_max_size(max_connections))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    if let Some(url) = settings.redis_url.as_deref() {
        let pool = RedisPool::new(RedisPoolConfig::new(url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_redis_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "listening");
    server.await
}

/// Read the cookie signing key, or generate one in debug builds or when
/// explicitly allowed.
fn load_session_key(path: &Path, allow_ephemeral: bool) -> std::io::Result<Key> {
    match std::fs::read(path) {
        Ok(bytes) if bytes.len() >= SESSION_KEY_MIN_LEN => Ok(Key::derive_from(&bytes)),
        Ok(bytes) => Err(std::io::Error::other(format!(
            "session key at {} too short: need >= {SESSION_KEY_MIN_LEN} bytes, got {}",
            path.display(),
            bytes.len()
        ))),
        Err(e) if cfg!(debug_assertions) || allow_ephemeral => {
            warn!(path = %path.display(), error = %e, "using temporary session key (dev only)");
            Ok(Key::generate())
        }
        Err(e) => Err(std::io::Error::other(format!(
            "failed to read session key at {}: {e}",
            path.display()
        ))),
    }
}
