//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `ARCADE_*` environment variables and an
//! optional config file, in OrthoConfig precedence order. Absent store URLs
//! select the in-memory adapters.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::EconomyPolicy;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Settings rejected after loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid bind address '{value}'")]
    InvalidBindAddr { value: String },
    #[error("draw_cost must be greater than zero")]
    FreeDraws,
    #[error("db_max_connections must be greater than zero")]
    EmptyPool,
}

/// Server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ARCADE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Postgres URL; in-memory stores are used when absent.
    pub database_url: Option<String>,
    /// Redis URL for the catalogue cache and leaderboard.
    pub redis_url: Option<String>,
    /// File holding the cookie signing key.
    pub session_key_file: Option<PathBuf>,
    /// Allow a generated key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Mark the session cookie `Secure`; defaults to on.
    pub cookie_secure: Option<bool>,
    /// Coins credited for any non-zero score.
    #[ortho_config(default = 100)]
    pub base_reward: u64,
    /// Coins per score point.
    #[ortho_config(default = 2)]
    pub score_multiplier: u64,
    /// Price of one draw.
    #[ortho_config(default = 100)]
    pub draw_cost: u64,
    /// Postgres pool size.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
}

impl AppSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|_| SettingsError::InvalidBindAddr {
            value: raw.to_owned(),
        })
    }

    /// Session key path, falling back to the mounted secret.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether the session cookie carries `Secure`.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Economy parameters; zero-cost draws are rejected.
    pub fn economy_policy(&self) -> Result<EconomyPolicy, SettingsError> {
        if self.draw_cost == 0 {
            return Err(SettingsError::FreeDraws);
        }
        Ok(EconomyPolicy::new(
            self.base_reward,
            self.score_multiplier,
            self.draw_cost,
        ))
    }

    /// Postgres pool size; zero is rejected.
    pub fn db_max_connections(&self) -> Result<u32, SettingsError> {
        if self.db_max_connections == 0 {
            return Err(SettingsError::EmptyPool);
        }
        Ok(self.db_max_connections)
    }
}
