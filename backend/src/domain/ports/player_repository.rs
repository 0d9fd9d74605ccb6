//! Port for the player ledger outside of a unit of work.
//!
//! Reads here are unlocked snapshots. Balance changes go through
//! [`TransactionScope`](super::TransactionScope) so they run under a row lock.

use async_trait::async_trait;

use crate::domain::{EmailAddress, PlayerAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by player repository adapters.
    pub enum PlayerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "player repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "player repository query failed: {message}",
        /// Unique constraint (email) violated.
        Duplicate { message: String } =>
            "player already exists: {message}",
    }
}

/// Durable player ledger.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    /// Fetch a player by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<PlayerAccount>, PlayerRepositoryError>;

    /// Fetch a player by login email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<PlayerAccount>, PlayerRepositoryError>;

    /// Insert a new player.
    async fn create(&self, account: &PlayerAccount) -> Result<(), PlayerRepositoryError>;

    /// Persist name, coins and high score.
    async fn update(&self, account: &PlayerAccount) -> Result<(), PlayerRepositoryError>;

    /// Remove a player.
    async fn delete(&self, id: &UserId) -> Result<(), PlayerRepositoryError>;
}
