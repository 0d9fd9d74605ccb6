//! Unit-of-work port for ledger mutations that must commit together.
//!
//! A [`TransactionCoordinator`] hands the caller a [`TransactionScope`] and
//! commits every write made through it when the unit returns `Ok`. Any `Err`
//! rolls the whole unit back. Player rows read through
//! [`TransactionScope::lock_player`] stay locked until the unit ends, so two
//! concurrent units on the same player serialise.

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::domain::{EmailAddress, Error, Ownership, PlayerAccount, ScoreEvent, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised while running a unit of work.
    pub enum TransactionError {
        /// Storage could not be reached or the connection dropped.
        Connection { message: String } =>
            "transaction connection failed: {message}",
        /// A statement inside the unit failed.
        Query { message: String } =>
            "transaction query failed: {message}",
        /// A uniqueness constraint rejected a write.
        Conflict { message: String } =>
            "transaction conflict: {message}",
    }
}

impl From<TransactionError> for Error {
    fn from(value: TransactionError) -> Self {
        match value {
            TransactionError::Connection { message } => Error::service_unavailable(message),
            TransactionError::Query { message } => Error::internal(message),
            TransactionError::Conflict { message } => Error::conflict(message),
        }
    }
}

/// Writes available inside one unit of work.
#[async_trait]
pub trait TransactionScope: Send {
    /// Read a player and hold its row lock until the unit ends.
    async fn lock_player(&mut self, id: &UserId)
    -> Result<Option<PlayerAccount>, TransactionError>;

    /// Read the account using `email`, locking its row if it exists.
    async fn lock_player_by_email(
        &mut self,
        email: &EmailAddress,
    ) -> Result<Option<PlayerAccount>, TransactionError>;

    /// Insert a new player.
    async fn create_player(&mut self, account: &PlayerAccount) -> Result<(), TransactionError>;

    /// Persist name, coins and high score of a locked player.
    async fn update_player(&mut self, account: &PlayerAccount) -> Result<(), TransactionError>;

    /// Append a score event.
    async fn insert_score(&mut self, event: &ScoreEvent) -> Result<(), TransactionError>;

    /// Insert ownership rows; an empty slice is a no-op.
    async fn insert_ownerships(&mut self, rows: &[Ownership]) -> Result<(), TransactionError>;
}

/// Boxed body of a unit of work, borrowing the scope for `'t`.
pub type UnitOfWork<'t, T, E> = BoxFuture<'t, Result<T, E>>;

/// Runs closures as atomic units of work.
///
/// Generic over the unit's result and error, so services hold a concrete
/// coordinator rather than a trait object.
#[async_trait]
pub trait TransactionCoordinator: Send + Sync {
    /// Run `work` in a fresh unit, committing on `Ok` and rolling back on `Err`.
    async fn run<T, E, F>(&self, work: F) -> Result<T, E>
    where
        T: Send + 'static,
        E: From<TransactionError> + Send + 'static,
        F: for<'t> FnOnce(&'t mut dyn TransactionScope) -> UnitOfWork<'t, T, E> + Send + 'static;
}
