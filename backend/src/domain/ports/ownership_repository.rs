//! Port for player ownership rows.

use async_trait::async_trait;

use crate::domain::{CollectibleId, Ownership, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ownership repository adapters.
    pub enum OwnershipRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "ownership repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "ownership repository query failed: {message}",
    }
}

/// Durable (player, collectible) pairs. Duplicate rows are permitted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnershipRepository: Send + Sync {
    /// Every row for a player, duplicates included.
    async fn list_for_user(&self, user_id: &UserId)
    -> Result<Vec<Ownership>, OwnershipRepositoryError>;

    /// Any one row for the pair, if the player owns the collectible.
    async fn find(
        &self,
        user_id: &UserId,
        collectible_id: &CollectibleId,
    ) -> Result<Option<Ownership>, OwnershipRepositoryError>;

    /// Insert one row.
    async fn create(&self, ownership: &Ownership) -> Result<(), OwnershipRepositoryError>;

    /// Insert many rows in one statement.
    async fn batch_create(&self, rows: &[Ownership]) -> Result<(), OwnershipRepositoryError>;

    /// Remove every row for the pair.
    async fn delete(
        &self,
        user_id: &UserId,
        collectible_id: &CollectibleId,
    ) -> Result<(), OwnershipRepositoryError>;
}
