//! Port for the durable collectible catalogue.

use async_trait::async_trait;

use crate::domain::{Catalog, Collectible, CollectibleId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue repository adapters.
    pub enum CatalogRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "catalogue repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "catalogue repository query failed: {message}",
    }
}

/// Durable catalogue storage.
///
/// `list` returns items in insertion order; the gacha walk relies on a
/// stable order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Fetch one collectible.
    async fn find_by_id(
        &self,
        id: &CollectibleId,
    ) -> Result<Option<Collectible>, CatalogRepositoryError>;

    /// Fetch the whole catalogue.
    async fn list(&self) -> Result<Catalog, CatalogRepositoryError>;

    /// Insert one collectible.
    async fn create(&self, collectible: &Collectible) -> Result<(), CatalogRepositoryError>;

    /// Insert many collectibles in one statement.
    async fn batch_create(&self, collectibles: &[Collectible])
    -> Result<(), CatalogRepositoryError>;

    /// Replace name, rarity and weight of an existing collectible.
    async fn update(&self, collectible: &Collectible) -> Result<(), CatalogRepositoryError>;

    /// Remove a collectible.
    async fn delete(&self, id: &CollectibleId) -> Result<(), CatalogRepositoryError>;
}
