//! Driving port for account reads.

use async_trait::async_trait;

use crate::domain::{CollectionItem, Error, PlayerIdentity, PlayerProfile};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Profile of the calling player.
    async fn profile(&self, identity: PlayerIdentity) -> Result<PlayerProfile, Error>;

    /// Whole catalogue, each item flagged with whether the player owns it.
    async fn collection(&self, identity: PlayerIdentity) -> Result<Vec<CollectionItem>, Error>;
}
