//! Driving port for account mutations and authentication.

use async_trait::async_trait;

use crate::domain::{Credentials, DisplayName, Error, PlayerIdentity, PlayerProfile, UserId};

/// Registration, login and profile edits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account. Fails with `Conflict` if the email is taken.
    async fn register(&self, credentials: Credentials) -> Result<UserId, Error>;

    /// Check credentials and return the player id. Fails with `Unauthorized`.
    async fn login(&self, credentials: Credentials) -> Result<UserId, Error>;

    /// Change the public name of the calling player.
    async fn rename(
        &self,
        identity: PlayerIdentity,
        display_name: DisplayName,
    ) -> Result<PlayerProfile, Error>;
}
