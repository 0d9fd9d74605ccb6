//! Account service: registration, login, profile and collection reads.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;
use tracing::info;

use crate::domain::game_service::{
    map_ownership_repository_error, map_player_repository_error, player_not_found,
};
use crate::domain::ownership::{collection_view, owned_ids};
use crate::domain::ports::{
    AccountCommand, AccountQuery, CredentialHasher, CredentialHasherError, OwnershipRepository,
    PlayerRepository, TransactionCoordinator,
};
use crate::domain::{
    CatalogLoader, CollectionItem, CredentialHash, Credentials, DisplayName, Error,
    PlayerAccount, PlayerIdentity, PlayerProfile, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid email or password";

fn map_hasher_error(error: CredentialHasherError) -> Error {
    Error::internal(format!("credential check failed: {error}"))
}

/// Implements [`AccountCommand`] and [`AccountQuery`].
pub struct AccountService<T> {
    transactions: Arc<T>,
    players: Arc<dyn PlayerRepository>,
    ownerships: Arc<dyn OwnershipRepository>,
    catalog: CatalogLoader,
    hasher: Arc<dyn CredentialHasher>,
}

impl<T> Clone for AccountService<T> {
    fn clone(&self) -> Self {
        Self {
            transactions: Arc::clone(&self.transactions),
            players: Arc::clone(&self.players),
            ownerships: Arc::clone(&self.ownerships),
            catalog: self.catalog.clone(),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<T> AccountService<T>
where
    T: TransactionCoordinator,
{
    /// Wire the service to its ports.
    pub fn new(
        transactions: Arc<T>,
        players: Arc<dyn PlayerRepository>,
        ownerships: Arc<dyn OwnershipRepository>,
        catalog: CatalogLoader,
        hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            transactions,
            players,
            ownerships,
            catalog,
            hasher,
        }
    }

    async fn load_player(&self, id: &UserId) -> Result<PlayerAccount, Error> {
        self.players
            .find_by_id(id)
            .await
            .map_err(map_player_repository_error)?
            .ok_or_else(|| player_not_found(id))
    }

    // Hashing is CPU-bound; keep it off the async workers.
    async fn hash_password(&self, password: &str) -> Result<CredentialHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("hashing task failed: {err}")))?
            .map_err(map_hasher_error)
    }

    async fn verify_password(&self, password: &str, hash: CredentialHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| Error::internal(format!("verification task failed: {err}")))?
            .map_err(map_hasher_error)
    }
}

#[async_trait]
impl<T> AccountCommand for AccountService<T>
where
    T: TransactionCoordinator,
{
    async fn register(&self, credentials: Credentials) -> Result<UserId, Error> {
        let credential = self.hash_password(credentials.password()).await?;
        let email = credentials.email().clone();
        let account = PlayerAccount::new(
            UserId::random(),
            DisplayName::from_email(&email),
            email,
            credential,
        );
        let id = account.id().clone();

        self.transactions
            .run(move |scope| {
                async move {
                    if scope.lock_player_by_email(account.email()).await?.is_some() {
                        return Err(Error::conflict(format!(
                            "email {} is already registered",
                            account.email()
                        )));
                    }
                    scope.create_player(&account).await?;
                    Ok::<_, Error>(())
                }
                .boxed()
            })
            .await?;

        info!(user_id = %id, "player registered");
        Ok(id)
    }

    async fn login(&self, credentials: Credentials) -> Result<UserId, Error> {
        let account = self
            .players
            .find_by_email(credentials.email())
            .await
            .map_err(map_player_repository_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        let verified = self
            .verify_password(credentials.password(), account.credential().clone())
            .await?;
        if !verified {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(account.id().clone())
    }

    async fn rename(
        &self,
        identity: PlayerIdentity,
        display_name: DisplayName,
    ) -> Result<PlayerProfile, Error> {
        let user_id = identity.user_id().clone();
        let account = self
            .transactions
            .run(move |scope| {
                async move {
                    let mut account = scope
                        .lock_player(&user_id)
                        .await?
                        .ok_or_else(|| player_not_found(&user_id))?;
                    account.rename(display_name);
                    scope.update_player(&account).await?;
                    Ok::<_, Error>(account)
                }
                .boxed()
            })
            .await?;
        Ok(account.profile())
    }
}

#[async_trait]
impl<T> AccountQuery for AccountService<T>
where
    T: TransactionCoordinator,
{
    async fn profile(&self, identity: PlayerIdentity) -> Result<PlayerProfile, Error> {
        Ok(self.load_player(identity.user_id()).await?.profile())
    }

    async fn collection(&self, identity: PlayerIdentity) -> Result<Vec<CollectionItem>, Error> {
        let user_id = identity.user_id();
        self.load_player(user_id).await?;
        let catalog = self.catalog.load().await?;
        let rows = self
            .ownerships
            .list_for_user(user_id)
            .await
            .map_err(map_ownership_repository_error)?;
        Ok(collection_view(&catalog, &owned_ids(&rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::collectible::test_support::item;
    use crate::domain::ports::{MockCredentialHasher, MockPlayerRepository, PlayerRepositoryError};
    use crate::domain::{ErrorCode, Ownership};
    use crate::outbound::memory::{MemoryCatalogCache, MemoryStore};
    use rstest::rstest;

    /// Hasher that stores the password verbatim behind a marker prefix.
    fn plain_hasher() -> MockCredentialHasher {
        let mut hasher = MockCredentialHasher::new();
        hasher
            .expect_hash()
            .returning(|password| Ok(CredentialHash::new(format!("plain:{password}"))));
        hasher
            .expect_verify()
            .returning(|password, hash| Ok(hash.as_str() == format!("plain:{password}")));
        hasher
    }

    fn service_over(store: &MemoryStore) -> AccountService<MemoryStore> {
        AccountService::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            CatalogLoader::new(Arc::new(store.clone()), Arc::new(MemoryCatalogCache::new())),
            Arc::new(plain_hasher()),
        )
    }

    fn register_creds(email: &str) -> Credentials {
        Credentials::for_registration(email, "correct horse").expect("credentials")
    }

    #[tokio::test]
    async fn register_creates_a_zero_balance_player_named_after_email() {
        let store = MemoryStore::new();
        let service = service_over(&store);

        let id = service
            .register(register_creds("Ada.Lovelace@Example.com"))
            .await
            .expect("register");

        let profile = service
            .profile(PlayerIdentity::new(id.clone()))
            .await
            .expect("profile");
        assert_eq!(profile.id, id);
        assert_eq!(profile.display_name.as_ref(), "ada.lovelace");
        assert_eq!(profile.email, "ada.lovelace@example.com");
        assert_eq!(profile.coins, 0);
        assert_eq!(profile.high_score, 0);
    }

    #[tokio::test]
    async fn register_rejects_a_taken_email() {
        let store = MemoryStore::new();
        let service = service_over(&store);
        service
            .register(register_creds("ada@example.com"))
            .await
            .expect("first registration");

        let err = service
            .register(register_creds("ADA@example.com"))
            .await
            .expect_err("duplicate");

        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[case("ada@example.com", "correct horse", true)]
    #[case("ada@example.com", "wrong horse!", false)]
    #[case("bob@example.com", "correct horse", false)]
    #[tokio::test]
    async fn login_checks_email_and_password(
        #[case] email: &str,
        #[case] password: &str,
        #[case] should_succeed: bool,
    ) {
        let store = MemoryStore::new();
        let service = service_over(&store);
        let registered = service
            .register(register_creds("ada@example.com"))
            .await
            .expect("register");

        let result = service
            .login(Credentials::for_login(email, password).expect("credentials"))
            .await;

        match (should_succeed, result) {
            (true, Ok(id)) => assert_eq!(id, registered),
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (true, Err(err)) => panic!("expected success, got {err:?}"),
            (false, Ok(id)) => panic!("expected failure, got {id}"),
        }
    }

    #[tokio::test]
    async fn rename_changes_only_the_display_name() {
        let store = MemoryStore::new();
        let service = service_over(&store);
        let id = service
            .register(register_creds("ada@example.com"))
            .await
            .expect("register");

        let profile = service
            .rename(
                PlayerIdentity::new(id),
                DisplayName::new("Countess Ada").expect("name"),
            )
            .await
            .expect("rename");

        assert_eq!(profile.display_name.as_ref(), "Countess Ada");
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.coins, 0);
    }

    #[tokio::test]
    async fn collection_flags_owned_items_in_catalogue_order() {
        let slime = item("slime", 5);
        let dragon = item("dragon", 1);
        let store = MemoryStore::with_catalog([slime.clone(), dragon.clone()]);
        let service = service_over(&store);
        let id = service
            .register(register_creds("ada@example.com"))
            .await
            .expect("register");
        OwnershipRepository::create(&store, &Ownership::new(id.clone(), dragon.id()))
            .await
            .expect("own dragon");

        let view = service
            .collection(PlayerIdentity::new(id))
            .await
            .expect("collection");

        let flags: Vec<(&str, bool)> = view
            .iter()
            .map(|entry| (entry.collectible.name(), entry.owned))
            .collect();
        assert_eq!(flags, [("slime", false), ("dragon", true)]);
    }

    #[tokio::test]
    async fn profile_of_missing_player_is_not_found() {
        let service = service_over(&MemoryStore::new());

        let err = service
            .profile(PlayerIdentity::new(UserId::random()))
            .await
            .expect_err("missing");

        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn unreachable_ledger_maps_to_service_unavailable() {
        let mut players = MockPlayerRepository::new();
        players
            .expect_find_by_email()
            .return_once(|_| Err(PlayerRepositoryError::connection("refused")));
        let store = MemoryStore::new();
        let service = AccountService::new(
            Arc::new(store.clone()),
            Arc::new(players),
            Arc::new(store.clone()),
            CatalogLoader::new(Arc::new(store), Arc::new(MemoryCatalogCache::new())),
            Arc::new(plain_hasher()),
        );

        let err = service
            .login(Credentials::for_login("ada@example.com", "pw").expect("credentials"))
            .await
            .expect_err("unavailable");

        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
