//! In-process ledger and catalogue store.
//!
//! Backs every relational port (players, scores, ownership, catalogue and the
//! unit-of-work coordinator) with one shared state guarded by an async mutex.
//! Units run against a staged copy of that state and swap it in on `Ok`, so a
//! failed unit leaves no trace. Used by tests and by the server when no
//! database URL is configured.

mod catalog_cache;
mod leaderboard;

pub use catalog_cache::MemoryCatalogCache;
pub use leaderboard::MemoryLeaderboard;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{
    CatalogRepository, CatalogRepositoryError, OwnershipRepository, OwnershipRepositoryError,
    PlayerRepository, PlayerRepositoryError, ScoreRepository, ScoreRepositoryError,
    TransactionCoordinator, TransactionError, TransactionScope, UnitOfWork,
};
use crate::domain::{
    Catalog, Collectible, CollectibleId, EmailAddress, Ownership, PlayerAccount, ScoreEvent,
    UserId,
};

#[derive(Debug, Clone, Default)]
struct StoreState {
    players: HashMap<UserId, PlayerAccount>,
    scores: Vec<ScoreEvent>,
    ownerships: Vec<Ownership>,
    collectibles: Vec<Collectible>,
}

impl StoreState {
    fn player_by_email(&self, email: &EmailAddress) -> Option<&PlayerAccount> {
        self.players
            .values()
            .find(|account| account.email() == email)
    }

    fn insert_player(&mut self, account: &PlayerAccount) -> Result<(), String> {
        if self.players.contains_key(account.id()) {
            return Err(format!("player {} already exists", account.id()));
        }
        if self.player_by_email(account.email()).is_some() {
            return Err(format!("email {} already registered", account.email()));
        }
        self.players.insert(account.id().clone(), account.clone());
        Ok(())
    }

    fn replace_player(&mut self, account: &PlayerAccount) -> Result<(), String> {
        match self.players.get_mut(account.id()) {
            Some(existing) => {
                *existing = account.clone();
                Ok(())
            }
            None => Err(format!("player {} not found", account.id())),
        }
    }
}

/// Shared in-memory store implementing the relational ports.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with catalogue items.
    pub fn with_catalog(items: impl IntoIterator<Item = Collectible>) -> Self {
        let state = StoreState {
            collectibles: items.into_iter().collect(),
            ..StoreState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Number of score events recorded for a player.
    pub async fn score_count(&self, user_id: &UserId) -> usize {
        let state = self.state.lock().await;
        state
            .scores
            .iter()
            .filter(|event| &event.user_id == user_id)
            .count()
    }
}

#[async_trait]
impl PlayerRepository for MemoryStore {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<PlayerAccount>, PlayerRepositoryError> {
        Ok(self.state.lock().await.players.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<PlayerAccount>, PlayerRepositoryError> {
        Ok(self.state.lock().await.player_by_email(email).cloned())
    }

    async fn create(&self, account: &PlayerAccount) -> Result<(), PlayerRepositoryError> {
        self.state
            .lock()
            .await
            .insert_player(account)
            .map_err(PlayerRepositoryError::duplicate)
    }

    async fn update(&self, account: &PlayerAccount) -> Result<(), PlayerRepositoryError> {
        self.state
            .lock()
            .await
            .replace_player(account)
            .map_err(PlayerRepositoryError::query)
    }

    async fn delete(&self, id: &UserId) -> Result<(), PlayerRepositoryError> {
        self.state.lock().await.players.remove(id);
        Ok(())
    }
}

#[async_trait]
impl ScoreRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<ScoreEvent>, ScoreRepositoryError> {
        let state = self.state.lock().await;
        Ok(state.scores.iter().find(|event| &event.id == id).cloned())
    }

    async fn create(&self, event: &ScoreEvent) -> Result<(), ScoreRepositoryError> {
        self.state.lock().await.scores.push(event.clone());
        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), ScoreRepositoryError> {
        self.state.lock().await.scores.retain(|event| &event.id != id);
        Ok(())
    }
}

#[async_trait]
impl OwnershipRepository for MemoryStore {
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Ownership>, OwnershipRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .ownerships
            .iter()
            .filter(|row| &row.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find(
        &self,
        user_id: &UserId,
        collectible_id: &CollectibleId,
    ) -> Result<Option<Ownership>, OwnershipRepositoryError> {
        let state = self.state.lock().await;
        Ok(state
            .ownerships
            .iter()
            .find(|row| &row.user_id == user_id && &row.collectible_id == collectible_id)
            .cloned())
    }

    async fn create(&self, ownership: &Ownership) -> Result<(), OwnershipRepositoryError> {
        self.state.lock().await.ownerships.push(ownership.clone());
        Ok(())
    }

    async fn batch_create(&self, rows: &[Ownership]) -> Result<(), OwnershipRepositoryError> {
        self.state.lock().await.ownerships.extend_from_slice(rows);
        Ok(())
    }

    async fn delete(
        &self,
        user_id: &UserId,
        collectible_id: &CollectibleId,
    ) -> Result<(), OwnershipRepositoryError> {
        self.state
            .lock()
            .await
            .ownerships
            .retain(|row| !(&row.user_id == user_id && &row.collectible_id == collectible_id));
        Ok(())
    }
}

#[async_trait]
impl CatalogRepository for MemoryStore {
    async fn find_by_id(
        &self,
        id: &CollectibleId,
    ) -> Result<Option<Collectible>, CatalogRepositoryError> {
        let state = self.state.lock().await;
        Ok(state.collectibles.iter().find(|item| &item.id() == id).cloned())
    }

    async fn list(&self) -> Result<Catalog, CatalogRepositoryError> {
        Ok(Catalog::new(self.state.lock().await.collectibles.clone()))
    }

    async fn create(&self, collectible: &Collectible) -> Result<(), CatalogRepositoryError> {
        CatalogRepository::batch_create(self, std::slice::from_ref(collectible)).await
    }

    async fn batch_create(&self, items: &[Collectible]) -> Result<(), CatalogRepositoryError> {
        let mut state = self.state.lock().await;
        if let Some(clash) = items
            .iter()
            .find(|item| state.collectibles.iter().any(|c| c.id() == item.id()))
        {
            return Err(CatalogRepositoryError::query(format!(
                "collectible {} already exists",
                clash.id()
            )));
        }
        state.collectibles.extend_from_slice(items);
        Ok(())
    }

    async fn update(&self, collectible: &Collectible) -> Result<(), CatalogRepositoryError> {
        let mut state = self.state.lock().await;
        let slot = state
            .collectibles
            .iter_mut()
            .find(|item| item.id() == collectible.id())
            .ok_or_else(|| {
                CatalogRepositoryError::query(format!("collectible {} not found", collectible.id()))
            })?;
        *slot = collectible.clone();
        Ok(())
    }

    async fn delete(&self, id: &CollectibleId) -> Result<(), CatalogRepositoryError> {
        self.state
            .lock()
            .await
            .collectibles
            .retain(|item| &item.id() != id);
        Ok(())
    }
}

/// Staged copy of the store seen by one unit of work.
struct MemoryScope {
    staged: StoreState,
}

#[async_trait]
impl TransactionScope for MemoryScope {
    async fn lock_player(
        &mut self,
        id: &UserId,
    ) -> Result<Option<PlayerAccount>, TransactionError> {
        Ok(self.staged.players.get(id).cloned())
    }

    async fn lock_player_by_email(
        &mut self,
        email: &EmailAddress,
    ) -> Result<Option<PlayerAccount>, TransactionError> {
        Ok(self.staged.player_by_email(email).cloned())
    }

    async fn create_player(&mut self, account: &PlayerAccount) -> Result<(), TransactionError> {
        self.staged
            .insert_player(account)
            .map_err(TransactionError::conflict)
    }

    async fn update_player(&mut self, account: &PlayerAccount) -> Result<(), TransactionError> {
        self.staged
            .replace_player(account)
            .map_err(TransactionError::query)
    }

    async fn insert_score(&mut self, event: &ScoreEvent) -> Result<(), TransactionError> {
        self.staged.scores.push(event.clone());
        Ok(())
    }

    async fn insert_ownerships(&mut self, rows: &[Ownership]) -> Result<(), TransactionError> {
        self.staged.ownerships.extend_from_slice(rows);
        Ok(())
    }
}

#[async_trait]
impl TransactionCoordinator for MemoryStore {
    async fn run<T, E, F>(&self, work: F) -> Result<T, E>
    where
        T: Send + 'static,
        E: From<TransactionError> + Send + 'static,
        F: for<'t> FnOnce(&'t mut dyn TransactionScope) -> UnitOfWork<'t, T, E> + Send + 'static,
    {
        // Holding the lock for the whole unit serialises units like row locks.
        let mut state = self.state.lock().await;
        let mut scope = MemoryScope {
            staged: state.clone(),
        };
        let outcome = work(&mut scope).await;
        if outcome.is_ok() {
            *state = scope.staged;
        } else {
            debug!("memory unit of work rolled back");
        }
        outcome
    }
}
