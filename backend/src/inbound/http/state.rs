//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on the driving
//! ports, so they can be exercised with mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountCommand, AccountQuery, GameCommand, RankingQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub game: Arc<dyn GameCommand>,
    pub rankings: Arc<dyn RankingQuery>,
    pub accounts: Arc<dyn AccountCommand>,
    pub profiles: Arc<dyn AccountQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use arcade_backend::domain::{
    ///     AccountService, CatalogLoader, EconomyPolicy, GameEconomyService, RankingService,
    /// };
    /// use arcade_backend::inbound::http::state::HttpState;
    /// use arcade_backend::outbound::memory::{MemoryCatalogCache, MemoryLeaderboard, MemoryStore};
    /// use arcade_backend::outbound::security::Argon2CredentialHasher;
    ///
    /// let store = Arc::new(MemoryStore::new());
    /// let board = Arc::new(MemoryLeaderboard::new());
    /// let catalog = CatalogLoader::new(store.clone(), Arc::new(MemoryCatalogCache::new()));
    /// let game = GameEconomyService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     store.clone(),
    ///     board.clone(),
    ///     catalog.clone(),
    ///     EconomyPolicy::default(),
    /// );
    /// let accounts = Arc::new(AccountService::new(
    ///     store.clone(),
    ///     store.clone(),
    ///     store.clone(),
    ///     catalog,
    ///     Arc::new(Argon2CredentialHasher::new()),
    /// ));
    /// let state = HttpState::new(
    ///     Arc::new(game),
    ///     Arc::new(RankingService::new(board)),
    ///     accounts.clone(),
    ///     accounts,
    /// );
    /// let _game = state.game.clone();
    /// ```
    pub fn new(
        game: Arc<dyn GameCommand>,
        rankings: Arc<dyn RankingQuery>,
        accounts: Arc<dyn AccountCommand>,
        profiles: Arc<dyn AccountQuery>,
    ) -> Self {
        Self {
            game,
            rankings,
            accounts,
            profiles,
        }
    }
}
