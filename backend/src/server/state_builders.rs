//! Builders for the HTTP state from configured stores.
//!
//! Postgres and Redis are chosen independently: a missing database pool
//! selects the in-memory ledger seeded with a small demo catalogue, and a
//! missing Redis pool selects the in-memory cache and leaderboard.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use arcade_backend::domain::ports::{
    CatalogCache, CatalogRepository, LeaderboardRepository, OwnershipRepository,
    PlayerRepository, TransactionCoordinator,
};
use arcade_backend::domain::{
    AccountService, CatalogLoader, Collectible, CollectibleId, CollectibleValidationError,
    EconomyPolicy, GameEconomyService, Rarity, RankingService, Weight,
};
use arcade_backend::inbound::http::state::HttpState;
use arcade_backend::outbound::memory::{MemoryCatalogCache, MemoryLeaderboard, MemoryStore};
use arcade_backend::outbound::persistence::{
    DieselCatalogRepository, DieselOwnershipRepository, DieselPlayerRepository,
    DieselTransactionCoordinator,
};
use arcade_backend::outbound::redis::{RedisCatalogCache, RedisLeaderboard};
use arcade_backend::outbound::security::Argon2CredentialHasher;

use super::ServerConfig;

const DEMO_CATALOG: [(&str, i64, i64); 6] = [
    ("Pebble", 0, 40),
    ("Paper Crane", 1, 25),
    ("Glass Marble", 2, 15),
    ("Brass Compass", 3, 10),
    ("Silver Lantern", 4, 7),
    ("Golden Koi", 5, 3),
];

/// Catalogue used when no database is configured.
pub(super) fn demo_catalog() -> Result<Vec<Collectible>, CollectibleValidationError> {
    DEMO_CATALOG
        .iter()
        .map(|(name, rarity, weight)| {
            Collectible::new(
                CollectibleId::random(),
                *name,
                Rarity::new(*rarity)?,
                Weight::new(*weight)?,
            )
        })
        .collect()
}

/// Stores backing the ledger; the coordinator type differs per backend.
struct LedgerStores<T> {
    transactions: Arc<T>,
    players: Arc<dyn PlayerRepository>,
    ownerships: Arc<dyn OwnershipRepository>,
    catalog: Arc<dyn CatalogRepository>,
}

/// Redis-or-memory collaborators.
struct CacheStores {
    catalog_cache: Arc<dyn CatalogCache>,
    leaderboard: Arc<dyn LeaderboardRepository>,
}

fn build_cache_stores(config: &ServerConfig) -> CacheStores {
    match &config.redis_pool {
        Some(pool) => CacheStores {
            catalog_cache: Arc::new(RedisCatalogCache::new(pool.clone())),
            leaderboard: Arc::new(RedisLeaderboard::new(pool.clone())),
        },
        None => {
            info!("no redis configured; using in-memory cache and leaderboard");
            CacheStores {
                catalog_cache: Arc::new(MemoryCatalogCache::new()),
                leaderboard: Arc::new(MemoryLeaderboard::new()),
            }
        }
    }
}

fn assemble<T>(ledger: LedgerStores<T>, caches: CacheStores, policy: EconomyPolicy) -> HttpState
where
    T: TransactionCoordinator + 'static,
{
    let LedgerStores {
        transactions,
        players,
        ownerships,
        catalog,
    } = ledger;
    let loader = CatalogLoader::new(catalog, caches.catalog_cache);
    let game = GameEconomyService::new(
        transactions.clone(),
        players.clone(),
        ownerships.clone(),
        caches.leaderboard.clone(),
        loader.clone(),
        policy,
    );
    let accounts = Arc::new(AccountService::new(
        transactions,
        players,
        ownerships,
        loader,
        Arc::new(Argon2CredentialHasher::new()),
    ));
    HttpState::new(
        Arc::new(game),
        Arc::new(RankingService::new(caches.leaderboard)),
        accounts.clone(),
        accounts,
    )
}

/// Build the shared HTTP state from configured stores.
///
/// # Errors
/// Returns [`std::io::Error`] if the demo catalogue fails validation.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let caches = build_cache_stores(config);
    let state = match &config.db_pool {
        Some(pool) => assemble(
            LedgerStores {
                transactions: Arc::new(DieselTransactionCoordinator::new(pool.clone())),
                players: Arc::new(DieselPlayerRepository::new(pool.clone())),
                ownerships: Arc::new(DieselOwnershipRepository::new(pool.clone())),
                catalog: Arc::new(DieselCatalogRepository::new(pool.clone())),
            },
            caches,
            config.policy,
        ),
        None => {
            let catalog = demo_catalog()
                .map_err(|err| std::io::Error::other(format!("invalid demo catalogue: {err}")))?;
            info!(
                items = catalog.len(),
                "no database configured; using in-memory ledger with demo catalogue"
            );
            let store = Arc::new(MemoryStore::with_catalog(catalog));
            assemble(
                LedgerStores {
                    transactions: store.clone(),
                    players: store.clone(),
                    ownerships: store.clone(),
                    catalog: store,
                },
                caches,
                config.policy,
            )
        }
    };
    Ok(web::Data::new(state))
}
