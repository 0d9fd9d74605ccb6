//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod account_query;
mod cache_key;
mod catalog_cache;
mod catalog_repository;
mod credential_hasher;
mod game_command;
mod leaderboard_repository;
mod ownership_repository;
mod player_repository;
mod ranking_query;
mod score_repository;
mod transaction;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use account_query::MockAccountQuery;
pub use account_query::AccountQuery;
pub use cache_key::{CacheKey, CacheKeyValidationError};
#[cfg(test)]
pub use catalog_cache::MockCatalogCache;
pub use catalog_cache::{CatalogCache, CatalogCacheError};
#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
pub use catalog_repository::{CatalogRepository, CatalogRepositoryError};
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialHasher, CredentialHasherError};
#[cfg(test)]
pub use game_command::MockGameCommand;
pub use game_command::{
    DrawGachaOutcome, DrawGachaRequest, FinishGameOutcome, FinishGameRequest, GameCommand,
    LeaderboardSync,
};
#[cfg(test)]
pub use leaderboard_repository::MockLeaderboardRepository;
pub use leaderboard_repository::{LeaderboardRepository, LeaderboardRepositoryError};
#[cfg(test)]
pub use ownership_repository::MockOwnershipRepository;
pub use ownership_repository::{OwnershipRepository, OwnershipRepositoryError};
#[cfg(test)]
pub use player_repository::MockPlayerRepository;
pub use player_repository::{PlayerRepository, PlayerRepositoryError};
#[cfg(test)]
pub use ranking_query::MockRankingQuery;
pub use ranking_query::RankingQuery;
#[cfg(test)]
pub use score_repository::MockScoreRepository;
pub use score_repository::{ScoreRepository, ScoreRepositoryError};
pub use transaction::{
    TransactionCoordinator, TransactionError, TransactionScope, UnitOfWork,
};
