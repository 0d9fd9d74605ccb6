//! Game economy service: finishing games and drawing gacha.
//!
//! Ledger changes run inside one unit of work with the player row locked.
//! The leaderboard lives in a separate store and is written after commit.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::gacha::{self, DrawFailure};
use crate::domain::ownership::owned_ids;
use crate::domain::ports::{
    DrawGachaOutcome, DrawGachaRequest, FinishGameOutcome, FinishGameRequest, GameCommand,
    LeaderboardRepository, LeaderboardSync, OwnershipRepository, OwnershipRepositoryError,
    PlayerRepository, PlayerRepositoryError, TransactionCoordinator,
};
use crate::domain::{
    Catalog, CatalogLoader, Collectible, DrawCount, EconomyPolicy, Error, InsufficientCoins,
    LeaderboardEntry, LeaderboardKey, Ownership, PlayerAccount, ScoreEvent, UserId,
};

pub(crate) fn map_player_repository_error(error: PlayerRepositoryError) -> Error {
    match error {
        PlayerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("player repository unavailable: {message}"))
        }
        PlayerRepositoryError::Query { message } => {
            Error::internal(format!("player repository error: {message}"))
        }
        PlayerRepositoryError::Duplicate { message } => Error::conflict(message),
    }
}

pub(crate) fn map_ownership_repository_error(error: OwnershipRepositoryError) -> Error {
    match error {
        OwnershipRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("ownership repository unavailable: {message}"))
        }
        OwnershipRepositoryError::Query { message } => {
            Error::internal(format!("ownership repository error: {message}"))
        }
    }
}

pub(crate) fn player_not_found(id: &UserId) -> Error {
    Error::not_found(format!("player {id} not found"))
}

fn map_draw_failure(failure: DrawFailure) -> Error {
    Error::internal(failure.to_string()).with_details(json!({ "code": "draw_failure" }))
}

fn map_insufficient_coins(error: InsufficientCoins) -> Error {
    Error::conflict(error.to_string()).with_details(json!({
        "code": "insufficient_coins",
        "balance": error.balance,
        "required": error.required,
    }))
}

/// Run `times` draws with the thread-local generator.
///
/// Kept synchronous so the generator never lives across an await point.
fn draw_items(catalog: &Catalog, times: DrawCount) -> Result<Vec<Collectible>, Error> {
    let mut rng = rand::thread_rng();
    gacha::draw_many(catalog, times.value(), &mut rng).map_err(map_draw_failure)
}

/// Implements [`GameCommand`] over the ledger, catalogue and leaderboard ports.
pub struct GameEconomyService<T> {
    transactions: Arc<T>,
    players: Arc<dyn PlayerRepository>,
    ownerships: Arc<dyn OwnershipRepository>,
    leaderboard: Arc<dyn LeaderboardRepository>,
    catalog: CatalogLoader,
    policy: EconomyPolicy,
}

impl<T> Clone for GameEconomyService<T> {
    fn clone(&self) -> Self {
        Self {
            transactions: Arc::clone(&self.transactions),
            players: Arc::clone(&self.players),
            ownerships: Arc::clone(&self.ownerships),
            leaderboard: Arc::clone(&self.leaderboard),
            catalog: self.catalog.clone(),
            policy: self.policy,
        }
    }
}

impl<T> GameEconomyService<T>
where
    T: TransactionCoordinator,
{
    /// Wire the service to its ports.
    pub fn new(
        transactions: Arc<T>,
        players: Arc<dyn PlayerRepository>,
        ownerships: Arc<dyn OwnershipRepository>,
        leaderboard: Arc<dyn LeaderboardRepository>,
        catalog: CatalogLoader,
        policy: EconomyPolicy,
    ) -> Self {
        Self {
            transactions,
            players,
            ownerships,
            leaderboard,
            catalog,
            policy,
        }
    }

    async fn load_player(&self, id: &UserId) -> Result<PlayerAccount, Error> {
        self.players
            .find_by_id(id)
            .await
            .map_err(map_player_repository_error)?
            .ok_or_else(|| player_not_found(id))
    }

    async fn sync_leaderboard(&self, entry: LeaderboardEntry) -> LeaderboardSync {
        let key = LeaderboardKey::score_board();
        match self.leaderboard.create(&key, &entry).await {
            Ok(()) => LeaderboardSync::Updated,
            Err(error) => {
                warn!(
                    board = %key,
                    member = %entry.username,
                    score = entry.score.value(),
                    %error,
                    "leaderboard write failed after ledger commit"
                );
                LeaderboardSync::Stale {
                    error: error.to_string(),
                }
            }
        }
    }
}

#[async_trait]
impl<T> GameCommand for GameEconomyService<T>
where
    T: TransactionCoordinator,
{
    async fn finish_game(&self, request: FinishGameRequest) -> Result<FinishGameOutcome, Error> {
        let FinishGameRequest { identity, score } = request;
        let user_id = identity.user_id().clone();
        self.load_player(&user_id).await?;

        let coins_awarded = self.policy.reward(score);
        let event = ScoreEvent::new(user_id.clone(), score);
        let account = self
            .transactions
            .run(move |scope| {
                async move {
                    let mut account = scope
                        .lock_player(&user_id)
                        .await?
                        .ok_or_else(|| player_not_found(&user_id))?;
                    scope.insert_score(&event).await?;
                    account.record_score(score);
                    account.credit(coins_awarded);
                    scope.update_player(&account).await?;
                    Ok::<_, Error>(account)
                }
                .boxed()
            })
            .await?;

        info!(
            user_id = %account.id(),
            score = score.value(),
            coins_awarded,
            coins = account.coins(),
            "game finished"
        );

        let leaderboard = self
            .sync_leaderboard(LeaderboardEntry {
                username: account.display_name().clone(),
                score,
            })
            .await;

        Ok(FinishGameOutcome {
            coins_awarded,
            high_score: account.high_score(),
            coins: account.coins(),
            leaderboard,
        })
    }

    async fn draw_gacha(&self, request: DrawGachaRequest) -> Result<DrawGachaOutcome, Error> {
        let DrawGachaRequest { identity, times } = request;
        let user_id = identity.user_id().clone();
        self.load_player(&user_id).await?;

        let catalog = self.catalog.load().await?;
        let drawn = draw_items(&catalog, times)?;
        let owned = self
            .ownerships
            .list_for_user(&user_id)
            .await
            .map_err(map_ownership_repository_error)?;
        let results = gacha::flag_against_snapshot(drawn, &owned_ids(&owned));

        let cost = self.policy.draw_cost(times);
        let rows: Vec<Ownership> = results
            .iter()
            .map(|result| Ownership::new(user_id.clone(), result.collectible.id()))
            .collect();
        let account = self
            .transactions
            .run(move |scope| {
                async move {
                    let mut account = scope
                        .lock_player(&user_id)
                        .await?
                        .ok_or_else(|| player_not_found(&user_id))?;
                    account.debit(cost).map_err(map_insufficient_coins)?;
                    scope.update_player(&account).await?;
                    if !rows.is_empty() {
                        scope.insert_ownerships(&rows).await?;
                    }
                    Ok::<_, Error>(account)
                }
                .boxed()
            })
            .await?;

        info!(
            user_id = %account.id(),
            times = times.value(),
            cost,
            coins = account.coins(),
            "gacha drawn"
        );

        Ok(DrawGachaOutcome {
            results,
            coins: account.coins(),
        })
    }
}

#[cfg(test)]
#[path = "game_service_tests.rs"]
mod tests;
