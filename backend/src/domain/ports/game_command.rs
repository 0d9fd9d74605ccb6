//! Driving port for the game economy: finishing games and drawing gacha.
//!
//! Inbound adapters call this port with an authenticated
//! [`PlayerIdentity`]; it never trusts a caller-supplied user id.

use async_trait::async_trait;

use crate::domain::{DrawCount, Error, GachaResult, PlayerIdentity, Score};

/// Finish a game and bank its reward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishGameRequest {
    pub identity: PlayerIdentity,
    pub score: Score,
}

/// State of the leaderboard after the ledger committed.
///
/// The ledger and the board live in different stores. A board write failure
/// does not undo the committed ledger change; it is reported here instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardSync {
    /// The board holds the submitted score.
    Updated,
    /// The board write failed; the ledger is still committed.
    Stale { error: String },
}

/// Result of a committed `FinishGame`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishGameOutcome {
    /// Coins credited by this game.
    pub coins_awarded: u64,
    /// High score after the game.
    pub high_score: u32,
    /// Balance after the credit.
    pub coins: u64,
    pub leaderboard: LeaderboardSync,
}

/// Draw `times` items for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawGachaRequest {
    pub identity: PlayerIdentity,
    pub times: DrawCount,
}

/// Result of a committed draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawGachaOutcome {
    /// One entry per draw, in draw order.
    pub results: Vec<GachaResult>,
    /// Balance after the debit.
    pub coins: u64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameCommand: Send + Sync {
    /// Record a score, credit its reward and post it to the leaderboard.
    async fn finish_game(&self, request: FinishGameRequest) -> Result<FinishGameOutcome, Error>;

    /// Debit the draw cost and grant the drawn items.
    async fn draw_gacha(&self, request: DrawGachaRequest) -> Result<DrawGachaOutcome, Error>;
}
