//! Driving port for reading the leaderboard.

use async_trait::async_trait;

use crate::domain::{Error, RankingEntry, StartRank};

/// Paged leaderboard reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RankingQuery: Send + Sync {
    /// One page of ranked entries starting at `start`.
    async fn list_rankings(&self, start: StartRank) -> Result<Vec<RankingEntry>, Error>;
}
