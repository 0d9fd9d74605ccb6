//! Port for the ranked leaderboard.

use async_trait::async_trait;

use crate::domain::{LeaderboardEntry, LeaderboardKey, RankingEntry, StartRank};

use super::define_port_error;

define_port_error! {
    /// Errors raised by leaderboard adapters.
    pub enum LeaderboardRepositoryError {
        /// Backend is unavailable or timing out.
        Backend { message: String } =>
            "leaderboard backend failure: {message}",
        /// Requested page starts past the last member.
        EmptyRange { start: u32, total: u64 } =>
            "ranking is empty from rank {start} (board has {total} members)",
    }
}

/// Sorted board of member to score.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaderboardRepository: Send + Sync {
    /// Up to one page of entries from `start`, by descending score.
    ///
    /// Fails with [`LeaderboardRepositoryError::EmptyRange`] when `start`
    /// exceeds the member count.
    async fn list(
        &self,
        key: &LeaderboardKey,
        start: StartRank,
    ) -> Result<Vec<RankingEntry>, LeaderboardRepositoryError>;

    /// Insert or overwrite the member's score.
    async fn create(
        &self,
        key: &LeaderboardKey,
        entry: &LeaderboardEntry,
    ) -> Result<(), LeaderboardRepositoryError>;
}
