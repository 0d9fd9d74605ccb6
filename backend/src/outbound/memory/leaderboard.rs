//! Process-local leaderboard with sorted-set semantics.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{LeaderboardRepository, LeaderboardRepositoryError};
use crate::domain::ranking::assign_ranks;
use crate::domain::{LeaderboardEntry, LeaderboardKey, RANKING_PAGE_SIZE, RankingEntry, StartRank};

type Board = HashMap<String, u32>;

/// [`LeaderboardRepository`] over in-process maps, one per board key.
///
/// Orders like `ZREVRANGE`: score descending, ties by member descending.
#[derive(Debug, Clone, Default)]
pub struct MemoryLeaderboard {
    boards: Arc<RwLock<HashMap<LeaderboardKey, Board>>>,
}

impl MemoryLeaderboard {
    /// Empty leaderboard.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeaderboardRepository for MemoryLeaderboard {
    async fn list(
        &self,
        key: &LeaderboardKey,
        start: StartRank,
    ) -> Result<Vec<RankingEntry>, LeaderboardRepositoryError> {
        let boards = self.boards.read().await;
        let mut rows: Vec<(String, u32)> = boards
            .get(key)
            .map(|board| board.iter().map(|(m, s)| (m.clone(), *s)).collect())
            .unwrap_or_default();
        let total = rows.len() as u64;
        if u64::from(start.value()) > total {
            return Err(LeaderboardRepositoryError::empty_range(start.value(), total));
        }

        rows.sort_by_key(|(member, score)| Reverse((*score, member.clone())));
        let page = rows
            .into_iter()
            .skip(start.offset() as usize)
            .take(RANKING_PAGE_SIZE as usize);
        Ok(assign_ranks(start, page))
    }

    async fn create(
        &self,
        key: &LeaderboardKey,
        entry: &LeaderboardEntry,
    ) -> Result<(), LeaderboardRepositoryError> {
        self.boards
            .write()
            .await
            .entry(key.clone())
            .or_default()
            .insert(entry.username.to_string(), entry.score.value());
        Ok(())
    }
}
