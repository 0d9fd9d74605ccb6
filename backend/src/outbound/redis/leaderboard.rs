//! Redis sorted-set leaderboard.
//!
//! Members are display names and scores are the latest submitted score.
//! Pages are read with `ZREVRANGE … WITHSCORES`, so ties follow Redis'
//! reverse lexicographic member order.

use async_trait::async_trait;
use bb8_redis::redis::{AsyncCommands, RedisError};
use tracing::debug;

use crate::domain::ports::{LeaderboardRepository, LeaderboardRepositoryError};
use crate::domain::ranking::assign_ranks;
use crate::domain::{LeaderboardEntry, LeaderboardKey, RANKING_PAGE_SIZE, RankingEntry, StartRank};

use super::pool::{RedisPool, RedisPoolError};

fn map_pool_error(error: RedisPoolError) -> LeaderboardRepositoryError {
    LeaderboardRepositoryError::backend(error.into_message())
}

fn map_redis_error(error: RedisError) -> LeaderboardRepositoryError {
    debug!(kind = ?error.kind(), %error, "redis leaderboard command failed");
    LeaderboardRepositoryError::backend(error.to_string())
}

/// Inclusive `ZREVRANGE` bounds for the page starting at `start`.
pub(crate) fn page_bounds(start: StartRank) -> (isize, isize) {
    let first = start.offset() as isize;
    (first, first + RANKING_PAGE_SIZE as isize - 1)
}

/// Clamp a sorted-set score into the score domain.
pub(crate) fn score_from_redis(raw: f64) -> u32 {
    if raw.is_nan() || raw <= 0.0 {
        0
    } else if raw >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        raw as u32
    }
}

/// [`LeaderboardRepository`] over a Redis sorted set.
#[derive(Clone)]
pub struct RedisLeaderboard {
    pool: RedisPool,
}

impl RedisLeaderboard {
    /// Leaderboard using connections from `pool`.
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaderboardRepository for RedisLeaderboard {
    async fn list(
        &self,
        key: &LeaderboardKey,
        start: StartRank,
    ) -> Result<Vec<RankingEntry>, LeaderboardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let total: u64 = conn.zcard(key.as_str()).await.map_err(map_redis_error)?;
        if u64::from(start.value()) > total {
            return Err(LeaderboardRepositoryError::empty_range(start.value(), total));
        }

        let (first, last) = page_bounds(start);
        let rows: Vec<(String, f64)> = conn
            .zrevrange_withscores(key.as_str(), first, last)
            .await
            .map_err(map_redis_error)?;
        Ok(assign_ranks(
            start,
            rows.into_iter()
                .map(|(member, score)| (member, score_from_redis(score))),
        ))
    }

    async fn create(
        &self,
        key: &LeaderboardKey,
        entry: &LeaderboardEntry,
    ) -> Result<(), LeaderboardRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.zadd::<_, _, _, ()>(key.as_str(), entry.username.to_string(), entry.score.value())
            .await
            .map_err(map_redis_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, (0, 9))]
    #[case(2, (1, 10))]
    #[case(11, (10, 19))]
    fn page_bounds_cover_exactly_one_page(#[case] start: i64, #[case] expected: (isize, isize)) {
        let start = StartRank::new(start).expect("valid start");

        assert_eq!(page_bounds(start), expected);
    }

    #[rstest]
    #[case(1200.0, 1200)]
    #[case(0.0, 0)]
    #[case(-3.0, 0)]
    #[case(f64::NAN, 0)]
    #[case(1e12, u32::MAX)]
    fn scores_are_clamped(#[case] raw: f64, #[case] expected: u32) {
        assert_eq!(score_from_redis(raw), expected);
    }
}
