//! Leaderboard read service.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{LeaderboardRepository, LeaderboardRepositoryError, RankingQuery};
use crate::domain::{Error, LeaderboardKey, RankingEntry, StartRank};

fn map_leaderboard_error(error: LeaderboardRepositoryError) -> Error {
    match error {
        LeaderboardRepositoryError::Backend { message } => {
            Error::service_unavailable(format!("leaderboard unavailable: {message}"))
        }
        LeaderboardRepositoryError::EmptyRange { start, total } => {
            Error::not_found(format!("no rankings from rank {start}")).with_details(json!({
                "code": "empty_range",
                "start": start,
                "total": total,
            }))
        }
    }
}

/// Implements [`RankingQuery`] over the score board.
#[derive(Clone)]
pub struct RankingService {
    leaderboard: Arc<dyn LeaderboardRepository>,
    key: LeaderboardKey,
}

impl RankingService {
    /// Read pages of [`LeaderboardKey::score_board`].
    pub fn new(leaderboard: Arc<dyn LeaderboardRepository>) -> Self {
        Self {
            leaderboard,
            key: LeaderboardKey::score_board(),
        }
    }
}

#[async_trait]
impl RankingQuery for RankingService {
    async fn list_rankings(&self, start: StartRank) -> Result<Vec<RankingEntry>, Error> {
        self.leaderboard
            .list(&self.key, start)
            .await
            .map_err(map_leaderboard_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockLeaderboardRepository;
    use rstest::rstest;

    fn start(value: i64) -> StartRank {
        StartRank::new(value).expect("start")
    }

    #[tokio::test]
    async fn returns_the_repository_page() {
        let page = vec![RankingEntry {
            username: "ada".to_owned(),
            score: 900,
            rank: 1,
        }];
        let expected = page.clone();
        let mut repo = MockLeaderboardRepository::new();
        repo.expect_list()
            .withf(|key, from| *key == LeaderboardKey::score_board() && from.value() == 1)
            .times(1)
            .return_once(move |_, _| Ok(page));

        let result = RankingService::new(Arc::new(repo))
            .list_rankings(start(1))
            .await
            .expect("page");

        assert_eq!(result, expected);
    }

    #[rstest]
    #[case(
        LeaderboardRepositoryError::empty_range(4_u32, 3_u64),
        ErrorCode::NotFound
    )]
    #[case(
        LeaderboardRepositoryError::backend("timeout"),
        ErrorCode::ServiceUnavailable
    )]
    #[tokio::test]
    async fn maps_repository_errors(
        #[case] failure: LeaderboardRepositoryError,
        #[case] expected: ErrorCode,
    ) {
        let mut repo = MockLeaderboardRepository::new();
        repo.expect_list().return_once(move |_, _| Err(failure));

        let err = RankingService::new(Arc::new(repo))
            .list_rankings(start(4))
            .await
            .expect_err("error");

        assert_eq!(err.code(), expected);
    }

    #[tokio::test]
    async fn empty_range_carries_a_stable_detail_code() {
        let mut repo = MockLeaderboardRepository::new();
        repo.expect_list()
            .return_once(|_, _| Err(LeaderboardRepositoryError::empty_range(11_u32, 10_u64)));

        let err = RankingService::new(Arc::new(repo))
            .list_rankings(start(11))
            .await
            .expect_err("empty range");

        assert_eq!(
            err.details(),
            Some(&json!({ "code": "empty_range", "start": 11, "total": 10 }))
        );
    }
}
