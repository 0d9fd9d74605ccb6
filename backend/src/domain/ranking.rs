//! Leaderboard entries and paging.

use std::fmt;

use thiserror::Error;

use super::{DisplayName, Score};

/// Entries returned per ranking page.
pub const RANKING_PAGE_SIZE: u32 = 10;

const SCORE_BOARD: &str = "score_board";

/// Name of a ranked board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeaderboardKey(String);

impl LeaderboardKey {
    /// The single global score board.
    pub fn score_board() -> Self {
        Self(SCORE_BOARD.to_owned())
    }

    /// Borrow the key.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LeaderboardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation error for [`StartRank`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("start rank must be at least 1 (got {value})")]
pub struct StartRankValidationError {
    /// Rejected value.
    pub value: i64,
}

/// 1-based rank a page starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StartRank(u32);

impl StartRank {
    /// Validate a raw start rank.
    pub fn new(value: i64) -> Result<Self, StartRankValidationError> {
        u32::try_from(value)
            .ok()
            .filter(|rank| *rank >= 1)
            .map(Self)
            .ok_or(StartRankValidationError { value })
    }

    /// Numeric rank.
    pub fn value(self) -> u32 {
        self.0
    }

    /// Zero-based offset into the descending score order.
    pub fn offset(self) -> u32 {
        self.0 - 1
    }
}

/// A score posted to the board; the member's previous score is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// Board member.
    pub username: DisplayName,
    /// Latest score.
    pub score: Score,
}

/// One ranked row, rank computed at query time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingEntry {
    /// Board member.
    pub username: String,
    /// Member score.
    pub score: u32,
    /// 1-based position by descending score.
    pub rank: u32,
}

/// Assign ranks `start, start + 1, …` to rows already in descending order.
pub fn assign_ranks(
    start: StartRank,
    rows: impl IntoIterator<Item = (String, u32)>,
) -> Vec<RankingEntry> {
    (start.value()..)
        .zip(rows)
        .map(|(rank, (username, score))| RankingEntry {
            username,
            score,
            rank,
        })
        .collect()
}
