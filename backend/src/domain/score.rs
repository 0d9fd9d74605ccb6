//! Game scores and the append-only score event log.

use thiserror::Error;
use uuid::Uuid;

use super::UserId;

/// Largest accepted score; the ledger stores scores as 32-bit signed integers.
pub const SCORE_MAX: u32 = i32::MAX as u32;

/// Validation errors for [`Score`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreValidationError {
    /// Scores are never negative.
    #[error("score must not be negative (got {value})")]
    Negative { value: i64 },
    /// Score does not fit the stored range.
    #[error("score must be at most {max} (got {value})")]
    TooLarge { value: i64, max: u32 },
}

/// Non-negative score reported at the end of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(u32);

impl Score {
    /// Validate a raw client-supplied score.
    pub fn new(value: i64) -> Result<Self, ScoreValidationError> {
        if value < 0 {
            return Err(ScoreValidationError::Negative { value });
        }
        u32::try_from(value)
            .ok()
            .filter(|score| *score <= SCORE_MAX)
            .map(Self)
            .ok_or(ScoreValidationError::TooLarge {
                value,
                max: SCORE_MAX,
            })
    }

    /// The numeric score.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for Score {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// One finished game, appended by `FinishGame`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEvent {
    /// Event identifier.
    pub id: Uuid,
    /// Player who posted the score.
    pub user_id: UserId,
    /// The score itself.
    pub value: Score,
}

impl ScoreEvent {
    /// Record a new event with a fresh identifier.
    pub fn new(user_id: UserId, value: Score) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            value,
        }
    }
}
