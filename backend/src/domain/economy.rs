//! Coin economy rules: score rewards and gacha pricing.

use thiserror::Error;

use super::Score;

/// Default flat reward for any positive score.
pub const DEFAULT_BASE_REWARD: u64 = 100;
/// Default coins per score point.
pub const DEFAULT_SCORE_MULTIPLIER: u64 = 2;
/// Default price of a single draw.
pub const DEFAULT_DRAW_COST: u64 = 100;
/// Most draws allowed in one request.
pub const MAX_DRAWS_PER_REQUEST: u8 = 10;

/// Validation errors for [`DrawCount`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("times must be between 0 and {max} (got {value})")]
pub struct DrawCountValidationError {
    /// Rejected value.
    pub value: i64,
    /// Upper bound.
    pub max: u8,
}

/// Number of draws in one request, `0..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCount(u8);

impl DrawCount {
    /// Validate a raw draw count.
    pub fn new(value: i64) -> Result<Self, DrawCountValidationError> {
        u8::try_from(value)
            .ok()
            .filter(|times| *times <= MAX_DRAWS_PER_REQUEST)
            .map(Self)
            .ok_or(DrawCountValidationError {
                value,
                max: MAX_DRAWS_PER_REQUEST,
            })
    }

    /// Numeric count.
    pub fn value(self) -> u8 {
        self.0
    }
}

/// Reward and pricing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EconomyPolicy {
    base_reward: u64,
    score_multiplier: u64,
    draw_cost: u64,
}

impl Default for EconomyPolicy {
    fn default() -> Self {
        Self {
            base_reward: DEFAULT_BASE_REWARD,
            score_multiplier: DEFAULT_SCORE_MULTIPLIER,
            draw_cost: DEFAULT_DRAW_COST,
        }
    }
}

impl EconomyPolicy {
    /// Build a policy from explicit parameters.
    pub fn new(base_reward: u64, score_multiplier: u64, draw_cost: u64) -> Self {
        Self {
            base_reward,
            score_multiplier,
            draw_cost,
        }
    }

    /// Coins earned for `score`: nothing for zero, otherwise
    /// `base_reward + score * score_multiplier`.
    ///
    /// # Examples
    /// ```
    /// use arcade_backend::domain::{EconomyPolicy, Score};
    ///
    /// let policy = EconomyPolicy::default();
    /// assert_eq!(policy.reward(Score::new(100).expect("score")), 300);
    /// ```
    pub fn reward(&self, score: Score) -> u64 {
        if score.value() == 0 {
            return 0;
        }
        u64::from(score.value())
            .saturating_mul(self.score_multiplier)
            .saturating_add(self.base_reward)
    }

    /// Total price for `times` draws; linear in `times`.
    pub fn draw_cost(&self, times: DrawCount) -> u64 {
        self.draw_cost.saturating_mul(u64::from(times.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0)]
    #[case(1, 102)]
    #[case(100, 300)]
    #[case(1200, 2500)]
    fn reward_table(#[case] score: i64, #[case] expected: u64) {
        let policy = EconomyPolicy::default();
        assert_eq!(policy.reward(Score::new(score).expect("score")), expected);
    }

    #[test]
    fn reward_follows_configured_parameters() {
        let policy = EconomyPolicy::new(10, 3, 50);
        assert_eq!(policy.reward(Score::new(5).expect("score")), 25);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 100)]
    #[case(10, 1000)]
    fn draw_cost_is_linear(#[case] times: i64, #[case] expected: u64) {
        let policy = EconomyPolicy::default();
        assert_eq!(
            policy.draw_cost(DrawCount::new(times).expect("count")),
            expected
        );
    }

    #[rstest]
    #[case(-1)]
    #[case(11)]
    #[case(300)]
    fn draw_count_rejects_out_of_range(#[case] raw: i64) {
        assert!(DrawCount::new(raw).is_err());
    }
}
