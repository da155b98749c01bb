use std::fmt::{Display, Formatter};

pub use score::{score, ScoreKeeper, BASE_SCORE, MIN_SCORE, PENALTY_PER_ATTEMPT};
pub use session::{GameSession, GuessOutcome, Hint, Started, Status};

pub mod score;
pub mod session;

/// Inclusive bounds of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub min: i64,
    pub max: i64,
}

impl Range {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, n: i64) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}
