use std::fmt::{Display, Formatter};
use std::num::IntErrorKind;

use rand::{thread_rng, Rng};
use tracing::{debug, info, warn};

use crate::data::{HighScoreEntry, LeaderboardStore};
use crate::error::{GameResult, GuessError, StartError};
use crate::game::score::{score, ScoreKeeper};
use crate::game::Range;

/// A single player's game, from `start` until the number is found or the
/// attempts run out.
///
/// The session owns the [`ScoreKeeper`]; wins are recorded there before
/// `guess` returns.
pub struct GameSession<S> {
    keeper: ScoreKeeper<S>,
    round: Option<Round>,
}

#[derive(Debug)]
struct Round {
    player: String,
    range: Range,
    secret: i64,
    attempts_used: u32,
    max_attempts: u32,
}

impl Round {
    fn attempts_left(&self) -> u32 {
        self.max_attempts - self.attempts_used
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Started {
    pub message: String,
    pub attempts_left: u32,
    pub range: Range,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    /// The guess was too low.
    Higher,
    /// The guess was too high.
    Lower,
}

impl Display for Hint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Higher => write!(f, "higher"),
            Self::Lower => write!(f, "lower"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Won {
        secret: i64,
        attempts_used: u32,
        score: u32,
    },
    Lost {
        secret: i64,
        attempts_used: u32,
    },
    Continue {
        hint: Hint,
        attempts_used: u32,
        attempts_left: u32,
        last_guess: i64,
    },
}

impl GuessOutcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Self::Continue { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    NoGame,
    Active {
        player: String,
        attempts_used: u32,
        attempts_left: u32,
        range: Range,
    },
}

impl<S: LeaderboardStore> GameSession<S> {
    pub fn new(keeper: ScoreKeeper<S>) -> Self {
        Self {
            keeper,
            round: None,
        }
    }

    pub fn start<P: ToString>(
        &mut self,
        player: P,
        min: i64,
        max: i64,
        max_attempts: u32,
    ) -> GameResult<Started> {
        self.start_with_rng(&mut thread_rng(), player, min, max, max_attempts)
    }

    /// Draws the secret from `rng`. A seeded generator gives a repeatable game.
    pub fn start_with_rng<R, P>(
        &mut self,
        rng: &mut R,
        player: P,
        min: i64,
        max: i64,
        max_attempts: u32,
    ) -> GameResult<Started>
    where
        R: Rng + ?Sized,
        P: ToString,
    {
        let range = validate(min, max, max_attempts)?;
        let secret = rng.gen_range(range.min..=range.max);

        Ok(self.begin(player.to_string(), range, secret, max_attempts))
    }

    pub fn start_with_secret<P: ToString>(
        &mut self,
        player: P,
        min: i64,
        max: i64,
        max_attempts: u32,
        secret: i64,
    ) -> GameResult<Started> {
        let range = validate(min, max, max_attempts)?;
        if !range.contains(secret) {
            return Err(StartError::SecretOutOfRange { secret, min, max }.into());
        }

        Ok(self.begin(player.to_string(), range, secret, max_attempts))
    }

    fn begin(&mut self, player: String, range: Range, secret: i64, max_attempts: u32) -> Started {
        if let Some(old) = self.round.take() {
            info!("{} 的游戏被新游戏替换 (已猜 {} 次)", old.player, old.attempts_used);
        }

        info!("{} 开始新游戏, 范围 {}, 最多 {} 次", player, range, max_attempts);
        debug!("秘密数字: {}", secret);

        let message = format!(
            "Welcome {player}! I'm thinking of a number between {} and {}.",
            range.min, range.max
        );

        self.round = Some(Round {
            player,
            range,
            secret,
            attempts_used: 0,
            max_attempts,
        });

        Started {
            message,
            attempts_left: max_attempts,
            range,
        }
    }

    pub fn guess(&mut self, input: &str) -> GameResult<GuessOutcome> {
        let round = self.round.as_mut().ok_or(GuessError::NoActiveGame)?;

        let range = round.range;
        let guess: i64 = input.trim().parse().map_err(|e: std::num::ParseIntError| {
            // too large for i64 is still an integer, just not one in range
            let guess = match e.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => {
                    warn!("无效的输入: {:?}", input);
                    return GuessError::InvalidFormat(input.to_owned());
                }
            };

            warn!("猜测 {} 超出范围 {}", input.trim(), range);
            GuessError::OutOfRange {
                guess,
                min: range.min,
                max: range.max,
            }
        })?;

        if !round.range.contains(guess) {
            warn!("猜测 {} 超出范围 {}", guess, round.range);
            return Err(GuessError::OutOfRange {
                guess,
                min: round.range.min,
                max: round.range.max,
            }
            .into());
        }

        round.attempts_used += 1;
        debug!(
            "{} 第 {} 次猜测: {}",
            round.player, round.attempts_used, guess
        );

        let outcome = if guess == round.secret {
            GuessOutcome::Won {
                secret: round.secret,
                attempts_used: round.attempts_used,
                score: score(round.attempts_used),
            }
        } else if round.attempts_left() == 0 {
            GuessOutcome::Lost {
                secret: round.secret,
                attempts_used: round.attempts_used,
            }
        } else {
            let hint = if guess < round.secret {
                Hint::Higher
            } else {
                Hint::Lower
            };

            return Ok(GuessOutcome::Continue {
                hint,
                attempts_used: round.attempts_used,
                attempts_left: round.attempts_left(),
                last_guess: guess,
            });
        };

        if let Some(round) = self.round.take() {
            self.finish(round, &outcome)?;
        }

        Ok(outcome)
    }

    fn finish(&mut self, round: Round, outcome: &GuessOutcome) -> GameResult<()> {
        match *outcome {
            GuessOutcome::Won {
                secret,
                attempts_used,
                score,
            } => {
                info!(
                    "{} 猜中了 {}, 用了 {} 次, 得分 {}",
                    round.player, secret, attempts_used, score
                );

                self.keeper.record(HighScoreEntry::new(
                    round.player,
                    score,
                    attempts_used,
                    round.range,
                ))
            }
            GuessOutcome::Lost {
                secret,
                attempts_used,
            } => {
                info!(
                    "{} 用完了 {} 次机会, 答案是 {}",
                    round.player, attempts_used, secret
                );
                Ok(())
            }
            GuessOutcome::Continue { .. } => Ok(()),
        }
    }

    pub fn status(&self) -> Status {
        match &self.round {
            None => Status::NoGame,
            Some(round) => Status::Active {
                player: round.player.clone(),
                attempts_used: round.attempts_used,
                attempts_left: round.attempts_left(),
                range: round.range,
            },
        }
    }

    pub fn is_active(&self) -> bool {
        self.round.is_some()
    }

    pub fn score_keeper(&self) -> &ScoreKeeper<S> {
        &self.keeper
    }

    pub fn into_score_keeper(self) -> ScoreKeeper<S> {
        self.keeper
    }
}

fn validate(min: i64, max: i64, max_attempts: u32) -> Result<Range, StartError> {
    if min >= max {
        return Err(StartError::InvalidRange { min, max });
    }

    if max_attempts == 0 {
        return Err(StartError::InvalidAttempts);
    }

    Ok(Range::new(min, max))
}
