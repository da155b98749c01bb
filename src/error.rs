use std::fmt::{Display, Formatter};
use std::io;

pub type GameResult<T> = Result<T, GameError>;

#[derive(Debug)]
pub enum GameError {
    Guess(GuessError),
    Start(StartError),
    IO(io::Error),
    Json(serde_json::Error),
}

/// Rejected guesses. None of these consume an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessError {
    NoActiveGame,
    InvalidFormat(String),
    OutOfRange { guess: i64, min: i64, max: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    InvalidRange { min: i64, max: i64 },
    InvalidAttempts,
    SecretOutOfRange { secret: i64, min: i64, max: i64 },
}

impl GameError {
    /// The session is still usable after a recoverable error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Guess(_) | Self::Start(_))
    }
}

impl Display for GameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guess(e) => Display::fmt(e, f),
            Self::Start(e) => Display::fmt(e, f),
            Self::IO(e) => write!(f, "leaderboard storage error: {e}"),
            Self::Json(e) => write!(f, "malformed leaderboard: {e}"),
        }
    }
}

impl Display for GuessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveGame => write!(f, "No active game. Start a new game first!"),
            Self::InvalidFormat(_) => write!(f, "Please enter a valid number!"),
            Self::OutOfRange { min, max, .. } => {
                write!(f, "Guess must be between {min} and {max}!")
            }
        }
    }
}

impl Display for StartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange { min, max } => {
                write!(f, "invalid range {min}-{max}, min must be less than max")
            }
            Self::InvalidAttempts => write!(f, "at least one attempt is required"),
            Self::SecretOutOfRange { secret, min, max } => {
                write!(f, "secret {secret} is outside {min}-{max}")
            }
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IO(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for GuessError {}

impl std::error::Error for StartError {}

impl From<io::Error> for GameError {
    fn from(err: io::Error) -> Self {
        Self::IO(err)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<GuessError> for GameError {
    fn from(err: GuessError) -> Self {
        Self::Guess(err)
    }
}

impl From<StartError> for GameError {
    fn from(err: StartError) -> Self {
        Self::Start(err)
    }
}
