pub use crate::data::{HighScoreEntry, JsonFileStore, LeaderboardStore, MemoryStore};
pub use crate::error::{GameError, GameResult, GuessError, StartError};
pub use crate::game::{GameSession, GuessOutcome, Hint, Range, ScoreKeeper, Started, Status};

pub mod config;
pub mod data;
pub mod error;
pub mod game;
pub mod service;
pub mod terminal;

pub const WELCOME_INFO: &str = include_str!(concat!(env!("OUT_DIR"), "/welcome_info"));
