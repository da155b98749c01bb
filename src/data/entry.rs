use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::game::Range;

/// One leaderboard row, as persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub player: String,
    pub score: u32,
    pub attempts: u32,
    #[serde(rename = "date")]
    pub timestamp: String,
    /// `"min-max"`
    pub range: String,
}

impl HighScoreEntry {
    /// Stamps the entry with the current local time, or UTC when the local
    /// offset cannot be determined.
    pub fn new<S: ToString>(player: S, score: u32, attempts: u32, range: Range) -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());

        Self::with_timestamp(player, score, attempts, range, now)
    }

    pub fn with_timestamp<S: ToString>(
        player: S,
        score: u32,
        attempts: u32,
        range: Range,
        at: OffsetDateTime,
    ) -> Self {
        Self {
            player: player.to_string(),
            score,
            attempts,
            timestamp: at.format(&Rfc3339).unwrap_or_default(),
            range: range.to_string(),
        }
    }
}
