use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::GameResult;

pub use entry::HighScoreEntry;

mod entry;

pub static DEFAULT_LEADERBOARD_PATH: &str = "high_scores.json";

/// Where the leaderboard lives between runs.
pub trait LeaderboardStore {
    /// Absent storage is an empty leaderboard, not an error.
    fn load(&self) -> GameResult<Vec<HighScoreEntry>>;

    /// Replaces whatever was stored before.
    fn save(&mut self, entries: &[HighScoreEntry]) -> GameResult<()>;
}

/// Pretty printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_LEADERBOARD_PATH)
    }
}

impl LeaderboardStore for JsonFileStore {
    fn load(&self) -> GameResult<Vec<HighScoreEntry>> {
        let mut f = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("排行榜文件({:?})不存在, 使用空排行榜", self.path);
                return Ok(vec![]);
            }
            Err(e) => return Err(e.into()),
        };

        let mut s = String::new();
        f.read_to_string(&mut s)?;

        Ok(serde_json::from_str(&s)?)
    }

    fn save(&mut self, entries: &[HighScoreEntry]) -> GameResult<()> {
        let s = serde_json::to_string_pretty(entries)?;

        let mut f = File::create(&self.path)?;
        f.write_all(s.as_bytes())?;
        f.flush()?;

        Ok(())
    }
}

/// Keeps the leaderboard in process. Nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<HighScoreEntry>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<HighScoreEntry>) -> Self {
        Self { entries, saves: 0 }
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// How many times `save` has been called.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl LeaderboardStore for MemoryStore {
    fn load(&self) -> GameResult<Vec<HighScoreEntry>> {
        Ok(self.entries.clone())
    }

    fn save(&mut self, entries: &[HighScoreEntry]) -> GameResult<()> {
        self.entries = entries.to_vec();
        self.saves += 1;
        Ok(())
    }
}
