use tracing::{error, info};

use crate::data::{HighScoreEntry, LeaderboardStore};
use crate::error::GameResult;

pub const BASE_SCORE: u32 = 1000;
pub const PENALTY_PER_ATTEMPT: u32 = 100;
pub const MIN_SCORE: u32 = 100;

pub const DEFAULT_CAPACITY: usize = 10;

/// Fewer attempts score higher. Never below [`MIN_SCORE`].
pub fn score(attempts_used: u32) -> u32 {
    let penalty = attempts_used
        .saturating_sub(1)
        .saturating_mul(PENALTY_PER_ATTEMPT);

    BASE_SCORE.saturating_sub(penalty).max(MIN_SCORE)
}

/// Ranked leaderboard backed by a [`LeaderboardStore`].
///
/// Entries are kept sorted by score, highest first, and never exceed the
/// capacity. Every [`record`](Self::record) writes the whole list back.
pub struct ScoreKeeper<S> {
    store: S,
    entries: Vec<HighScoreEntry>,
    capacity: usize,
}

impl<S: LeaderboardStore> ScoreKeeper<S> {
    pub fn load(store: S) -> GameResult<Self> {
        Self::load_with_capacity(store, DEFAULT_CAPACITY)
    }

    pub fn load_with_capacity(store: S, capacity: usize) -> GameResult<Self> {
        let entries = store.load()?;

        let mut keeper = Self {
            store,
            entries,
            capacity,
        };
        keeper.normalize();

        Ok(keeper)
    }

    /// Inserts the entry at its rank and persists the truncated list.
    ///
    /// The in-memory leaderboard is updated even if persisting fails.
    pub fn record(&mut self, entry: HighScoreEntry) -> GameResult<()> {
        info!(
            "记录分数: {} {}分 ({}次, {})",
            entry.player, entry.score, entry.attempts, entry.range
        );

        self.entries.push(entry);
        self.normalize();

        if let Err(e) = self.store.save(&self.entries) {
            error!("保存排行榜时发生错误: {}", e);
            return Err(e);
        }

        Ok(())
    }

    pub fn top(&self, n: usize) -> &[HighScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn normalize(&mut self) {
        // stable, ties keep insertion order
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(self.capacity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MemoryStore;
    use crate::error::GameError;
    use crate::game::Range;
    use rstest::rstest;

    fn entry(player: &str, score: u32) -> HighScoreEntry {
        HighScoreEntry::new(player, score, 1, Range::new(1, 100))
    }

    struct FailingStore;

    impl LeaderboardStore for FailingStore {
        fn load(&self) -> GameResult<Vec<HighScoreEntry>> {
            Ok(vec![])
        }

        fn save(&mut self, _: &[HighScoreEntry]) -> GameResult<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read only").into())
        }
    }

    #[rstest]
    #[case(1, 1000)]
    #[case(2, 900)]
    #[case(3, 800)]
    #[case(5, 600)]
    #[case(9, 200)]
    #[case(10, 100)]
    #[case(11, 100)]
    #[case(50, 100)]
    fn score_by_attempts(#[case] attempts: u32, #[case] expected: u32) {
        assert_eq!(score(attempts), expected);
    }

    #[test]
    fn score_matches_formula_and_never_increases() {
        let mut last = u32::MAX;
        for attempts in 1..=10u32 {
            let expected = 1000i64 - (attempts as i64 - 1) * 100;
            assert_eq!(score(attempts) as i64, expected.max(100));
            assert!(score(attempts) <= last);
            last = score(attempts);
        }
    }

    #[test]
    fn zero_attempts_scores_as_one() {
        assert_eq!(score(0), BASE_SCORE);
        assert_eq!(score(u32::MAX), MIN_SCORE);
    }

    #[test]
    fn record_keeps_sorted_and_bounded() {
        let mut keeper = ScoreKeeper::load(MemoryStore::new()).unwrap();

        for (i, s) in [300, 1000, 100, 700, 700, 900, 200, 500, 800, 400, 600, 1000]
            .into_iter()
            .enumerate()
        {
            keeper.record(entry(&format!("p{i}"), s)).unwrap();
            assert!(keeper.entries().len() <= 10);
            assert!(keeper.entries().windows(2).all(|w| w[0].score >= w[1].score));
        }

        let scores: Vec<u32> = keeper.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, [1000, 1000, 900, 800, 700, 700, 600, 500, 400, 300]);

        // equal scores keep the order they were recorded in
        assert_eq!(keeper.entries()[0].player, "p1");
        assert_eq!(keeper.entries()[1].player, "p11");
        assert_eq!(keeper.entries()[4].player, "p3");
        assert_eq!(keeper.entries()[5].player, "p4");
    }

    #[test]
    fn record_persists_every_time() {
        let mut keeper = ScoreKeeper::load(MemoryStore::new()).unwrap();
        keeper.record(entry("Ann", 800)).unwrap();
        keeper.record(entry("Bob", 900)).unwrap();

        let store = keeper.into_store();
        assert_eq!(store.saves(), 2);
        assert_eq!(store.entries()[0].player, "Bob");
        assert_eq!(store.entries()[1].player, "Ann");
    }

    #[test]
    fn low_score_on_full_board_is_dropped() {
        let full = (0..10).map(|i| entry(&format!("p{i}"), 500)).collect();
        let mut keeper = ScoreKeeper::load(MemoryStore::with_entries(full)).unwrap();

        keeper.record(entry("late", 100)).unwrap();

        assert_eq!(keeper.entries().len(), 10);
        assert!(keeper.entries().iter().all(|e| e.player != "late"));
    }

    #[test]
    fn load_normalizes_stored_entries() {
        let stored = (0..12).map(|i| entry(&format!("p{i}"), 100 * (i + 1))).collect();
        let keeper = ScoreKeeper::load(MemoryStore::with_entries(stored)).unwrap();

        assert_eq!(keeper.entries().len(), 10);
        assert_eq!(keeper.entries()[0].score, 1200);
        assert_eq!(keeper.entries()[9].score, 300);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(3, 3)]
    #[case(5, 5)]
    #[case(100, 5)]
    fn top_is_capped(#[case] n: usize, #[case] expected: usize) {
        let stored = (0..5).map(|i| entry(&format!("p{i}"), 100 * i)).collect();
        let keeper = ScoreKeeper::load(MemoryStore::with_entries(stored)).unwrap();

        assert_eq!(keeper.top(n).len(), expected);
    }

    #[test]
    fn custom_capacity() {
        let mut keeper = ScoreKeeper::load_with_capacity(MemoryStore::new(), 3).unwrap();
        for s in [100, 200, 300, 400] {
            keeper.record(entry("p", s)).unwrap();
        }

        let scores: Vec<u32> = keeper.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, [400, 300, 200]);
    }

    #[test]
    fn failed_save_propagates_but_keeps_entry() {
        let mut keeper = ScoreKeeper::load(FailingStore).unwrap();

        let err = keeper.record(entry("Ann", 800)).unwrap_err();
        assert!(matches!(err, GameError::IO(_)));
        assert_eq!(keeper.entries().len(), 1);
    }
}
