//! High score leaderboard
//!
//! Tracks the top 10 run scores.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, Storage};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the run
    pub score: u64,
    /// Obstacles passed during the run
    pub obstacles_passed: u64,
    /// How long the run lasted (ms)
    #[serde(default)]
    pub duration_ms: f64,
    /// Scroll speed when the run ended (units/frame)
    #[serde(default)]
    pub end_speed: f32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "buhio_run_highscores";

    pub fn new() -> Self {
        Self::default()
    }

    /// Slot a score would take; ties rank behind existing entries
    fn insertion_index(&self, score: u64) -> usize {
        self.entries.partition_point(|e| e.score >= score)
    }

    /// Rank a score would reach (1-indexed). Zero never ranks.
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let index = self.insertion_index(score);
        (index < MAX_HIGH_SCORES).then_some(index + 1)
    }

    pub fn qualifies(&self, score: u64) -> bool {
        self.potential_rank(score).is_some()
    }

    /// Record a finished run. Returns its rank when it made the board
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        let rank = self.potential_rank(entry.score)?;
        self.entries.insert(rank - 1, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.best().map(|e| e.score)
    }

    /// Load high scores, starting fresh when absent or unreadable
    pub fn load(storage: &dyn Storage) -> Self {
        match persistence::load_json::<HighScores>(storage, Self::STORAGE_KEY) {
            Ok(Some(mut scores)) => {
                scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
                scores.entries.truncate(MAX_HIGH_SCORES);
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Failed to load high scores ({e}), starting fresh");
                Self::new()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        match persistence::save_json(storage, Self::STORAGE_KEY, self) {
            Ok(()) => log::info!("High scores saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("Failed to save high scores: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    fn entry(score: u64) -> HighScoreEntry {
        HighScoreEntry {
            score,
            obstacles_passed: score / 10,
            duration_ms: score as f64 * 100.0,
            end_speed: 0.3,
            timestamp: 0.0,
        }
    }

    #[test]
    fn test_zero_never_qualifies() {
        let mut scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert_eq!(scores.potential_rank(0), None);
        assert_eq!(scores.add_score(entry(0)), None);
        assert!(scores.is_empty());
    }

    #[test]
    fn test_ranks_and_truncation() {
        let mut scores = HighScores::new();
        for i in 1..=MAX_HIGH_SCORES as u64 {
            scores.add_score(entry(i * 10));
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(100));

        // Lowest is 10; equal score does not displace it
        assert!(!scores.qualifies(10));
        assert_eq!(scores.potential_rank(55), Some(6));
        assert_eq!(scores.add_score(entry(55)), Some(6));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(20));

        assert_eq!(scores.add_score(entry(500)), Some(1));
        assert_eq!(scores.top_score(), Some(500));
    }

    #[test]
    fn test_tie_ranks_behind_earlier_run() {
        let mut scores = HighScores::new();
        let mut first = entry(40);
        first.timestamp = 1.0;
        let mut second = entry(40);
        second.timestamp = 2.0;

        assert_eq!(scores.add_score(first), Some(1));
        assert_eq!(scores.add_score(second), Some(2));
        assert_eq!(scores.best().map(|e| e.timestamp), Some(1.0));
    }

    #[test]
    fn test_persist_roundtrip() {
        let mut storage = MemoryStorage::default();
        let mut scores = HighScores::load(&storage);
        assert!(scores.is_empty());

        scores.add_score(entry(30));
        scores.add_score(entry(90));
        scores.save(&mut storage);

        let loaded = HighScores::load(&storage);
        assert_eq!(loaded.top_score(), Some(90));
        assert_eq!(loaded.best().map(|e| e.duration_ms), Some(9000.0));
        assert_eq!(loaded.entries.len(), 2);
    }

    #[test]
    fn test_entries_without_run_details_still_load() {
        let mut storage = MemoryStorage::default();
        storage
            .set_item(
                HighScores::STORAGE_KEY,
                r#"{ "entries": [ { "score": 20, "obstacles_passed": 2, "timestamp": 5.0 } ] }"#,
            )
            .unwrap();

        let loaded = HighScores::load(&storage);
        let best = loaded.best().unwrap();
        assert_eq!(best.score, 20);
        assert_eq!(best.duration_ms, 0.0);
        assert_eq!(best.end_speed, 0.0);
    }
}
