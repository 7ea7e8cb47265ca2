use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use uuid::Uuid;

use super::{Difficulty, GridSize};

/// How many completions feed the history list and the rolling accuracy.
pub const RECENT_PUZZLES_LIMIT: usize = 20;

/// Emitted once when a play session completes.
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct PuzzleStats {
    pub puzzle_id: String,
    pub completed: bool,
    pub time: Duration,
    pub errors: u32,
    pub hints_used: u32,
    pub size: GridSize,
    pub difficulty: Difficulty,
    pub completed_at: DateTime<Utc>,
    pub playthrough_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserStats {
    pub total_completed: u32,
    /// Sizes without an entry have no record yet
    #[serde(default)]
    pub best_time_by_size: BTreeMap<GridSize, Duration>,
    pub average_accuracy: f64,
    /// Newest first
    #[serde(default)]
    pub recent_puzzles: Vec<PuzzleStats>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            total_completed: 0,
            best_time_by_size: BTreeMap::new(),
            average_accuracy: 100.0,
            recent_puzzles: Vec::new(),
        }
    }
}

impl UserStats {
    pub fn record(&mut self, stats: &PuzzleStats) {
        self.total_completed += 1;

        self.best_time_by_size
            .entry(stats.size)
            .and_modify(|best| *best = (*best).min(stats.time))
            .or_insert(stats.time);

        self.recent_puzzles.insert(0, stats.clone());
        self.recent_puzzles.truncate(RECENT_PUZZLES_LIMIT);

        self.average_accuracy = Self::window_accuracy(&self.recent_puzzles);
    }

    pub fn best_time(&self, size: GridSize) -> Option<Duration> {
        self.best_time_by_size.get(&size).copied()
    }

    /// Cell-weighted accuracy over `records`: every cell of every puzzle
    /// counts once, so large boards weigh more than small ones.
    fn window_accuracy(records: &[PuzzleStats]) -> f64 {
        let total_errors: u64 = records.iter().map(|p| u64::from(p.errors)).sum();
        let total_cells: u64 = records.iter().map(|p| p.size.cells() as u64).sum();
        if total_cells == 0 {
            return 100.0;
        }
        100.0 - (total_errors as f64 / total_cells as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(size: GridSize, secs: u64, errors: u32) -> PuzzleStats {
        PuzzleStats {
            puzzle_id: format!("p_{}_{}", secs, errors),
            completed: true,
            time: Duration::from_secs(secs),
            errors,
            hints_used: 0,
            size,
            difficulty: Difficulty::Easy,
            completed_at: Utc::now(),
            playthrough_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_default_has_no_records() {
        let user = UserStats::default();
        assert_eq!(user.total_completed, 0);
        assert_eq!(user.average_accuracy, 100.0);
        for size in GridSize::all() {
            assert_eq!(user.best_time(size), None);
        }
    }

    #[test]
    fn test_best_time_is_minimum_per_size() {
        let mut user = UserStats::default();
        user.record(&stats(GridSize::Five, 90, 0));
        user.record(&stats(GridSize::Five, 45, 0));
        user.record(&stats(GridSize::Five, 60, 0));
        user.record(&stats(GridSize::Ten, 300, 0));

        assert_eq!(user.best_time(GridSize::Five), Some(Duration::from_secs(45)));
        assert_eq!(user.best_time(GridSize::Ten), Some(Duration::from_secs(300)));
        assert_eq!(user.best_time(GridSize::Twenty), None);
    }

    #[test]
    fn test_accuracy_is_weighted_by_cells() {
        let mut user = UserStats::default();
        // 5 errors over 25 cells, 0 over 100: 5 / 125 = 4%
        user.record(&stats(GridSize::Five, 10, 5));
        user.record(&stats(GridSize::Ten, 10, 0));
        assert!((user.average_accuracy - 96.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut user = UserStats::default();
        // the first five records carry all the errors
        for i in 0..25u64 {
            let errors = if i < 5 { 25 } else { 0 };
            user.record(&stats(GridSize::Five, 100 + i, errors));
        }

        assert_eq!(user.total_completed, 25);
        assert_eq!(user.recent_puzzles.len(), RECENT_PUZZLES_LIMIT);
        assert_eq!(user.recent_puzzles[0].time, Duration::from_secs(124));
        assert_eq!(user.recent_puzzles[19].time, Duration::from_secs(105));
        assert_eq!(user.average_accuracy, 100.0);
        assert_eq!(user.best_time(GridSize::Five), Some(Duration::from_secs(100)));
    }

    #[test]
    fn test_json_round_trip() {
        let mut user = UserStats::default();
        // 9 / 225 keeps the accuracy exactly representable
        user.record(&stats(GridSize::Fifteen, 200, 9));
        let json = serde_json::to_string(&user).unwrap();
        let back: UserStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }
}
