use log::{info, trace};
use std::time::Duration;

use crate::events::EventHandler;
use crate::model::{GameEngineEvent, GridSize, PuzzleStats, UserStats};
use crate::storage::{load_record, save_record, KeyValueStore, STATS_KEY};

/// Lifetime statistics, persisted under [`STATS_KEY`].
#[derive(Debug)]
pub struct StatsManager<S: KeyValueStore> {
    store: S,
    stats: UserStats,
}

impl<S: KeyValueStore> StatsManager<S> {
    /// Loads saved stats; a missing or unreadable record starts fresh.
    pub fn load(store: S) -> Self {
        let stats: UserStats = load_record(&store, STATS_KEY).unwrap_or_default();
        trace!(target: "stats", "Loaded stats: {:?}", stats);
        Self { store, stats }
    }

    pub fn record_completion(&mut self, stats: &PuzzleStats) {
        self.stats.record(stats);
        info!(
            target: "stats",
            "Recorded {} in {:?}; total completed: {}",
            stats.puzzle_id,
            stats.time,
            self.stats.total_completed
        );
        self.save();
    }

    pub fn save(&mut self) -> bool {
        save_record(&mut self.store, STATS_KEY, &self.stats)
    }

    pub fn user_stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn best_time(&self, size: GridSize) -> Option<Duration> {
        self.stats.best_time(size)
    }

    /// Newest first.
    pub fn recent_puzzles(&self) -> &[PuzzleStats] {
        &self.stats.recent_puzzles
    }

    pub fn average_accuracy(&self) -> f64 {
        self.stats.average_accuracy
    }

    pub fn total_completed(&self) -> u32 {
        self.stats.total_completed
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: KeyValueStore> EventHandler<GameEngineEvent> for StatsManager<S> {
    fn handle_event(&mut self, event: &GameEngineEvent) {
        if let GameEngineEvent::PuzzleCompleted(stats) = event {
            self.record_completion(stats);
        }
    }
}
