use chrono::Utc;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

use super::progress;
use crate::helpers::format_time;
use crate::model::{
    CellState, GameStatus, ModelError, PlayerGrid, Puzzle, PuzzleStats, TimerState,
};

/// Outcome of a session operation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum Transition {
    /// Not valid in the current state; nothing changed.
    Ignored,
    Applied,
    /// The operation solved the puzzle.
    Completed(PuzzleStats),
}

/// One attempt at one puzzle.
///
/// Undo and redo keep whole grid snapshots, most recent last. Any accepted
/// edit clears the redo stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GameStateRecord")]
pub struct GameState {
    puzzle: Rc<Puzzle>,
    grid: PlayerGrid,
    status: GameStatus,
    timer_state: TimerState,
    errors: u32,
    hints_used: u32,
    undo_stack: Vec<PlayerGrid>,
    redo_stack: Vec<PlayerGrid>,
    playthrough_id: Uuid,
}

/// Wire shape of a [`GameState`]; every grid must match the puzzle size.
#[derive(Deserialize)]
struct GameStateRecord {
    puzzle: Rc<Puzzle>,
    grid: PlayerGrid,
    status: GameStatus,
    timer_state: TimerState,
    errors: u32,
    hints_used: u32,
    undo_stack: Vec<PlayerGrid>,
    redo_stack: Vec<PlayerGrid>,
    playthrough_id: Uuid,
}

impl TryFrom<GameStateRecord> for GameState {
    type Error = ModelError;

    fn try_from(record: GameStateRecord) -> Result<Self, Self::Error> {
        let size = record.puzzle.size().len();
        let all_grids_fit = std::iter::once(&record.grid)
            .chain(&record.undo_stack)
            .chain(&record.redo_stack)
            .all(|grid| grid.is_square_of(size));
        if !all_grids_fit {
            return Err(ModelError::GridSizeMismatch { expected: size });
        }

        Ok(Self {
            puzzle: record.puzzle,
            grid: record.grid,
            status: record.status,
            timer_state: record.timer_state,
            errors: record.errors,
            hints_used: record.hints_used,
            undo_stack: record.undo_stack,
            redo_stack: record.redo_stack,
            playthrough_id: record.playthrough_id,
        })
    }
}

impl GameState {
    pub fn start(puzzle: Rc<Puzzle>) -> Self {
        Self::start_at(puzzle, SystemTime::now())
    }

    pub fn start_at(puzzle: Rc<Puzzle>, now: SystemTime) -> Self {
        let size = puzzle.size().len();
        Self {
            puzzle,
            grid: PlayerGrid::new(size),
            status: GameStatus::Playing,
            timer_state: TimerState::started_at(now),
            errors: 0,
            hints_used: 0,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            playthrough_id: Uuid::new_v4(),
        }
    }

    pub fn puzzle(&self) -> &Rc<Puzzle> {
        &self.puzzle
    }

    pub fn grid(&self) -> &PlayerGrid {
        &self.grid
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn timer_state(&self) -> &TimerState {
        &self.timer_state
    }

    pub fn start_time(&self) -> SystemTime {
        self.timer_state.started_timestamp
    }

    /// Incorrect fills the player has made, including ones since undone.
    pub fn errors(&self) -> u32 {
        self.errors
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn playthrough_id(&self) -> Uuid {
        self.playthrough_id
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.status.is_completed() && !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.status.is_completed() && !self.redo_stack.is_empty()
    }

    /// Wall-clock time since the session started, paused time included.
    pub fn elapsed(&self) -> Duration {
        self.timer_state.elapsed_at(SystemTime::now())
    }

    /// Time spent actually playing; frozen while paused.
    pub fn active_elapsed(&self) -> Duration {
        self.timer_state.active_elapsed_at(SystemTime::now())
    }

    pub fn elapsed_time_display(&self) -> String {
        format_time(self.active_elapsed())
    }

    pub fn progress_percent(&self) -> u8 {
        progress::progress_percent(&self.grid, self.puzzle.solution())
    }

    /// Cells currently filled where the solution is empty.
    pub fn error_count(&self) -> u32 {
        progress::count_errors(&self.grid, self.puzzle.solution())
    }

    pub fn is_cell_correct(&self, row: usize, col: usize) -> bool {
        progress::is_cell_correct(&self.grid, self.puzzle.solution(), row, col)
    }

    pub fn edit_cell(&mut self, row: usize, col: usize, state: CellState) -> Transition {
        if !self.status.is_playing() || self.grid.get(row, col).is_none() {
            trace!(target: "game_state", "Ignoring edit at ({}, {}); status {:?}", row, col, self.status);
            return Transition::Ignored;
        }

        let wrong_before = self.error_count();
        if !self.push_grid(row, col, state) {
            return Transition::Ignored;
        }
        let wrong_after = self.error_count();
        if wrong_after > wrong_before {
            self.errors += wrong_after - wrong_before;
            debug!(target: "game_state", "Incorrect fill at ({}, {}); errors: {}", row, col, self.errors);
        }

        self.check_completion()
    }

    pub fn undo(&mut self) -> Transition {
        if self.status.is_completed() {
            return Transition::Ignored;
        }
        match self.undo_stack.pop() {
            Some(previous) => {
                let current = std::mem::replace(&mut self.grid, previous);
                self.redo_stack.push(current);
                Transition::Applied
            }
            None => Transition::Ignored,
        }
    }

    pub fn redo(&mut self) -> Transition {
        if self.status.is_completed() {
            return Transition::Ignored;
        }
        match self.redo_stack.pop() {
            Some(next) => {
                let current = std::mem::replace(&mut self.grid, next);
                self.undo_stack.push(current);
                Transition::Applied
            }
            None => Transition::Ignored,
        }
    }

    /// Fills the first cell, in row-major order, that the solution wants
    /// filled and the player has not filled.
    pub fn use_hint(&mut self) -> Transition {
        if !self.status.is_playing() {
            return Transition::Ignored;
        }

        match progress::next_hint_cell(&self.grid, self.puzzle.solution()) {
            Some((row, col)) => {
                if !self.push_grid(row, col, CellState::Filled) {
                    warn!(target: "game_state", "Hint cell ({}, {}) is outside the grid", row, col);
                    return Transition::Ignored;
                }
                self.hints_used += 1;
                debug!(target: "game_state", "Hint revealed ({}, {}); hints used: {}", row, col, self.hints_used);
                self.check_completion()
            }
            None => Transition::Ignored,
        }
    }

    pub fn toggle_pause(&mut self) -> Transition {
        let now = SystemTime::now();
        match self.status {
            GameStatus::Playing => {
                self.status = GameStatus::Paused;
                self.timer_state = self.timer_state.paused(now);
            }
            GameStatus::Paused => {
                self.status = GameStatus::Playing;
                self.timer_state = self.timer_state.resumed(now);
            }
            GameStatus::Completed => return Transition::Ignored,
        }
        Transition::Applied
    }

    /// Applies the edit, snapshotting the previous grid for undo and
    /// dropping the redo branch. Returns false, changing nothing, when the
    /// cell is outside the grid.
    fn push_grid(&mut self, row: usize, col: usize, state: CellState) -> bool {
        let previous = self.grid.clone();
        if !self.grid.set(row, col, state) {
            return false;
        }
        self.undo_stack.push(previous);
        self.redo_stack.clear();
        true
    }

    fn check_completion(&mut self) -> Transition {
        if !progress::is_complete(&self.grid, self.puzzle.solution()) {
            return Transition::Applied;
        }

        let now = SystemTime::now();
        self.status = GameStatus::Completed;
        self.timer_state = self.timer_state.ended(now);
        let stats = PuzzleStats {
            puzzle_id: self.puzzle.id().to_string(),
            completed: true,
            time: self.timer_state.elapsed_at(now),
            errors: self.errors,
            hints_used: self.hints_used,
            size: self.puzzle.size(),
            difficulty: self.puzzle.difficulty(),
            completed_at: Utc::now(),
            playthrough_id: self.playthrough_id,
        };
        debug!(target: "game_state", "Puzzle {} completed: {:?}", self.puzzle.id(), stats);
        Transition::Completed(stats)
    }
}
