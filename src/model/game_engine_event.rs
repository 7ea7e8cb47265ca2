use super::{GameStatus, PlayerGrid, Puzzle, PuzzleStats, TimerState};
use std::rc::Rc;

#[derive(Debug, Clone)]
pub enum GameEngineEvent {
    SessionStarted(Rc<Puzzle>),
    SessionCleared,
    GridUpdated(PlayerGrid),
    HistoryChanged { undo_depth: usize, redo_depth: usize },
    HintUsageChanged(u32),
    ErrorCountChanged(u32),
    StatusChanged(GameStatus),
    TimerStateChanged(TimerState),
    PuzzleCompleted(PuzzleStats),
}
