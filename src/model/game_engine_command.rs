use super::{CellState, Difficulty, GridSize, Puzzle, Tool};

#[derive(Debug, Clone)]
pub enum GameEngineCommand {
    StartPuzzle(Puzzle),
    StartGenerated(GridSize, Difficulty, Option<u64>), // seed when Some
    StartCatalogPuzzle(String),                        // puzzle id
    EditCell(usize, usize, CellState),                 // row, col, target state
    ApplyTool(usize, usize, Tool),
    Undo,
    Redo,
    UseHint,
    TogglePause,
    LoadProgress,
    Reset,
}
