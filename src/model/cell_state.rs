use serde::{Deserialize, Serialize};

/// What the player has asserted about a single cell.
///
/// `Marked` is a memory aid only; anything that compares a grid against a
/// solution treats it exactly like `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Empty,
    Filled,
    Marked,
}

impl CellState {
    pub fn is_filled(&self) -> bool {
        matches!(self, CellState::Filled)
    }

    /// Tap-to-cycle order: empty, filled, marked, empty
    pub fn next(&self) -> CellState {
        match self {
            CellState::Empty => CellState::Filled,
            CellState::Filled => CellState::Marked,
            CellState::Marked => CellState::Empty,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Filled => '#',
            CellState::Marked => 'x',
        }
    }
}

/// Input tool selected by the player. Tools are resolved to a target
/// `CellState` by the caller before anything reaches the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Fill,
    Mark,
    Erase,
}

impl Tool {
    pub fn apply(&self, current: CellState) -> CellState {
        match (self, current) {
            (Tool::Fill, CellState::Filled) => CellState::Empty,
            (Tool::Fill, _) => CellState::Filled,
            (Tool::Mark, CellState::Marked) => CellState::Empty,
            (Tool::Mark, _) => CellState::Marked,
            (Tool::Erase, _) => CellState::Empty,
        }
    }
}
