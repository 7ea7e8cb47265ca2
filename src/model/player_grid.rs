use serde::{Deserialize, Serialize};

use super::CellState;

/// The player's marks for one board, row-major `[row][col]`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerGrid {
    cells: Vec<Vec<CellState>>,
}

impl std::fmt::Debug for PlayerGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut output = String::new();
        output.push('\n');
        for (row_idx, row) in self.cells.iter().enumerate() {
            output.push_str(&format!("{:>2}|", row_idx));
            for cell in row {
                output.push(cell.symbol());
            }
            output.push_str("|\n");
        }
        write!(f, "{}", output)
    }
}

impl PlayerGrid {
    pub fn new(size: usize) -> Self {
        Self {
            cells: vec![vec![CellState::Empty; size]; size],
        }
    }

    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Returns false (and leaves the grid untouched) when out of range.
    pub fn set(&mut self, row: usize, col: usize, state: CellState) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = state;
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> &[Vec<CellState>] {
        &self.cells
    }

    /// True when the grid has exactly `size` rows of `size` cells.
    pub fn is_square_of(&self, size: usize) -> bool {
        self.cells.len() == size && self.cells.iter().all(|row| row.len() == size)
    }

    #[cfg(test)]
    /// Parse a grid from rows of `.`, `#` and `x`
    pub fn parse(rows: &[&str]) -> Self {
        let cells = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|ch| match ch {
                        '#' => CellState::Filled,
                        'x' => CellState::Marked,
                        _ => CellState::Empty,
                    })
                    .collect()
            })
            .collect();
        Self { cells }
    }
}
