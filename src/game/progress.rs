//! Scoring a player grid against a puzzle solution.
//!
//! Only the filled / not-filled distinction is ever compared here, so a
//! `Marked` cell always behaves like an `Empty` one.

use crate::model::PlayerGrid;

fn cell_pairs<'a>(
    grid: &'a PlayerGrid,
    solution: &'a [Vec<bool>],
) -> impl Iterator<Item = (bool, bool)> + 'a {
    grid.rows()
        .iter()
        .zip(solution)
        .flat_map(|(row, expected)| row.iter().map(|c| c.is_filled()).zip(expected.iter().copied()))
}

/// True iff every cell is filled exactly where the solution is.
pub fn is_complete(grid: &PlayerGrid, solution: &[Vec<bool>]) -> bool {
    grid.size() == solution.len() && cell_pairs(grid, solution).all(|(filled, want)| filled == want)
}

/// Counts cells filled where the solution is empty. Leaving a solution cell
/// unfilled is never an error.
pub fn count_errors(grid: &PlayerGrid, solution: &[Vec<bool>]) -> u32 {
    cell_pairs(grid, solution)
        .filter(|&(filled, want)| filled && !want)
        .count() as u32
}

pub fn is_cell_correct(grid: &PlayerGrid, solution: &[Vec<bool>], row: usize, col: usize) -> bool {
    match (grid.get(row, col), solution.get(row).and_then(|r| r.get(col))) {
        (Some(state), Some(&want)) => state.is_filled() == want,
        _ => false,
    }
}

/// Percentage of cells whose filled-ness agrees with the solution, rounded.
///
/// Agreement includes cells that are empty on both sides, so a blank grid
/// already scores the solution's share of empty cells.
pub fn progress_percent(grid: &PlayerGrid, solution: &[Vec<bool>]) -> u8 {
    let total: usize = solution.iter().map(Vec::len).sum();
    if total == 0 {
        return 0;
    }
    let correct = cell_pairs(grid, solution)
        .filter(|&(filled, want)| filled == want)
        .count();
    (correct as f64 / total as f64 * 100.0).round() as u8
}

/// First cell in row-major order that should be filled but is not.
pub fn next_hint_cell(grid: &PlayerGrid, solution: &[Vec<bool>]) -> Option<(usize, usize)> {
    solution.iter().enumerate().find_map(|(row, expected)| {
        expected.iter().enumerate().find_map(|(col, &want)| {
            let filled = grid.get(row, col).is_some_and(|c| c.is_filled());
            (want && !filled).then_some((row, col))
        })
    })
}
