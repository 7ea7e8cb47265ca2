use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::{Difficulty, GridSize, ModelError};
use crate::game::clue_deriver::{column_clues, row_clues};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "lowercase")]
pub enum PuzzleOrigin {
    Generated,
    Pack {
        pack_id: String,
        pack_name: String,
        name: String,
    },
}

/// A puzzle: the hidden solution plus the clues derived from it.
///
/// Fields are private so clues can never drift from the solution once the
/// puzzle exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PuzzleRecord")]
pub struct Puzzle {
    id: String,
    size: GridSize,
    difficulty: Difficulty,
    solution: Vec<Vec<bool>>,
    row_clues: Vec<Vec<usize>>,
    column_clues: Vec<Vec<usize>>,
    #[serde(flatten)]
    origin: PuzzleOrigin,
}

/// Wire shape of a [`Puzzle`]; only becomes one after the solution and
/// stored clues check out.
#[derive(Deserialize)]
struct PuzzleRecord {
    id: String,
    size: GridSize,
    difficulty: Difficulty,
    solution: Vec<Vec<bool>>,
    row_clues: Vec<Vec<usize>>,
    column_clues: Vec<Vec<usize>>,
    #[serde(flatten)]
    origin: PuzzleOrigin,
}

impl TryFrom<PuzzleRecord> for Puzzle {
    type Error = ModelError;

    fn try_from(record: PuzzleRecord) -> Result<Self, Self::Error> {
        let puzzle =
            Puzzle::from_solution(record.id, record.difficulty, record.solution, record.origin)?;
        if puzzle.size != record.size {
            return Err(ModelError::SizeMismatch {
                declared: record.size.len(),
                actual: puzzle.size.len(),
            });
        }
        if puzzle.row_clues != record.row_clues || puzzle.column_clues != record.column_clues {
            return Err(ModelError::ClueMismatch);
        }
        Ok(puzzle)
    }
}

impl Puzzle {
    /// Builds a puzzle from a square solution, deriving every clue.
    pub fn from_solution(
        id: impl Into<String>,
        difficulty: Difficulty,
        solution: Vec<Vec<bool>>,
        origin: PuzzleOrigin,
    ) -> Result<Self, ModelError> {
        let size = GridSize::try_from(solution.len())?;
        for (row, cells) in solution.iter().enumerate() {
            if cells.len() != size.len() {
                return Err(ModelError::RaggedRow {
                    row,
                    len: cells.len(),
                    expected: size.len(),
                });
            }
        }

        Ok(Self::from_sized_solution(
            id, size, difficulty, solution, origin,
        ))
    }

    /// Caller guarantees `solution` is `size` x `size`.
    pub(crate) fn from_sized_solution(
        id: impl Into<String>,
        size: GridSize,
        difficulty: Difficulty,
        solution: Vec<Vec<bool>>,
        origin: PuzzleOrigin,
    ) -> Self {
        debug_assert_eq!(solution.len(), size.len());
        Self {
            id: id.into(),
            size,
            difficulty,
            row_clues: row_clues(&solution),
            column_clues: column_clues(&solution),
            solution,
            origin,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn solution(&self) -> &[Vec<bool>] {
        &self.solution
    }

    pub fn row_clues(&self) -> &[Vec<usize>] {
        &self.row_clues
    }

    pub fn column_clues(&self) -> &[Vec<usize>] {
        &self.column_clues
    }

    pub fn origin(&self) -> &PuzzleOrigin {
        &self.origin
    }

    /// Display name for catalog puzzles
    pub fn name(&self) -> Option<&str> {
        match &self.origin {
            PuzzleOrigin::Pack { name, .. } => Some(name),
            PuzzleOrigin::Generated => None,
        }
    }
}

/// Parses rows of `0`/`1` characters into a solution grid.
pub fn parse_pattern(rows: &[&str]) -> Result<Vec<Vec<bool>>, ModelError> {
    rows.iter()
        .enumerate()
        .map(|(row, line)| {
            line.chars()
                .map(|ch| match ch {
                    '1' => Ok(true),
                    '0' => Ok(false),
                    _ => Err(ModelError::InvalidPatternChar { row, ch }),
                })
                .collect::<Result<Vec<bool>, ModelError>>()
        })
        .collect()
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} ({}, {})", self.id, self.size, self.difficulty)?;
        writeln!(
            f,
            "cols: {}",
            self.column_clues
                .iter()
                .map(|clue| clue.iter().join("."))
                .join(" ")
        )?;
        for (row, clue) in self.solution.iter().zip(&self.row_clues) {
            let cells: String = row.iter().map(|&c| if c { '#' } else { '.' }).collect();
            writeln!(f, "{} | {}", cells, clue.iter().join(" "))?;
        }
        Ok(())
    }
}
