use serde::{Deserialize, Serialize};

use super::Puzzle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzlePack {
    pub id: String,
    pub name: String,
    pub description: String,
    pub puzzles: Vec<Puzzle>,
}

impl PuzzlePack {
    pub fn get_puzzle(&self, puzzle_id: &str) -> Option<&Puzzle> {
        self.puzzles.iter().find(|p| p.id() == puzzle_id)
    }
}
