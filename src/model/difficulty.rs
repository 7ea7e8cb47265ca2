use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn all() -> Vec<Difficulty> {
        vec![
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Expert,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
            Difficulty::Expert => 3,
        }
    }

    /// Inverse of [`Difficulty::index`]; `None` past `Expert`.
    pub fn from_index(index: usize) -> Option<Difficulty> {
        match index {
            0 => Some(Difficulty::Easy),
            1 => Some(Difficulty::Medium),
            2 => Some(Difficulty::Hard),
            3 => Some(Difficulty::Expert),
            _ => None,
        }
    }

    /// Probability that any single cell of a generated solution is filled
    pub fn fill_rate(&self) -> f64 {
        match self {
            Difficulty::Easy => 0.30,
            Difficulty::Medium => 0.45,
            Difficulty::Hard => 0.60,
            Difficulty::Expert => 0.70,
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        };
        write!(f, "{}", label)
    }
}
