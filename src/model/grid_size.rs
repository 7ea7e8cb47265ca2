use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::ModelError;

/// Supported board dimensions. Boards are always square.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
#[serde(try_from = "usize", into = "usize")]
pub enum GridSize {
    #[default]
    Five,
    Ten,
    Fifteen,
    Twenty,
}

impl GridSize {
    pub fn all() -> Vec<GridSize> {
        vec![
            GridSize::Five,
            GridSize::Ten,
            GridSize::Fifteen,
            GridSize::Twenty,
        ]
    }

    pub fn len(&self) -> usize {
        match self {
            GridSize::Five => 5,
            GridSize::Ten => 10,
            GridSize::Fifteen => 15,
            GridSize::Twenty => 20,
        }
    }

    pub fn cells(&self) -> usize {
        self.len() * self.len()
    }
}

impl TryFrom<usize> for GridSize {
    type Error = ModelError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(GridSize::Five),
            10 => Ok(GridSize::Ten),
            15 => Ok(GridSize::Fifteen),
            20 => Ok(GridSize::Twenty),
            _ => Err(ModelError::UnsupportedGridSize(value)),
        }
    }
}

impl From<GridSize> for usize {
    fn from(size: GridSize) -> Self {
        size.len()
    }
}

impl Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.len(), self.len())
    }
}
