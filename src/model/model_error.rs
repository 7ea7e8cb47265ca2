/// Errors raised while building puzzle data from raw input.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ModelError {
    #[display("unsupported grid size: {_0}")]
    UnsupportedGridSize(#[error(not(source))] usize),
    #[display("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[display("invalid pattern character {ch:?} in row {row}")]
    InvalidPatternChar { row: usize, ch: char },
    #[display("declared size {declared} does not match {actual}x{actual} solution")]
    SizeMismatch { declared: usize, actual: usize },
    #[display("stored clues do not match the solution")]
    ClueMismatch,
    #[display("grid is not {expected}x{expected}")]
    GridSizeMismatch { expected: usize },
}
