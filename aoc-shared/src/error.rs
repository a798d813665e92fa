//! Error types for grid construction and access

use thiserror::Error;

/// Error type for [`Grid`](crate::Grid) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Grid construction was given zero rows
    #[error("grid must have at least one row")]
    NoRows,
    /// A row's length differs from the first row's
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// Coordinates fall outside the grid
    #[error("invalid coordinates ({x}, {y})")]
    OutOfBounds { x: isize, y: isize },
}
