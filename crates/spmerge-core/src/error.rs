//! Error types for spmerge

use thiserror::Error;

/// Result type alias using spmerge's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing or combining sparse matrices.
///
/// The merge kernels themselves never fail; everything here is detected at the
/// matrix boundary before a kernel runs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Row pointer array is malformed
    #[error("invalid indptr: {reason}")]
    InvalidIndptr {
        /// What was wrong with it
        reason: &'static str,
    },

    /// Two parallel arrays disagree in length
    #[error("{what} length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        /// Which arrays
        what: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// A column index is negative or not below `ncols`
    #[error("column index {col} out of bounds in row {row} (ncols = {ncols})")]
    ColumnOutOfBounds {
        /// Row containing the entry
        row: usize,
        /// Offending column index
        col: i64,
        /// Column count of the matrix
        ncols: usize,
    },

    /// Columns within a row are not strictly increasing
    #[error("column indices must be strictly increasing within each row (row {row})")]
    UnsortedColumns {
        /// Offending row
        row: usize,
    },

    /// Operand shapes are incompatible for the product
    #[error("shape mismatch: cannot multiply {lhs:?} by {rhs:?}")]
    ShapeMismatch {
        /// Left-hand side shape
        lhs: (usize, usize),
        /// Right-hand side shape
        rhs: (usize, usize),
    },

    /// A count does not fit the index type
    #[error("index overflow: {value} does not fit in i64")]
    IndexOverflow {
        /// Offending count
        value: usize,
    },
}
