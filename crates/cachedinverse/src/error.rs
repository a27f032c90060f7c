//! Error types for cachedinverse

use thiserror::Error;

/// Errors raised when a matrix has no well-defined inverse
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InversionError {
    /// Only square matrices have an inverse
    #[error("Cannot invert a non-square ({nrows}, {ncols}) matrix")]
    NotSquare { nrows: usize, ncols: usize },

    /// The 0x0 placeholder matrix
    #[error("Cannot invert an empty matrix")]
    Empty,

    /// No usable pivot was found in a column during elimination
    #[error("Singular matrix: no pivot above tolerance in column {column}")]
    Singular { column: usize },

    /// NaN or infinite entries in the input
    #[error("Non-finite value at ({row}, {col})")]
    NonFinite { row: usize, col: usize },

    /// Invalid pivot tolerance
    #[error("Invalid pivot tolerance: {0}. Tolerance must be finite and non-negative.")]
    InvalidTolerance(f64),
}

/// Result type for inversion operations
pub type Result<T> = std::result::Result<T, InversionError>;
