//! Model-layer error types.

use risk_core::MatrixError;
use thiserror::Error;

/// Errors raised when constructing model parameters.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ModelError {
    /// A numeric parameter is outside its admissible range.
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A tenor string could not be parsed.
    #[error("invalid tenor: {0:?}")]
    InvalidTenor(String),
    /// Two parallel inputs disagree in length.
    #[error("dimension mismatch for {name}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Input name.
        name: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// Correlation matrix input was rejected.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}
