//! Engine-layer error types.

use thiserror::Error;

/// Errors raised by simulation configuration and aggregation.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    /// Path count outside the allowed range.
    #[error("path count {0} outside [1, 10000000]")]
    InvalidPathCount(usize),
    /// Step count outside the allowed range.
    #[error("step count {0} outside [1, 10000]")]
    InvalidStepCount(usize),
    /// A numeric parameter is outside its admissible range.
    #[error("invalid parameter {name}: {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// Not enough observations to compute the requested statistic.
    #[error("insufficient data: at least one observation required")]
    InsufficientData,
    /// A position's partial-01 tenor set differs from the simulated tenors.
    #[error("position {position:?} has a partial-01 tenor set inconsistent with the simulated tenors")]
    InconsistentTenors {
        /// Name of the offending position.
        position: String,
    },
}
