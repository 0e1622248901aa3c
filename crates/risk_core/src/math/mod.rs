//! Dense symmetric-matrix numerics and distribution functions.

pub mod correlation;
pub mod distributions;
pub mod eigen;
pub mod factor;
