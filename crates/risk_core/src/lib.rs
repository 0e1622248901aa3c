//! # Risk Core (L1: Numerical Foundation)
//!
//! Shared numerics for the Monte Carlo risk analytics workspace.
//!
//! This crate provides:
//! - Correlation matrices with positive-semi-definite repair
//! - Symmetric eigendecomposition (cyclic Jacobi)
//! - Cholesky factorisation with an eigen-based fallback
//! - Standard normal and chi-squared distribution functions
//! - A seeded, stream-splittable random number generator
//!
//! ## Design Principles
//!
//! - **Flat row-major storage** for dense matrices (no linear-algebra crate)
//! - **Explicit seeding** everywhere; no process-global RNG state
//! - **Repair before factorise**: `FactorMatrix` never fails on a repaired
//!   correlation matrix

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod math;
pub mod rng;

pub use math::correlation::{CorrelationMatrix, MatrixError};
pub use math::factor::FactorMatrix;
pub use rng::SimRng;
