//! Factor decomposition of correlation matrices.
//!
//! A [`FactorMatrix`] is a square matrix `L` with `L L^T` equal to (or a
//! close PSD approximation of) the source correlation matrix. Multiplying
//! `L` into a vector of independent standard normals yields correlated
//! shocks with the desired structure.

use super::correlation::CorrelationMatrix;
use super::eigen::symmetric_eigen;

/// How the factor matrix was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FactorKind {
    /// Plain Cholesky factorisation succeeded.
    Cholesky,
    /// Cholesky failed; fell back to `V diag(sqrt(max(lambda, floor))) `.
    EigenFallback,
}

/// Lower-triangular (or eigen-derived) factor of a correlation matrix.
///
/// # Examples
///
/// ```
/// use risk_core::{CorrelationMatrix, FactorMatrix};
///
/// let corr = CorrelationMatrix::new(&[1.0, 0.8, 0.8, 1.0], 2).unwrap();
/// let factor = FactorMatrix::from_correlation(&corr);
/// let shocks = factor.transform(&[1.0, 0.0]);
/// assert!((shocks[1] - 0.8).abs() < 1e-12);
/// ```
#[derive(Clone, Debug)]
pub struct FactorMatrix {
    /// Factor elements in row-major order.
    data: Vec<f64>,
    /// Matrix dimension.
    dim: usize,
    /// Decomposition route taken.
    kind: FactorKind,
}

/// Eigenvalue floor used by the fallback decomposition.
const FALLBACK_EIGENVALUE_FLOOR: f64 = 1e-8;

impl FactorMatrix {
    /// Factorise a correlation matrix.
    ///
    /// Attempts a Cholesky decomposition first. If the matrix is not
    /// numerically positive definite (possible for repaired matrices whose
    /// smallest eigenvalue sits at the clip floor), falls back to the
    /// eigendecomposition route `L = V diag(sqrt(max(lambda, floor)))`,
    /// which always succeeds for symmetric input.
    pub fn from_correlation(corr: &CorrelationMatrix) -> Self {
        let dim = corr.dim();
        if let Some(data) = cholesky(corr.as_slice(), dim) {
            return Self {
                data,
                dim,
                kind: FactorKind::Cholesky,
            };
        }

        let eigen = symmetric_eigen(corr.as_slice(), dim);
        let mut data = vec![0.0; dim * dim];
        for i in 0..dim {
            for j in 0..dim {
                let lambda = eigen.values[j].max(FALLBACK_EIGENVALUE_FLOOR);
                data[i * dim + j] = eigen.vector(i, j) * lambda.sqrt();
            }
        }
        Self {
            data,
            dim,
            kind: FactorKind::EigenFallback,
        }
    }

    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Which decomposition produced this factor.
    #[inline]
    pub fn kind(&self) -> FactorKind {
        self.kind
    }

    /// Correlate a vector of independent shocks: returns `L z`.
    ///
    /// # Panics
    ///
    /// Panics if `independent.len() != self.dim()`.
    pub fn transform(&self, independent: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; self.dim];
        self.transform_into(independent, &mut out);
        out
    }

    /// As [`FactorMatrix::transform`], writing into a caller-provided buffer.
    ///
    /// The full row product is taken rather than the triangular prefix so
    /// the same loop serves both decomposition routes.
    ///
    /// # Panics
    ///
    /// Panics if either slice length differs from `self.dim()`.
    pub fn transform_into(&self, independent: &[f64], out: &mut [f64]) {
        assert_eq!(independent.len(), self.dim, "shock vector length mismatch");
        assert_eq!(out.len(), self.dim, "output vector length mismatch");
        for i in 0..self.dim {
            let row = &self.data[i * self.dim..(i + 1) * self.dim];
            let mut sum = 0.0;
            for (l, z) in row.iter().zip(independent.iter()) {
                sum += l * z;
            }
            out[i] = sum;
        }
    }

    /// Row-major view of the factor elements.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Lower-triangular Cholesky of a symmetric matrix, or `None` if a
/// non-positive pivot is encountered.
fn cholesky(data: &[f64], dim: usize) -> Option<Vec<f64>> {
    let mut l = vec![0.0; dim * dim];
    for i in 0..dim {
        for j in 0..=i {
            let mut sum = data[i * dim + j];
            for k in 0..j {
                sum -= l[i * dim + k] * l[j * dim + k];
            }
            if i == j {
                if sum <= 0.0 {
                    return None;
                }
                l[i * dim + i] = sum.sqrt();
            } else {
                l[i * dim + j] = sum / l[j * dim + j];
            }
        }
    }
    Some(l)
}
