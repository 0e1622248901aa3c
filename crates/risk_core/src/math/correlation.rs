//! Correlation matrices with positive-semi-definite repair.
//!
//! Historical or hand-assembled correlation estimates are frequently
//! indefinite. [`CorrelationMatrix::repair`] clips negative eigenvalues up
//! to a small floor, reconstructs the matrix, and renormalises the
//! diagonal back to one, so that downstream factorisation always succeeds.

use thiserror::Error;

use super::eigen::symmetric_eigen;

/// Eigenvalue floor applied during repair when the caller does not supply one.
pub const DEFAULT_EIGENVALUE_FLOOR: f64 = 1e-8;

/// Absolute tolerance used when checking symmetry of input matrices.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// Errors raised when validating correlation matrix input.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MatrixError {
    /// Data length is incompatible with a square matrix of the stated dimension.
    #[error("matrix data has {got} elements, expected {expected} for a {dim}x{dim} matrix")]
    NotSquare {
        /// Stated dimension.
        dim: usize,
        /// Expected element count (`dim * dim`).
        expected: usize,
        /// Actual element count.
        got: usize,
    },
    /// Matrix is not symmetric within [`SYMMETRY_TOLERANCE`].
    #[error("matrix is not symmetric at ({i}, {j}): {upper} vs {lower}")]
    NotSymmetric {
        /// Row index of the offending pair.
        i: usize,
        /// Column index of the offending pair.
        j: usize,
        /// Upper-triangle value.
        upper: f64,
        /// Lower-triangle value.
        lower: f64,
    },
    /// Diagonal element differs from 1.
    #[error("diagonal element {index} is {value}, expected 1.0")]
    InvalidDiagonal {
        /// Diagonal index.
        index: usize,
        /// Offending value.
        value: f64,
    },
    /// Off-diagonal correlation outside [-1, 1].
    #[error("correlation at ({i}, {j}) is {value}, must be in [-1, 1]")]
    OutOfRange {
        /// Row index.
        i: usize,
        /// Column index.
        j: usize,
        /// Offending value.
        value: f64,
    },
    /// Matrix dimension is zero.
    #[error("correlation matrix must have at least one factor")]
    Empty,
}

/// Square, symmetric, unit-diagonal correlation matrix in row-major storage.
///
/// Constructed either by strict validation ([`CorrelationMatrix::new`]) or
/// by repair of an approximate input ([`CorrelationMatrix::repair`]). After
/// repair, every eigenvalue is at or above the requested floor.
///
/// # Examples
///
/// ```
/// use risk_core::CorrelationMatrix;
///
/// let corr = CorrelationMatrix::new(&[1.0, 0.5, 0.5, 1.0], 2).unwrap();
/// assert_eq!(corr.get(0, 1), 0.5);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CorrelationMatrix {
    /// Matrix elements in row-major order.
    data: Vec<f64>,
    /// Matrix dimension.
    dim: usize,
}

impl CorrelationMatrix {
    /// Validate a user-supplied correlation matrix without repairing it.
    ///
    /// Requires a square, symmetric matrix with unit diagonal and all
    /// off-diagonal entries in [-1, 1]. Positive semi-definiteness is not
    /// checked here; use [`CorrelationMatrix::repair`] for inputs that may
    /// be indefinite.
    pub fn new(data: &[f64], dim: usize) -> Result<Self, MatrixError> {
        check_shape(data, dim)?;

        for i in 0..dim {
            let diag = data[i * dim + i];
            if (diag - 1.0).abs() > SYMMETRY_TOLERANCE {
                return Err(MatrixError::InvalidDiagonal {
                    index: i,
                    value: diag,
                });
            }
        }
        for i in 0..dim {
            for j in (i + 1)..dim {
                let upper = data[i * dim + j];
                let lower = data[j * dim + i];
                if (upper - lower).abs() > SYMMETRY_TOLERANCE {
                    return Err(MatrixError::NotSymmetric { i, j, upper, lower });
                }
                if !(-1.0..=1.0).contains(&upper) {
                    return Err(MatrixError::OutOfRange {
                        i,
                        j,
                        value: upper,
                    });
                }
            }
        }

        Ok(Self {
            data: data.to_vec(),
            dim,
        })
    }

    /// Identity correlation matrix (independent factors).
    pub fn identity(dim: usize) -> Self {
        let mut data = vec![0.0; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = 1.0;
        }
        Self { data, dim }
    }

    /// Repair an approximate correlation matrix into a valid one.
    ///
    /// If every eigenvalue of the (symmetric) input is strictly positive
    /// the input is returned unchanged. Otherwise eigenvalues below
    /// `floor` are clipped up to `floor`, the matrix is reconstructed as
    /// `V diag(lambda') V^T`, and the result is rescaled so the diagonal
    /// is exactly one.
    ///
    /// # Errors
    ///
    /// Fails if the input is not square or not symmetric within
    /// [`SYMMETRY_TOLERANCE`].
    ///
    /// # Examples
    ///
    /// ```
    /// use risk_core::CorrelationMatrix;
    /// use risk_core::math::correlation::DEFAULT_EIGENVALUE_FLOOR;
    ///
    /// // Perfectly collinear factors: singular, needs repair.
    /// let corr =
    ///     CorrelationMatrix::repair(&[1.0, 1.0, 1.0, 1.0], 2, DEFAULT_EIGENVALUE_FLOOR).unwrap();
    /// assert_eq!(corr.get(0, 0), 1.0);
    /// assert!(corr.min_eigenvalue() >= 0.0);
    /// ```
    pub fn repair(data: &[f64], dim: usize, floor: f64) -> Result<Self, MatrixError> {
        check_shape(data, dim)?;
        for i in 0..dim {
            for j in (i + 1)..dim {
                let upper = data[i * dim + j];
                let lower = data[j * dim + i];
                if (upper - lower).abs() > SYMMETRY_TOLERANCE {
                    return Err(MatrixError::NotSymmetric { i, j, upper, lower });
                }
            }
        }

        let eigen = symmetric_eigen(data, dim);
        if eigen.min_value() > 0.0 {
            return Ok(Self {
                data: data.to_vec(),
                dim,
            });
        }

        let clipped: Vec<f64> = eigen.values.iter().map(|&l| l.max(floor)).collect();

        // Reconstruct V diag(lambda') V^T.
        let mut rebuilt = vec![0.0; dim * dim];
        for i in 0..dim {
            for j in 0..dim {
                let mut sum = 0.0;
                for k in 0..dim {
                    sum += eigen.vector(i, k) * clipped[k] * eigen.vector(j, k);
                }
                rebuilt[i * dim + j] = sum;
            }
        }

        // Rescale so the diagonal is exactly one, then force symmetry and
        // clamp any rounding spill outside [-1, 1].
        let scale: Vec<f64> = (0..dim).map(|i| rebuilt[i * dim + i].sqrt()).collect();
        let mut data = vec![0.0; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = 1.0;
            for j in (i + 1)..dim {
                let value = (rebuilt[i * dim + j] / (scale[i] * scale[j])).clamp(-1.0, 1.0);
                data[i * dim + j] = value;
                data[j * dim + i] = value;
            }
        }

        Ok(Self { data, dim })
    }

    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at (i, j).
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.dim + j]
    }

    /// Row-major view of the matrix elements.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Smallest eigenvalue of the matrix.
    pub fn min_eigenvalue(&self) -> f64 {
        symmetric_eigen(&self.data, self.dim).min_value()
    }
}

fn check_shape(data: &[f64], dim: usize) -> Result<(), MatrixError> {
    if dim == 0 {
        return Err(MatrixError::Empty);
    }
    let expected = dim * dim;
    if data.len() != expected {
        return Err(MatrixError::NotSquare {
            dim,
            expected,
            got: data.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn new_accepts_valid_matrix() {
        let corr = CorrelationMatrix::new(&[1.0, 0.5, 0.5, 1.0], 2).unwrap();
        assert_eq!(corr.dim(), 2);
        assert_eq!(corr.get(1, 0), 0.5);
    }

    #[test]
    fn new_rejects_bad_shape() {
        let result = CorrelationMatrix::new(&[1.0, 0.5, 0.5], 2);
        assert!(matches!(result, Err(MatrixError::NotSquare { .. })));
    }

    #[test]
    fn new_rejects_bad_diagonal() {
        let result = CorrelationMatrix::new(&[0.9, 0.5, 0.5, 1.0], 2);
        assert!(matches!(result, Err(MatrixError::InvalidDiagonal { .. })));
    }

    #[test]
    fn new_rejects_asymmetry() {
        let result = CorrelationMatrix::new(&[1.0, 0.5, 0.3, 1.0], 2);
        assert!(matches!(result, Err(MatrixError::NotSymmetric { .. })));
    }

    #[test]
    fn new_rejects_out_of_range() {
        let result = CorrelationMatrix::new(&[1.0, 1.5, 1.5, 1.0], 2);
        assert!(matches!(result, Err(MatrixError::OutOfRange { .. })));
    }

    #[test]
    fn repair_is_identity_on_psd_input() {
        #[rustfmt::skip]
        let data = [
            1.0, 0.3, 0.2,
            0.3, 1.0, 0.4,
            0.2, 0.4, 1.0,
        ];
        let corr = CorrelationMatrix::repair(&data, 3, DEFAULT_EIGENVALUE_FLOOR).unwrap();
        for (got, want) in corr.as_slice().iter().zip(data.iter()) {
            assert_relative_eq!(got, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn repair_fixes_indefinite_matrix() {
        // Pairwise -0.6 across three factors has a negative eigenvalue.
        #[rustfmt::skip]
        let data = [
            1.0, -0.6, -0.6,
            -0.6, 1.0, -0.6,
            -0.6, -0.6, 1.0,
        ];
        let corr = CorrelationMatrix::repair(&data, 3, DEFAULT_EIGENVALUE_FLOOR).unwrap();

        for i in 0..3 {
            assert_eq!(corr.get(i, i), 1.0);
        }
        // Allow for rounding introduced by the diagonal rescale.
        assert!(corr.min_eigenvalue() >= -1e-10);
    }

    #[test]
    fn repair_handles_singular_matrix() {
        let corr =
            CorrelationMatrix::repair(&[1.0, 1.0, 1.0, 1.0], 2, DEFAULT_EIGENVALUE_FLOOR).unwrap();
        assert_eq!(corr.get(0, 0), 1.0);
        assert!(corr.get(0, 1) <= 1.0);
        assert!(corr.min_eigenvalue() >= -1e-10);
    }

    #[test]
    fn repair_rejects_asymmetric_input() {
        let result =
            CorrelationMatrix::repair(&[1.0, 0.5, 0.2, 1.0], 2, DEFAULT_EIGENVALUE_FLOOR);
        assert!(matches!(result, Err(MatrixError::NotSymmetric { .. })));
    }

    #[test]
    fn identity_is_trivially_valid() {
        let corr = CorrelationMatrix::identity(4);
        assert_eq!(corr.dim(), 4);
        assert_eq!(corr.get(2, 2), 1.0);
        assert_eq!(corr.get(0, 3), 0.0);
        assert_relative_eq!(corr.min_eigenvalue(), 1.0, epsilon = 1e-10);
    }

    proptest! {
        #[test]
        fn repaired_matrices_are_unit_diagonal_and_near_psd(
            a in -0.99f64..0.99,
            b in -0.99f64..0.99,
            c in -0.99f64..0.99,
        ) {
            #[rustfmt::skip]
            let data = [
                1.0, a, b,
                a, 1.0, c,
                b, c, 1.0,
            ];
            let corr = CorrelationMatrix::repair(&data, 3, DEFAULT_EIGENVALUE_FLOOR).unwrap();
            for i in 0..3 {
                prop_assert_eq!(corr.get(i, i), 1.0);
            }
            prop_assert!(corr.min_eigenvalue() >= -1e-9);
        }
    }
}
