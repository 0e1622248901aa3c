//! Symmetric eigendecomposition via cyclic Jacobi rotations.
//!
//! This solver targets the small dense correlation matrices used in
//! multi-factor simulations (a handful of tenors), where Jacobi's
//! unconditional stability matters more than asymptotic speed.

/// Result of a symmetric eigendecomposition.
///
/// Eigenvalues are sorted ascending; column `j` of `vectors` (row-major,
/// `dim x dim`) is the unit eigenvector for `values[j]`, so that
/// `A = V diag(values) V^T`.
#[derive(Clone, Debug)]
pub struct SymmetricEigen {
    /// Eigenvalues in ascending order.
    pub values: Vec<f64>,
    /// Orthonormal eigenvectors, stored row-major with one column per eigenvalue.
    pub vectors: Vec<f64>,
    /// Matrix dimension.
    pub dim: usize,
}

impl SymmetricEigen {
    /// Smallest eigenvalue.
    #[inline]
    pub fn min_value(&self) -> f64 {
        self.values.first().copied().unwrap_or(0.0)
    }

    /// Eigenvector matrix element at (row, col).
    #[inline]
    pub fn vector(&self, row: usize, col: usize) -> f64 {
        self.vectors[row * self.dim + col]
    }
}

/// Maximum number of full Jacobi sweeps before giving up on further
/// refinement. Correlation-sized matrices converge in well under ten.
const MAX_SWEEPS: usize = 64;

/// Convergence threshold on the off-diagonal Frobenius norm.
const OFF_DIAGONAL_TOLERANCE: f64 = 1e-12;

/// Eigendecomposition of a symmetric matrix in flat row-major storage.
///
/// The input is read as symmetric; only values consistent between the
/// upper and lower triangles produce meaningful results. Callers validate
/// symmetry before decomposing (see [`crate::CorrelationMatrix::repair`]).
///
/// # Panics
///
/// Panics if `data.len() != dim * dim`.
pub fn symmetric_eigen(data: &[f64], dim: usize) -> SymmetricEigen {
    assert_eq!(data.len(), dim * dim, "matrix data must be dim*dim");

    let n = dim;
    let mut a = data.to_vec();
    // Eigenvector accumulator, starts as identity.
    let mut v = vec![0.0; n * n];
    for i in 0..n {
        v[i * n + i] = 1.0;
    }

    for _ in 0..MAX_SWEEPS {
        let mut off = 0.0;
        for p in 0..n {
            for q in (p + 1)..n {
                off += a[p * n + q] * a[p * n + q];
            }
        }
        if off < OFF_DIAGONAL_TOLERANCE {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[p * n + q];
                if apq.abs() < f64::EPSILON {
                    continue;
                }

                let app = a[p * n + p];
                let aqq = a[q * n + q];
                let theta = (aqq - app) / (2.0 * apq);
                // Smaller-magnitude root of t^2 + 2*theta*t - 1 = 0 keeps
                // the rotation angle below pi/4 for stability.
                let t = if theta >= 0.0 {
                    1.0 / (theta + (theta * theta + 1.0).sqrt())
                } else {
                    1.0 / (theta - (theta * theta + 1.0).sqrt())
                };
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;
                let tau = s / (1.0 + c);

                a[p * n + p] = app - t * apq;
                a[q * n + q] = aqq + t * apq;
                a[p * n + q] = 0.0;
                a[q * n + p] = 0.0;

                for k in 0..n {
                    if k != p && k != q {
                        let akp = a[k * n + p];
                        let akq = a[k * n + q];
                        let new_kp = akp - s * (akq + tau * akp);
                        let new_kq = akq + s * (akp - tau * akq);
                        a[k * n + p] = new_kp;
                        a[p * n + k] = new_kp;
                        a[k * n + q] = new_kq;
                        a[q * n + k] = new_kq;
                    }
                }

                for k in 0..n {
                    let vkp = v[k * n + p];
                    let vkq = v[k * n + q];
                    v[k * n + p] = vkp - s * (vkq + tau * vkp);
                    v[k * n + q] = vkq + s * (vkp - tau * vkq);
                }
            }
        }
    }

    // Extract and sort ascending, permuting eigenvector columns alongside.
    let mut order: Vec<usize> = (0..n).collect();
    let diag: Vec<f64> = (0..n).map(|i| a[i * n + i]).collect();
    order.sort_by(|&i, &j| diag[i].total_cmp(&diag[j]));

    let values: Vec<f64> = order.iter().map(|&i| diag[i]).collect();
    let mut vectors = vec![0.0; n * n];
    for (new_col, &old_col) in order.iter().enumerate() {
        for row in 0..n {
            vectors[row * n + new_col] = v[row * n + old_col];
        }
    }

    SymmetricEigen {
        values,
        vectors,
        dim: n,
    }
}
