//! Standard normal and chi-squared distribution functions.
//!
//! Closed-form approximations only; accuracy is documented per function.
//! These back both the simulation layer (inverse CDF for default
//! thresholds) and the backtesting layer (chi-squared p-values).

use num_traits::Float;

/// Standard normal probability density function.
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let two_pi = T::from(2.0 * std::f64::consts::PI).unwrap();
    (-x * x / T::from(2.0).unwrap()).exp() / two_pi.sqrt()
}

/// Standard normal cumulative distribution function.
///
/// Uses the Abramowitz-Stegun rational approximation to the complementary
/// error function (formula 7.1.26), with maximum absolute error 1.5e-7.
///
/// # Examples
///
/// ```
/// use risk_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!((norm_cdf(1.96_f64) - 0.975).abs() < 1e-4);
/// ```
pub fn norm_cdf<T: Float>(x: T) -> T {
    let half = T::from(0.5).unwrap();
    let sqrt2 = T::from(std::f64::consts::SQRT_2).unwrap();
    half * erfc(-x / sqrt2)
}

/// Complementary error function, Abramowitz-Stegun 7.1.26.
fn erfc<T: Float>(x: T) -> T {
    let z = x.abs();
    let t = T::one() / (T::one() + T::from(0.5).unwrap() * z);

    let poly = T::from(-1.26551223).unwrap()
        + t * (T::from(1.00002368).unwrap()
            + t * (T::from(0.37409196).unwrap()
                + t * (T::from(0.09678418).unwrap()
                    + t * (T::from(-0.18628806).unwrap()
                        + t * (T::from(0.27886807).unwrap()
                            + t * (T::from(-1.13520398).unwrap()
                                + t * (T::from(1.48851587).unwrap()
                                    + t * (T::from(-0.82215223).unwrap()
                                        + t * T::from(0.17087277).unwrap()))))))));

    let ans = t * (-z * z + poly).exp();
    if x >= T::zero() {
        ans
    } else {
        T::from(2.0).unwrap() - ans
    }
}

/// Inverse of the standard normal CDF.
///
/// Acklam's rational approximation with relative error below 1.15e-9
/// across the open interval (0, 1).
///
/// # Panics
///
/// Panics if `p` is outside the open interval (0, 1).
pub fn norm_inv_cdf(p: f64) -> f64 {
    assert!(p > 0.0 && p < 1.0, "probability must be in (0, 1), got {p}");

    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];

    const P_LOW: f64 = 0.02425;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

/// CDF of the chi-squared distribution with one degree of freedom.
///
/// For `X = Z^2` with `Z` standard normal, `P(X <= x) = 2 Phi(sqrt(x)) - 1`,
/// so no incomplete-gamma machinery is needed for the likelihood-ratio
/// tests, which all have one degree of freedom.
#[inline]
pub fn chi_squared_cdf_1(x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    2.0 * norm_cdf(x.sqrt()) - 1.0
}
