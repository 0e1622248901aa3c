//! # Risk Backtest (L4: Model Validation)
//!
//! Date-aligned VaR backtesting. Daily returns and VaR estimates are
//! matched on their common dates; a violation is a day whose return falls
//! below the negated VaR. Two likelihood-ratio tests score the violation
//! sequence:
//!
//! - **Kupiec POF** checks that the violation frequency matches the
//!   nominal rate implied by the confidence level.
//! - **Christoffersen independence** checks that violations do not
//!   cluster, via the day-to-day transition probabilities.
//!
//! Both statistics are chi-squared with one degree of freedom. Degenerate
//! samples (no violations, all violations, boundary transition
//! probabilities) short-circuit to statistic 0 and p-value 1 rather than
//! erroring.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod series;

pub use series::ReturnSeries;

use risk_core::math::distributions::chi_squared_cdf_1;
use thiserror::Error;

/// Errors raised by backtest assembly.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BacktestError {
    /// The return and VaR series share no dates.
    #[error("return and VaR series share no dates")]
    NoCommonDates,
    /// Confidence level outside (0, 1).
    #[error("confidence {0} must be strictly between 0 and 1")]
    InvalidConfidence(f64),
}

/// Outcome of a VaR backtest.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacktestResult {
    /// Observed violation frequency.
    pub violation_rate: f64,
    /// Nominal violation frequency, `1 - confidence`.
    pub expected_rate: f64,
    /// Kupiec proportion-of-failures likelihood-ratio statistic.
    pub kupiec_stat: f64,
    /// Kupiec p-value from the chi-squared(1) distribution.
    pub kupiec_p_value: f64,
    /// Christoffersen independence likelihood-ratio statistic.
    pub christoffersen_stat: f64,
    /// Christoffersen p-value from the chi-squared(1) distribution.
    pub christoffersen_p_value: f64,
    /// Number of violation days.
    pub n_violations: usize,
    /// Number of aligned observation days.
    pub n_observations: usize,
}

/// Backtest VaR estimates against realised returns.
///
/// `var_estimates` holds positive loss thresholds at the given confidence
/// level; day `t` is a violation when `return_t < -var_t`. Only dates
/// present in both series are scored.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use risk_backtest::{backtest_var, ReturnSeries};
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let returns = ReturnSeries::from_pairs((1..=20).map(|d| {
///     (day(d), if d == 10 { -0.05 } else { 0.001 })
/// }));
/// let var = ReturnSeries::from_pairs((1..=20).map(|d| (day(d), 0.02)));
///
/// let result = backtest_var(&returns, &var, 0.95).unwrap();
/// assert_eq!(result.n_violations, 1);
/// assert!(result.kupiec_stat.abs() < 1e-12);
/// ```
pub fn backtest_var(
    returns: &ReturnSeries,
    var_estimates: &ReturnSeries,
    confidence: f64,
) -> Result<BacktestResult, BacktestError> {
    if !confidence.is_finite() || confidence <= 0.0 || confidence >= 1.0 {
        return Err(BacktestError::InvalidConfidence(confidence));
    }

    let aligned = returns.aligned_with(var_estimates);
    if aligned.is_empty() {
        return Err(BacktestError::NoCommonDates);
    }

    let violations: Vec<bool> = aligned.iter().map(|&(ret, var)| ret < -var).collect();
    let n = violations.len();
    let n_violations = violations.iter().filter(|&&v| v).count();
    let expected_rate = 1.0 - confidence;

    let (kupiec_stat, kupiec_p_value) = kupiec_pof(n, n_violations, expected_rate);
    let (christoffersen_stat, christoffersen_p_value) = christoffersen_independence(&violations);

    Ok(BacktestResult {
        violation_rate: n_violations as f64 / n as f64,
        expected_rate,
        kupiec_stat,
        kupiec_p_value,
        christoffersen_stat,
        christoffersen_p_value,
        n_violations,
        n_observations: n,
    })
}

/// Kupiec proportion-of-failures test.
///
/// Zero violations or violations on every day make the likelihood ratio
/// degenerate; those samples return (0, 1).
fn kupiec_pof(n: usize, n_violations: usize, expected_rate: f64) -> (f64, f64) {
    if n_violations == 0 || n_violations == n {
        return (0.0, 1.0);
    }
    let n1 = n_violations as f64;
    let n0 = (n - n_violations) as f64;
    let observed_rate = n1 / n as f64;

    let stat = 2.0
        * (n1 * (observed_rate / expected_rate).ln()
            + n0 * ((1.0 - observed_rate) / (1.0 - expected_rate)).ln());
    (stat, 1.0 - chi_squared_cdf_1(stat))
}

/// Christoffersen independence test on the violation sequence.
///
/// Compares the violation probability conditional on a prior-day violation
/// against the unconditional transition rate. Samples with no transitions
/// out of the violation state, or with boundary probabilities, return
/// (0, 1).
fn christoffersen_independence(violations: &[bool]) -> (f64, f64) {
    let mut n10 = 0.0;
    let mut n11 = 0.0;
    for pair in violations.windows(2) {
        if pair[0] {
            if pair[1] {
                n11 += 1.0;
            } else {
                n10 += 1.0;
            }
        }
    }

    let transitions = (violations.len() - 1) as f64;
    let from_violation = n10 + n11;
    if from_violation == 0.0 || transitions == 0.0 {
        return (0.0, 1.0);
    }

    let p1 = n11 / from_violation;
    let p = from_violation / transitions;
    if p1 <= 0.0 || p1 >= 1.0 || p <= 0.0 || p >= 1.0 {
        return (0.0, 1.0);
    }

    let stat = 2.0 * (n10 * ((1.0 - p1) / (1.0 - p)).ln() + n11 * (p1 / p).ln());
    (stat, 1.0 - chi_squared_cdf_1(stat))
}
