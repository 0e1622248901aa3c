//! Empirical risk statistics over present-value samples.
//!
//! VaR and expected shortfall are computed in loss space
//! (`loss = -present_value`), so both are positive for losing tails and
//! VaR is non-decreasing in the confidence level.

use crate::error::EngineError;

/// Multiplier for a two-sided 95% normal confidence interval.
pub(crate) const CI95_Z: f64 = 1.959963984540054;

/// Summary statistics of a present-value sample.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskStatistics {
    /// Sample mean present value.
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std_dev: f64,
    /// Standard error of the mean.
    pub standard_error: f64,
    /// Half-width of the 95% confidence interval on the mean.
    pub ci95: f64,
    /// Value-at-risk at the requested confidence, as a positive loss.
    pub var: f64,
    /// Mean loss at or beyond the VaR threshold.
    pub expected_shortfall: f64,
    /// Confidence level the tail measures were computed at.
    pub confidence: f64,
    /// Sample size.
    pub n_observations: usize,
}

impl RiskStatistics {
    /// Compute statistics from a present-value sample.
    ///
    /// # Errors
    ///
    /// `EngineError::InsufficientData` on an empty sample and
    /// `InvalidParameter` when `confidence` is outside (0, 1).
    ///
    /// # Examples
    ///
    /// ```
    /// use risk_engine::RiskStatistics;
    ///
    /// let pvs = vec![-5.0, -1.0, 0.0, 2.0, 4.0];
    /// let stats = RiskStatistics::from_present_values(&pvs, 0.95).unwrap();
    /// assert_eq!(stats.var, 5.0);
    /// assert!(stats.expected_shortfall >= stats.var);
    /// ```
    pub fn from_present_values(
        present_values: &[f64],
        confidence: f64,
    ) -> Result<Self, EngineError> {
        if present_values.is_empty() {
            return Err(EngineError::InsufficientData);
        }
        if !confidence.is_finite() || confidence <= 0.0 || confidence >= 1.0 {
            return Err(EngineError::InvalidParameter {
                name: "confidence",
                value: confidence,
            });
        }

        let n = present_values.len();
        let mean = present_values.iter().sum::<f64>() / n as f64;
        let std_dev = if n > 1 {
            let ss = present_values
                .iter()
                .map(|&pv| (pv - mean) * (pv - mean))
                .sum::<f64>();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };
        let standard_error = std_dev / (n as f64).sqrt();

        let mut losses: Vec<f64> = present_values.iter().map(|&pv| -pv).collect();
        losses.sort_by(f64::total_cmp);

        // Index of the empirical confidence-quantile of the loss
        // distribution; ceil keeps VaR non-decreasing in the confidence.
        let index = ((confidence * n as f64).ceil() as usize).clamp(1, n) - 1;
        let var = losses[index];
        let tail = &losses[index..];
        let expected_shortfall = tail.iter().sum::<f64>() / tail.len() as f64;

        Ok(Self {
            mean,
            std_dev,
            standard_error,
            ci95: CI95_Z * standard_error,
            var,
            expected_shortfall,
            confidence,
            n_observations: n,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn empty_sample_is_an_error() {
        assert_eq!(
            RiskStatistics::from_present_values(&[], 0.95),
            Err(EngineError::InsufficientData)
        );
    }

    #[test]
    fn rejects_boundary_confidence() {
        assert!(RiskStatistics::from_present_values(&[1.0], 1.0).is_err());
        assert!(RiskStatistics::from_present_values(&[1.0], 0.0).is_err());
    }

    #[test]
    fn single_observation_collapses_var_and_es() {
        let stats = RiskStatistics::from_present_values(&[-7.5], 0.99).unwrap();
        assert_eq!(stats.var, 7.5);
        assert_eq!(stats.expected_shortfall, 7.5);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.ci95, 0.0);
    }

    #[test]
    fn known_small_sample() {
        // Losses sorted: [-4, -2, 0, 1, 5]; 95% quantile index = ceil(4.75)-1 = 4.
        let pvs = [4.0, 2.0, 0.0, -1.0, -5.0];
        let stats = RiskStatistics::from_present_values(&pvs, 0.95).unwrap();
        assert_eq!(stats.var, 5.0);
        assert_eq!(stats.expected_shortfall, 5.0);
        assert_relative_eq!(stats.mean, 0.0, epsilon = 1e-12);
        assert_eq!(stats.n_observations, 5);
    }

    #[test]
    fn lower_confidence_picks_an_inner_quantile() {
        let pvs = [4.0, 2.0, 0.0, -1.0, -5.0];
        let stats = RiskStatistics::from_present_values(&pvs, 0.6).unwrap();
        // index = ceil(3.0) - 1 = 2 in sorted losses [-4, -2, 0, 1, 5].
        assert_eq!(stats.var, 0.0);
        assert_relative_eq!(stats.expected_shortfall, 2.0, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn var_monotone_in_confidence_and_es_dominates(
            pvs in prop::collection::vec(-100.0f64..100.0, 2..200),
            c_low in 0.5f64..0.8,
            c_high in 0.8f64..0.999,
        ) {
            let low = RiskStatistics::from_present_values(&pvs, c_low).unwrap();
            let high = RiskStatistics::from_present_values(&pvs, c_high).unwrap();
            prop_assert!(high.var >= low.var);
            prop_assert!(low.expected_shortfall >= low.var);
            prop_assert!(high.expected_shortfall >= high.var);
        }
    }
}
