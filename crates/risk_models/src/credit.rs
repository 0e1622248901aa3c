//! Single-factor Vasicek/Merton credit portfolio model.
//!
//! Each obligor's creditworthiness is a latent variable driven by one
//! systemic factor `F` and an idiosyncratic shock:
//!
//! ```text
//! U_i = sqrt(rho) F + sqrt(1 - rho) eps_i
//! ```
//!
//! Obligor `i` defaults when `U_i < Phi^-1(PD)`. Loss given default is
//! drawn from a normal distribution clipped to [0, 1] and applied to the
//! obligor's notional. Stress scenarios force `F` to an adverse level
//! while keeping the idiosyncratic draws random.

use risk_core::math::distributions::norm_inv_cdf;
use risk_core::SimRng;

use crate::error::ModelError;

/// Portfolio-wide credit model parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CreditParams {
    /// Unconditional one-period default probability per obligor.
    pub mean_default_probability: f64,
    /// Mean of the loss-given-default distribution.
    pub lgd_mean: f64,
    /// Standard deviation of the loss-given-default distribution.
    pub lgd_std: f64,
    /// Asset correlation with the systemic factor, in [0, 1).
    pub correlation: f64,
}

impl CreditParams {
    /// Validated constructor.
    pub fn new(
        mean_default_probability: f64,
        lgd_mean: f64,
        lgd_std: f64,
        correlation: f64,
    ) -> Result<Self, ModelError> {
        if !(0.0..1.0).contains(&mean_default_probability) || mean_default_probability <= 0.0 {
            return Err(ModelError::InvalidParameter {
                name: "mean_default_probability",
                value: mean_default_probability,
            });
        }
        if !(0.0..=1.0).contains(&lgd_mean) {
            return Err(ModelError::InvalidParameter {
                name: "lgd_mean",
                value: lgd_mean,
            });
        }
        if !lgd_std.is_finite() || lgd_std < 0.0 {
            return Err(ModelError::InvalidParameter {
                name: "lgd_std",
                value: lgd_std,
            });
        }
        if !(0.0..1.0).contains(&correlation) {
            return Err(ModelError::InvalidParameter {
                name: "correlation",
                value: correlation,
            });
        }
        Ok(Self {
            mean_default_probability,
            lgd_mean,
            lgd_std,
            correlation,
        })
    }
}

/// Outcome of one simulated credit scenario.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CreditScenario {
    /// Systemic factor realisation (drawn or forced).
    pub systemic_factor: f64,
    /// Portfolio loss in notional terms.
    pub total_loss: f64,
    /// Number of defaulted obligors.
    pub defaults: usize,
    /// Fraction of obligors that defaulted.
    pub default_rate: f64,
}

/// Credit portfolio: per-obligor notionals plus shared model parameters.
///
/// # Examples
///
/// ```
/// use risk_core::SimRng;
/// use risk_models::{CreditParams, CreditPortfolio};
///
/// let params = CreditParams::new(0.05, 0.6, 0.1, 0.2).unwrap();
/// let portfolio = CreditPortfolio::new(vec![1_000_000.0; 100], params).unwrap();
/// let mut rng = SimRng::from_seed(7);
/// let scenario = portfolio.simulate_scenario(None, &mut rng);
/// assert!(scenario.total_loss >= 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct CreditPortfolio {
    notionals: Vec<f64>,
    params: CreditParams,
    /// Latent-variable default threshold `Phi^-1(PD)`.
    default_threshold: f64,
}

impl CreditPortfolio {
    /// Validated constructor; notionals must be non-empty and positive.
    pub fn new(notionals: Vec<f64>, params: CreditParams) -> Result<Self, ModelError> {
        if notionals.is_empty() {
            return Err(ModelError::DimensionMismatch {
                name: "notionals",
                expected: 1,
                got: 0,
            });
        }
        if let Some(&bad) = notionals.iter().find(|n| !n.is_finite() || **n <= 0.0) {
            return Err(ModelError::InvalidParameter {
                name: "notional",
                value: bad,
            });
        }
        let default_threshold = norm_inv_cdf(params.mean_default_probability);
        Ok(Self {
            notionals,
            params,
            default_threshold,
        })
    }

    /// Number of obligors.
    #[inline]
    pub fn obligor_count(&self) -> usize {
        self.notionals.len()
    }

    /// Total portfolio notional.
    pub fn total_notional(&self) -> f64 {
        self.notionals.iter().sum()
    }

    /// Model parameters.
    #[inline]
    pub fn params(&self) -> &CreditParams {
        &self.params
    }

    /// Latent default threshold `Phi^-1(PD)`.
    #[inline]
    pub fn default_threshold(&self) -> f64 {
        self.default_threshold
    }

    /// Simulate one scenario.
    ///
    /// `systemic` forces the systemic factor to a fixed value (stress
    /// testing); `None` draws it from the standard normal.
    pub fn simulate_scenario(&self, systemic: Option<f64>, rng: &mut SimRng) -> CreditScenario {
        let factor = systemic.unwrap_or_else(|| rng.next_normal());
        let loading = self.params.correlation.sqrt();
        let idiosyncratic = (1.0 - self.params.correlation).sqrt();

        let mut total_loss = 0.0;
        let mut defaults = 0;
        for &notional in &self.notionals {
            let latent = loading * factor + idiosyncratic * rng.next_normal();
            if latent < self.default_threshold {
                defaults += 1;
                let lgd = (self.params.lgd_mean + self.params.lgd_std * rng.next_normal())
                    .clamp(0.0, 1.0);
                total_loss += notional * lgd;
            }
        }

        CreditScenario {
            systemic_factor: factor,
            total_loss,
            defaults,
            default_rate: defaults as f64 / self.notionals.len() as f64,
        }
    }

    /// Simulate an ensemble of `n` independent scenarios.
    pub fn simulate(&self, n: usize, rng: &mut SimRng) -> Vec<CreditScenario> {
        (0..n).map(|_| self.simulate_scenario(None, rng)).collect()
    }

    /// Stress run: one base scenario at `F = 0` followed by one scenario
    /// per forced systemic level.
    pub fn stress_scenarios(&self, levels: &[f64], rng: &mut SimRng) -> Vec<CreditScenario> {
        let mut out = Vec::with_capacity(levels.len() + 1);
        out.push(self.simulate_scenario(Some(0.0), rng));
        for &level in levels {
            out.push(self.simulate_scenario(Some(level), rng));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn portfolio() -> CreditPortfolio {
        let params = CreditParams::new(0.05, 0.6, 0.1, 0.2).unwrap();
        CreditPortfolio::new(vec![1_000_000.0; 1000], params).unwrap()
    }

    #[test]
    fn rejects_degenerate_parameters() {
        assert!(CreditParams::new(0.0, 0.6, 0.1, 0.2).is_err());
        assert!(CreditParams::new(1.0, 0.6, 0.1, 0.2).is_err());
        assert!(CreditParams::new(0.05, 1.5, 0.1, 0.2).is_err());
        assert!(CreditParams::new(0.05, 0.6, -0.1, 0.2).is_err());
        assert!(CreditParams::new(0.05, 0.6, 0.1, 1.0).is_err());
    }

    #[test]
    fn rejects_empty_or_bad_notionals() {
        let params = CreditParams::new(0.05, 0.6, 0.1, 0.2).unwrap();
        assert!(CreditPortfolio::new(vec![], params).is_err());
        assert!(CreditPortfolio::new(vec![1.0, -2.0], params).is_err());
    }

    #[test]
    fn threshold_matches_inverse_cdf() {
        let p = portfolio();
        // Phi^-1(0.05) ~= -1.6449
        assert!((p.default_threshold() + 1.6449).abs() < 1e-3);
    }

    #[test]
    fn base_scenario_default_rate_near_conditional_level() {
        // Conditional on F = 0, the default rate is
        // Phi(Phi^-1(0.05) / sqrt(1 - rho)) ~= 3.3% for rho = 0.2.
        let p = portfolio();
        let mut rng = SimRng::from_seed(42);
        let mut rate_sum = 0.0;
        let runs = 50;
        for _ in 0..runs {
            rate_sum += p.simulate_scenario(Some(0.0), &mut rng).default_rate;
        }
        let mean_rate = rate_sum / runs as f64;
        assert!(
            (0.02..0.05).contains(&mean_rate),
            "mean default rate {mean_rate}"
        );
    }

    #[test]
    fn stressed_factor_raises_default_rate() {
        let p = portfolio();
        let mut rng = SimRng::from_seed(42);
        let scenarios = p.stress_scenarios(&[-1.0, -3.0], &mut rng);
        assert_eq!(scenarios.len(), 3);
        assert_eq!(scenarios[0].systemic_factor, 0.0);
        assert_eq!(scenarios[2].systemic_factor, -3.0);
        // F = -3 conditional default rate ~= 36.7%, far above base.
        assert!(scenarios[2].default_rate > 2.0 * scenarios[0].default_rate);
        assert!(scenarios[2].total_loss > scenarios[0].total_loss);
    }

    #[test]
    fn loss_bounded_by_total_notional() {
        let p = portfolio();
        let mut rng = SimRng::from_seed(9);
        for scenario in p.simulate(20, &mut rng) {
            assert!(scenario.total_loss >= 0.0);
            assert!(scenario.total_loss <= p.total_notional());
            assert_eq!(
                scenario.default_rate,
                scenario.defaults as f64 / p.obligor_count() as f64
            );
        }
    }
}
