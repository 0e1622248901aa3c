//! Geometric Brownian motion price paths with optional stochastic variance.
//!
//! The base model is risk-neutral GBM:
//!
//! ```text
//! S_{t+dt} = S_t * exp((r - q - v/2) dt + sqrt(v dt) z),  z ~ N(0, 1)
//! ```
//!
//! With [`StochVolParams`] attached, the instantaneous variance follows a
//! Heston-style square-root process, discretised with full truncation so it
//! never goes negative:
//!
//! ```text
//! v_{t+dt} = max(0, v_t + kappa (theta - v_t) dt + xi sqrt(v_t dt) z_v)
//! ```
//!
//! where `z_v` is correlated with the price shock at level `rho`.

use risk_core::SimRng;

use crate::error::ModelError;

/// Heston-style stochastic variance parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StochVolParams {
    /// Mean-reversion speed of the variance process.
    pub kappa: f64,
    /// Long-run variance level.
    pub theta: f64,
    /// Volatility of variance.
    pub xi: f64,
    /// Correlation between price and variance shocks.
    pub rho: f64,
}

impl StochVolParams {
    /// Validated constructor.
    ///
    /// Requires `kappa`, `theta`, `xi` non-negative and `rho` in [-1, 1].
    pub fn new(kappa: f64, theta: f64, xi: f64, rho: f64) -> Result<Self, ModelError> {
        if !kappa.is_finite() || kappa < 0.0 {
            return Err(ModelError::InvalidParameter {
                name: "kappa",
                value: kappa,
            });
        }
        if !theta.is_finite() || theta < 0.0 {
            return Err(ModelError::InvalidParameter {
                name: "theta",
                value: theta,
            });
        }
        if !xi.is_finite() || xi < 0.0 {
            return Err(ModelError::InvalidParameter { name: "xi", value: xi });
        }
        if !rho.is_finite() || !(-1.0..=1.0).contains(&rho) {
            return Err(ModelError::InvalidParameter { name: "rho", value: rho });
        }
        Ok(Self {
            kappa,
            theta,
            xi,
            rho,
        })
    }
}

/// Immutable GBM model parameters.
///
/// # Examples
///
/// ```
/// use risk_core::SimRng;
/// use risk_models::GbmParams;
///
/// let params = GbmParams::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let mut rng = SimRng::from_seed(1);
/// let path = params.simulate_path(252, 1.0 / 252.0, &mut rng);
/// assert_eq!(path.len(), 253);
/// assert!(path.terminal() > 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial asset price.
    pub spot: f64,
    /// Risk-free rate (continuously compounded).
    pub rate: f64,
    /// Continuous dividend yield.
    pub dividend_yield: f64,
    /// Initial (and, without stochastic variance, constant) volatility.
    pub volatility: f64,
    /// Optional stochastic variance dynamics.
    pub stoch_vol: Option<StochVolParams>,
}

impl GbmParams {
    /// Constant-volatility parameters.
    ///
    /// Requires `spot > 0` and `volatility >= 0`; rate and dividend yield
    /// may take any finite value.
    pub fn new(
        spot: f64,
        rate: f64,
        dividend_yield: f64,
        volatility: f64,
    ) -> Result<Self, ModelError> {
        if !spot.is_finite() || spot <= 0.0 {
            return Err(ModelError::InvalidParameter {
                name: "spot",
                value: spot,
            });
        }
        if !rate.is_finite() {
            return Err(ModelError::InvalidParameter {
                name: "rate",
                value: rate,
            });
        }
        if !dividend_yield.is_finite() {
            return Err(ModelError::InvalidParameter {
                name: "dividend_yield",
                value: dividend_yield,
            });
        }
        if !volatility.is_finite() || volatility < 0.0 {
            return Err(ModelError::InvalidParameter {
                name: "volatility",
                value: volatility,
            });
        }
        Ok(Self {
            spot,
            rate,
            dividend_yield,
            volatility,
            stoch_vol: None,
        })
    }

    /// Attach stochastic variance dynamics.
    #[must_use]
    pub fn with_stoch_vol(mut self, stoch_vol: StochVolParams) -> Self {
        self.stoch_vol = Some(stoch_vol);
        self
    }

    /// Simulate one price path of `steps` increments of size `dt`.
    ///
    /// The returned path has `steps + 1` points starting at the spot. The
    /// variance applied over each step is the post-update variance, so the
    /// price and variance series stay in lockstep.
    pub fn simulate_path(&self, steps: usize, dt: f64, rng: &mut SimRng) -> PricePath {
        let mut prices = Vec::with_capacity(steps + 1);
        let mut variances = Vec::with_capacity(steps + 1);

        let mut price = self.spot;
        let mut variance = self.volatility * self.volatility;
        prices.push(price);
        variances.push(variance);

        for _ in 0..steps {
            let z1 = rng.next_normal();

            if let Some(sv) = &self.stoch_vol {
                let z_ind = rng.next_normal();
                let z2 = sv.rho * z1 + (1.0 - sv.rho * sv.rho).sqrt() * z_ind;
                variance = (variance
                    + sv.kappa * (sv.theta - variance) * dt
                    + sv.xi * (variance * dt).sqrt() * z2)
                    .max(0.0);
            }

            let drift = (self.rate - self.dividend_yield - 0.5 * variance) * dt;
            let diffusion = (variance * dt).sqrt() * z1;
            price *= (drift + diffusion).exp();

            prices.push(price);
            variances.push(variance);
        }

        PricePath { prices, variances }
    }
}

/// One simulated price path with its variance series.
#[derive(Clone, Debug, PartialEq)]
pub struct PricePath {
    /// Asset prices, `steps + 1` points, first equals the spot.
    pub prices: Vec<f64>,
    /// Instantaneous variance in force over each step.
    pub variances: Vec<f64>,
}

impl PricePath {
    /// Number of points on the path (steps + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether the path is empty (never true for simulated paths).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Terminal asset price.
    #[inline]
    pub fn terminal(&self) -> f64 {
        *self.prices.last().unwrap_or(&f64::NAN)
    }

    /// Arithmetic mean price over the whole path.
    pub fn mean_price(&self) -> f64 {
        if self.prices.is_empty() {
            return f64::NAN;
        }
        self.prices.iter().sum::<f64>() / self.prices.len() as f64
    }

    /// Whether any point reaches or exceeds `level`.
    pub fn touched_at_or_above(&self, level: f64) -> bool {
        self.prices.iter().any(|&p| p >= level)
    }

    /// Whether any point reaches or falls below `level`.
    pub fn touched_at_or_below(&self, level: f64) -> bool {
        self.prices.iter().any(|&p| p <= level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn rejects_non_positive_spot() {
        assert!(matches!(
            GbmParams::new(0.0, 0.05, 0.0, 0.2),
            Err(ModelError::InvalidParameter { name: "spot", .. })
        ));
    }

    #[test]
    fn rejects_negative_volatility() {
        assert!(matches!(
            GbmParams::new(100.0, 0.05, 0.0, -0.2),
            Err(ModelError::InvalidParameter {
                name: "volatility",
                ..
            })
        ));
    }

    #[test]
    fn stoch_vol_rejects_out_of_range_rho() {
        assert!(matches!(
            StochVolParams::new(1.0, 0.04, 0.3, -1.5),
            Err(ModelError::InvalidParameter { name: "rho", .. })
        ));
    }

    #[test]
    fn path_starts_at_spot_with_expected_length() {
        let params = GbmParams::new(100.0, 0.05, 0.01, 0.2).unwrap();
        let mut rng = SimRng::from_seed(11);
        let path = params.simulate_path(12, 1.0 / 12.0, &mut rng);
        assert_eq!(path.len(), 13);
        assert_eq!(path.prices[0], 100.0);
        assert_eq!(path.variances[0], 0.04);
    }

    #[test]
    fn zero_volatility_gives_deterministic_drift() {
        let params = GbmParams::new(100.0, 0.05, 0.01, 0.0).unwrap();
        let mut rng = SimRng::from_seed(3);
        let dt = 0.25;
        let path = params.simulate_path(8, dt, &mut rng);
        for (k, &price) in path.prices.iter().enumerate() {
            let expected = 100.0 * ((0.05 - 0.01) * dt * k as f64).exp();
            assert_relative_eq!(price, expected, epsilon = 1e-10);
        }
    }

    #[test]
    fn same_seed_same_path() {
        let params = GbmParams::new(50.0, 0.02, 0.0, 0.3).unwrap();
        let a = params.simulate_path(64, 1.0 / 64.0, &mut SimRng::from_seed(99));
        let b = params.simulate_path(64, 1.0 / 64.0, &mut SimRng::from_seed(99));
        assert_eq!(a, b);
    }

    #[test]
    fn stochastic_variance_stays_non_negative() {
        let sv = StochVolParams::new(2.0, 0.04, 0.9, -0.7).unwrap();
        let params = GbmParams::new(100.0, 0.03, 0.0, 0.2).unwrap().with_stoch_vol(sv);
        let mut rng = SimRng::from_seed(77);
        for _ in 0..50 {
            let path = params.simulate_path(100, 1.0 / 100.0, &mut rng);
            assert!(path.variances.iter().all(|&v| v >= 0.0));
            assert!(path.prices.iter().all(|&p| p > 0.0));
        }
    }

    #[test]
    fn barrier_helpers() {
        let path = PricePath {
            prices: vec![100.0, 104.0, 97.0],
            variances: vec![0.04; 3],
        };
        assert!(path.touched_at_or_above(104.0));
        assert!(!path.touched_at_or_above(104.5));
        assert!(path.touched_at_or_below(97.0));
        assert!(!path.touched_at_or_below(96.0));
        assert_relative_eq!(path.mean_price(), 100.333333333, epsilon = 1e-6);
    }

    proptest! {
        #[test]
        fn prices_are_always_positive(
            seed in 0u64..1000,
            vol in 0.0f64..1.5,
        ) {
            let params = GbmParams::new(100.0, 0.05, 0.0, vol).unwrap();
            let mut rng = SimRng::from_seed(seed);
            let path = params.simulate_path(32, 1.0 / 32.0, &mut rng);
            prop_assert!(path.prices.iter().all(|&p| p > 0.0));
        }
    }
}
