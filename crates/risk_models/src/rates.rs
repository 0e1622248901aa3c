//! Correlated multi-tenor mean-reverting rate model.
//!
//! Each tenor follows a Vasicek-style update reverting to its initial
//! level, with shocks correlated across tenors through a factor matrix:
//!
//! ```text
//! r_{t+dt} = max(0, r_t + kappa (r_0 - r_t) dt + sigma_i sqrt(dt) w_i)
//! w = F z,  z ~ N(0, I)
//! ```
//!
//! Rates are quoted in percentage points throughout (3.0 means 3%).

use risk_core::math::correlation::DEFAULT_EIGENVALUE_FLOOR;
use risk_core::{CorrelationMatrix, FactorMatrix, SimRng};

use crate::error::ModelError;
use crate::tenor::Tenor;

/// Immutable rate model parameters with a pre-built factor matrix.
///
/// Construction repairs the supplied correlation matrix and factorises it
/// once, so simulation never re-decomposes per path.
#[derive(Clone, Debug)]
pub struct RateModelParams {
    tenors: Vec<Tenor>,
    initial_rates: Vec<f64>,
    volatilities: Vec<f64>,
    mean_reversion: f64,
    correlation: CorrelationMatrix,
    factor: FactorMatrix,
}

impl RateModelParams {
    /// Validated constructor.
    ///
    /// `correlation` is a row-major square matrix over the tenors; it is
    /// repaired (eigenvalue clip and renormalise) before factorisation, so
    /// an approximately-estimated matrix is acceptable input.
    pub fn new(
        tenors: Vec<Tenor>,
        initial_rates: Vec<f64>,
        volatilities: Vec<f64>,
        correlation: &[f64],
        mean_reversion: f64,
    ) -> Result<Self, ModelError> {
        let dim = tenors.len();
        if dim == 0 {
            return Err(ModelError::DimensionMismatch {
                name: "tenors",
                expected: 1,
                got: 0,
            });
        }
        if initial_rates.len() != dim {
            return Err(ModelError::DimensionMismatch {
                name: "initial_rates",
                expected: dim,
                got: initial_rates.len(),
            });
        }
        if volatilities.len() != dim {
            return Err(ModelError::DimensionMismatch {
                name: "volatilities",
                expected: dim,
                got: volatilities.len(),
            });
        }
        if let Some(&bad) = volatilities.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(ModelError::InvalidParameter {
                name: "volatility",
                value: bad,
            });
        }
        if !mean_reversion.is_finite() || mean_reversion < 0.0 {
            return Err(ModelError::InvalidParameter {
                name: "mean_reversion",
                value: mean_reversion,
            });
        }

        let correlation = CorrelationMatrix::repair(correlation, dim, DEFAULT_EIGENVALUE_FLOOR)?;
        let factor = FactorMatrix::from_correlation(&correlation);

        Ok(Self {
            tenors,
            initial_rates,
            volatilities,
            mean_reversion,
            correlation,
            factor,
        })
    }

    /// Tenors in construction order.
    #[inline]
    pub fn tenors(&self) -> &[Tenor] {
        &self.tenors
    }

    /// Initial rates in percentage points.
    #[inline]
    pub fn initial_rates(&self) -> &[f64] {
        &self.initial_rates
    }

    /// Per-tenor shock volatilities.
    #[inline]
    pub fn volatilities(&self) -> &[f64] {
        &self.volatilities
    }

    /// Repaired cross-tenor correlation matrix.
    #[inline]
    pub fn correlation(&self) -> &CorrelationMatrix {
        &self.correlation
    }

    /// Simulate one rate path of `steps` increments of size `dt`.
    pub fn simulate_path(&self, steps: usize, dt: f64, rng: &mut SimRng) -> RatePath {
        let dim = self.tenors.len();
        let sqrt_dt = dt.sqrt();

        let mut rates = Vec::with_capacity(steps + 1);
        rates.push(self.initial_rates.clone());

        let mut independent = vec![0.0; dim];
        let mut correlated = vec![0.0; dim];
        let mut current = self.initial_rates.clone();

        for _ in 0..steps {
            rng.fill_normal(&mut independent);
            self.factor.transform_into(&independent, &mut correlated);

            for i in 0..dim {
                let drift = self.mean_reversion * (self.initial_rates[i] - current[i]) * dt;
                let shock = self.volatilities[i] * sqrt_dt * correlated[i];
                current[i] = (current[i] + drift + shock).max(0.0);
            }
            rates.push(current.clone());
        }

        RatePath { rates }
    }

    /// Simulate an ensemble of `n` independent paths.
    pub fn simulate_paths(&self, n: usize, steps: usize, dt: f64, rng: &mut SimRng) -> Vec<RatePath> {
        (0..n).map(|_| self.simulate_path(steps, dt, rng)).collect()
    }
}

/// One simulated rate path: `steps + 1` rows, one column per tenor.
#[derive(Clone, Debug, PartialEq)]
pub struct RatePath {
    /// Rate rows in time order; row 0 is the initial curve.
    pub rates: Vec<Vec<f64>>,
}

impl RatePath {
    /// Number of increments on the path.
    #[inline]
    pub fn steps(&self) -> usize {
        self.rates.len().saturating_sub(1)
    }

    /// Number of tenors per row.
    pub fn tenor_count(&self) -> usize {
        self.rates.first().map_or(0, Vec::len)
    }

    /// Rate row at time index `step` (0 is the initial curve).
    #[inline]
    pub fn row(&self, step: usize) -> &[f64] {
        &self.rates[step]
    }
}

/// Synthetic rate-market parameter generator.
///
/// Produces a plausible upward-sloping curve, a volatility term structure
/// that decays with maturity, and an exponentially decaying cross-tenor
/// correlation. Useful for demos and tests where no market data feed
/// exists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateMarketGenerator {
    /// Short-end rate level in percentage points.
    pub base_rate: f64,
    /// Log-curve steepness coefficient.
    pub curve_steepness: f64,
    /// Short-end shock volatility.
    pub vol_level: f64,
    /// Volatility decay with maturity.
    pub vol_decay: f64,
    /// Correlation decay per year of tenor distance.
    pub corr_decay: f64,
}

impl Default for RateMarketGenerator {
    fn default() -> Self {
        Self {
            base_rate: 3.0,
            curve_steepness: 0.5,
            vol_level: 0.8,
            vol_decay: 0.15,
            corr_decay: 0.15,
        }
    }
}

/// Floor on generated shock volatilities.
const MIN_VOLATILITY: f64 = 0.3;

impl RateMarketGenerator {
    /// Initial rate per tenor: `base + steepness * ln(1 + years)`.
    pub fn initial_rates(&self, tenors: &[Tenor]) -> Vec<f64> {
        tenors
            .iter()
            .map(|t| self.base_rate + self.curve_steepness * t.years().ln_1p())
            .collect()
    }

    /// Shock volatility per tenor, decaying with maturity and floored.
    pub fn volatilities(&self, tenors: &[Tenor]) -> Vec<f64> {
        tenors
            .iter()
            .map(|t| (self.vol_level - self.vol_decay * (t.years() / 2.0).ln_1p()).max(MIN_VOLATILITY))
            .collect()
    }

    /// Row-major cross-tenor correlation: `exp(-decay |tau_i - tau_j|)`.
    pub fn correlation(&self, tenors: &[Tenor]) -> Vec<f64> {
        let n = tenors.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                let distance = (tenors[i].years() - tenors[j].years()).abs();
                data[i * n + j] = (-self.corr_decay * distance).exp();
            }
        }
        data
    }

    /// Build full model parameters for the given tenors.
    pub fn build(
        &self,
        tenors: Vec<Tenor>,
        mean_reversion: f64,
    ) -> Result<RateModelParams, ModelError> {
        let initial_rates = self.initial_rates(&tenors);
        let volatilities = self.volatilities(&tenors);
        let correlation = self.correlation(&tenors);
        RateModelParams::new(tenors, initial_rates, volatilities, &correlation, mean_reversion)
    }
}
