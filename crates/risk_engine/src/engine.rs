//! Monte Carlo option pricing engine.
//!
//! Paths are fanned out with rayon; path `i` always uses
//! `SimRng::stream(seed, i)`, so the estimate is bit-identical regardless
//! of thread count or work splitting.

use rayon::prelude::*;
use risk_core::SimRng;
use risk_models::{black_scholes_price, GbmParams, PricePath};

use crate::config::SimulationConfig;
use crate::error::EngineError;
use crate::instruments::{ExerciseStyle, OptionContract};
use crate::measures::{RiskStatistics, CI95_Z};
use crate::payoff::{evaluate, ScenarioObservation};

/// Aggregated result of a Monte Carlo run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationSummary {
    /// Mean present value across paths.
    pub estimate: f64,
    /// Sample standard deviation of present values.
    pub std_dev: f64,
    /// Standard error of the estimate.
    pub standard_error: f64,
    /// Half-width of the 95% confidence interval on the estimate.
    pub ci95: f64,
    /// Per-path observations, in path-index order.
    pub observations: Vec<ScenarioObservation>,
}

impl SimulationSummary {
    /// Tail risk statistics of the present-value sample at `confidence`.
    pub fn risk_statistics(&self, confidence: f64) -> Result<RiskStatistics, EngineError> {
        let pvs: Vec<f64> = self.observations.iter().map(|o| o.present_value).collect();
        RiskStatistics::from_present_values(&pvs, confidence)
    }
}

/// Monte Carlo engine for one option contract under GBM dynamics.
///
/// # Examples
///
/// ```
/// use risk_engine::{ExerciseStyle, McOptionEngine, OptionContract, PositionSide, SimulationConfig};
/// use risk_models::{GbmParams, OptionKind};
///
/// let params = GbmParams::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let contract = OptionContract::new(
///     OptionKind::Call,
///     ExerciseStyle::European,
///     100.0,
///     1.0,
///     PositionSide::Long,
/// )
/// .unwrap();
/// let config = SimulationConfig::builder().n_paths(2000).n_steps(16).seed(1).build().unwrap();
/// let engine = McOptionEngine::new(params, contract, config);
/// let summary = engine.run();
/// assert!(summary.estimate > 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct McOptionEngine {
    params: GbmParams,
    contract: OptionContract,
    config: SimulationConfig,
    /// Step size: maturity split evenly over the configured steps.
    dt: f64,
}

impl McOptionEngine {
    /// Build an engine from validated parts.
    pub fn new(params: GbmParams, contract: OptionContract, config: SimulationConfig) -> Self {
        let dt = contract.maturity.max(0.0) / config.n_steps() as f64;
        Self {
            params,
            contract,
            config,
            dt,
        }
    }

    /// Engine configuration.
    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Contract being priced.
    #[inline]
    pub fn contract(&self) -> &OptionContract {
        &self.contract
    }

    /// Simulate `count` paths with global indices starting at `first_index`.
    ///
    /// Indices feed the per-path RNG streams, so batches with disjoint
    /// index ranges are statistically independent and a batch is always
    /// identical to the same index range of a larger run.
    pub fn simulate_batch(&self, count: usize, first_index: usize) -> Vec<ScenarioObservation> {
        (0..count)
            .into_par_iter()
            .map(|i| {
                let mut rng = SimRng::stream(self.config.seed(), (first_index + i) as u64);
                let path = self.simulate_path(&mut rng);
                evaluate(&path, &self.contract, self.params.rate)
            })
            .collect()
    }

    fn simulate_path(&self, rng: &mut SimRng) -> PricePath {
        self.params
            .simulate_path(self.config.n_steps(), self.dt, rng)
    }

    /// Run the full configured simulation.
    ///
    /// A contract at or past maturity is not simulated: the summary holds
    /// the intrinsic value with zero dispersion.
    pub fn run(&self) -> SimulationSummary {
        if self.contract.maturity <= 0.0 {
            let payoff = self.contract.position.sign()
                * self
                    .contract
                    .kind
                    .intrinsic(self.params.spot, self.contract.strike);
            let observation = ScenarioObservation {
                terminal_price: self.params.spot,
                payoff,
                present_value: payoff,
            };
            return SimulationSummary {
                estimate: payoff,
                std_dev: 0.0,
                standard_error: 0.0,
                ci95: 0.0,
                observations: vec![observation],
            };
        }

        let observations = self.simulate_batch(self.config.n_paths(), 0);
        summarize(observations)
    }

    /// Analytic Black-Scholes cross-check, European style only.
    pub fn reference_price(&self) -> Option<f64> {
        match self.contract.style {
            ExerciseStyle::European => Some(
                self.contract.position.sign()
                    * black_scholes_price(
                        self.params.spot,
                        self.contract.strike,
                        self.contract.maturity,
                        self.params.rate,
                        self.params.dividend_yield,
                        self.params.volatility,
                        self.contract.kind,
                    ),
            ),
            _ => None,
        }
    }
}

/// Fold a batch of observations into a summary.
pub(crate) fn summarize(observations: Vec<ScenarioObservation>) -> SimulationSummary {
    let n = observations.len();
    let estimate = observations.iter().map(|o| o.present_value).sum::<f64>() / n as f64;
    let std_dev = if n > 1 {
        let ss = observations
            .iter()
            .map(|o| (o.present_value - estimate) * (o.present_value - estimate))
            .sum::<f64>();
        (ss / (n - 1) as f64).sqrt()
    } else {
        0.0
    };
    let standard_error = std_dev / (n as f64).sqrt();

    SimulationSummary {
        estimate,
        std_dev,
        standard_error,
        ci95: CI95_Z * standard_error,
        observations,
    }
}
