//! Convergence diagnostics for Monte Carlo estimates.
//!
//! A study re-uses every simulated path: between successive checkpoints
//! only the incremental batch is simulated, so total cost is linear in the
//! final checkpoint rather than quadratic in the checkpoint count.

use crate::engine::{summarize, McOptionEngine};
use crate::error::EngineError;
use crate::payoff::ScenarioObservation;

/// Estimate quality at one checkpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergencePoint {
    /// Cumulative number of paths at this checkpoint.
    pub n_paths: usize,
    /// Estimate over the first `n_paths` paths.
    pub estimate: f64,
    /// Standard error at this checkpoint.
    pub standard_error: f64,
    /// Half-width of the 95% confidence interval.
    pub ci95: f64,
}

/// Estimate trajectory across increasing path counts.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceStudy {
    /// One point per checkpoint, in checkpoint order.
    pub points: Vec<ConvergencePoint>,
}

impl ConvergenceStudy {
    /// Run a study at the given cumulative path-count checkpoints.
    ///
    /// Checkpoints must be non-empty and strictly increasing; the first
    /// must be at least 1.
    pub fn run(engine: &McOptionEngine, checkpoints: &[usize]) -> Result<Self, EngineError> {
        if checkpoints.is_empty() || checkpoints[0] == 0 {
            return Err(EngineError::InvalidPathCount(
                checkpoints.first().copied().unwrap_or(0),
            ));
        }
        if let Some(w) = checkpoints.windows(2).find(|w| w[1] <= w[0]) {
            return Err(EngineError::InvalidPathCount(w[1]));
        }

        let capacity = checkpoints.last().copied().unwrap_or(0);
        let mut observations: Vec<ScenarioObservation> = Vec::with_capacity(capacity);
        let mut points = Vec::with_capacity(checkpoints.len());

        for &target in checkpoints {
            let have = observations.len();
            observations.extend(engine.simulate_batch(target - have, have));

            let summary = summarize(observations.clone());
            points.push(ConvergencePoint {
                n_paths: target,
                estimate: summary.estimate,
                standard_error: summary.standard_error,
                ci95: summary.ci95,
            });
        }

        Ok(Self { points })
    }
}
