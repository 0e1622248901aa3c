//! DV01 and partial-01 rate risk over simulated rate paths.
//!
//! Positions carry either a single blended DV01 or a per-tenor partial-01
//! ladder. P&L per simulation step is first-order:
//!
//! ```text
//! pnl = -sum_i partial01_i * delta_rate_bp_i
//! ```
//!
//! with rates quoted in percentage points, so one basis point is a rate
//! move of 0.01. Step P&L is reported raw, without re-discounting.

use std::collections::BTreeMap;

use risk_models::{RatePath, Tenor};

use crate::error::EngineError;
use crate::measures::RiskStatistics;

/// A bond (or bond-like) position with first-order rate sensitivities.
#[derive(Clone, Debug, PartialEq)]
pub struct BondPosition {
    /// Position identifier for reporting.
    pub name: String,
    /// Blended dollar value of one basis point.
    pub dv01: f64,
    /// Per-tenor partial-01 ladder; `None` falls back to the blended DV01
    /// against the average curve move.
    pub partial_01s: Option<BTreeMap<Tenor, f64>>,
}

impl BondPosition {
    /// Position with a blended DV01 only.
    pub fn blended(name: impl Into<String>, dv01: f64) -> Self {
        Self {
            name: name.into(),
            dv01,
            partial_01s: None,
        }
    }

    /// Position with a per-tenor partial-01 ladder.
    pub fn with_partials(
        name: impl Into<String>,
        dv01: f64,
        partial_01s: BTreeMap<Tenor, f64>,
    ) -> Self {
        Self {
            name: name.into(),
            dv01,
            partial_01s: Some(partial_01s),
        }
    }
}

/// Portfolio-level rate risk analyser over a fixed tenor set.
#[derive(Clone, Debug)]
pub struct Dv01Analyzer {
    positions: Vec<BondPosition>,
    tenors: Vec<Tenor>,
}

impl Dv01Analyzer {
    /// Validated constructor.
    ///
    /// Every position with a partial-01 ladder must cover exactly the
    /// simulated tenor set; a mismatch is `EngineError::InconsistentTenors`.
    pub fn new(positions: Vec<BondPosition>, tenors: Vec<Tenor>) -> Result<Self, EngineError> {
        if positions.is_empty() || tenors.is_empty() {
            return Err(EngineError::InsufficientData);
        }
        for position in &positions {
            if let Some(partials) = &position.partial_01s {
                let covers = partials.len() == tenors.len()
                    && tenors.iter().all(|t| partials.contains_key(t));
                if !covers {
                    return Err(EngineError::InconsistentTenors {
                        position: position.name.clone(),
                    });
                }
            }
        }
        Ok(Self { positions, tenors })
    }

    /// Tenors the analyser expects rate paths to cover, in order.
    #[inline]
    pub fn tenors(&self) -> &[Tenor] {
        &self.tenors
    }

    /// Per-simulation, per-period portfolio P&L.
    ///
    /// Returns one row per rate path; each row has one P&L entry per
    /// simulation step. Paths must all share the analyser's tenor count
    /// and a common step count.
    pub fn value_changes(&self, paths: &[RatePath]) -> Result<Vec<Vec<f64>>, EngineError> {
        if paths.is_empty() {
            return Err(EngineError::InsufficientData);
        }
        let steps = paths[0].steps();
        if steps == 0 {
            return Err(EngineError::InvalidStepCount(0));
        }
        for path in paths {
            if path.tenor_count() != self.tenors.len() {
                return Err(EngineError::InvalidParameter {
                    name: "tenor_count",
                    value: path.tenor_count() as f64,
                });
            }
            if path.steps() != steps {
                return Err(EngineError::InvalidStepCount(path.steps()));
            }
        }

        let mut changes = Vec::with_capacity(paths.len());
        for path in paths {
            let mut row = Vec::with_capacity(steps);
            for step in 0..steps {
                let previous = path.row(step);
                let current = path.row(step + 1);
                row.push(self.period_pnl(previous, current));
            }
            changes.push(row);
        }
        Ok(changes)
    }

    /// Portfolio P&L for one curve move.
    fn period_pnl(&self, previous: &[f64], current: &[f64]) -> f64 {
        let n = self.tenors.len();
        let mut pnl = 0.0;
        for position in &self.positions {
            match &position.partial_01s {
                Some(partials) => {
                    for (i, tenor) in self.tenors.iter().enumerate() {
                        let delta_bp = (current[i] - previous[i]) * 100.0;
                        pnl -= partials[tenor] * delta_bp;
                    }
                }
                None => {
                    let mean_delta_bp = (0..n)
                        .map(|i| (current[i] - previous[i]) * 100.0)
                        .sum::<f64>()
                        / n as f64;
                    pnl -= position.dv01 * mean_delta_bp;
                }
            }
        }
        pnl
    }

    /// Per-period risk statistics across the simulation ensemble.
    ///
    /// Row `k` summarises the distribution over simulations of the P&L in
    /// period `k`.
    pub fn period_risk(
        &self,
        changes: &[Vec<f64>],
        confidence: f64,
    ) -> Result<Vec<RiskStatistics>, EngineError> {
        let steps = changes.first().map_or(0, Vec::len);
        if steps == 0 {
            return Err(EngineError::InsufficientData);
        }
        (0..steps)
            .map(|step| {
                let sample: Vec<f64> = changes.iter().map(|row| row[step]).collect();
                RiskStatistics::from_present_values(&sample, confidence)
            })
            .collect()
    }
}
