//! Simulation configuration with bounds-checked construction.

use crate::error::EngineError;

/// Hard cap on Monte Carlo paths per run.
pub const MAX_PATHS: usize = 10_000_000;

/// Hard cap on time steps per path.
pub const MAX_STEPS: usize = 10_000;

/// Immutable Monte Carlo run configuration.
///
/// Built through [`SimulationConfigBuilder`]; bounds are enforced at
/// [`build`](SimulationConfigBuilder::build) so an existing config is
/// always valid.
///
/// # Examples
///
/// ```
/// use risk_engine::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_paths(50_000)
///     .n_steps(252)
///     .seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(config.confidence(), 0.95);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    n_paths: usize,
    n_steps: usize,
    seed: u64,
    confidence: f64,
}

impl SimulationConfig {
    /// Start building a configuration.
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Number of Monte Carlo paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Base RNG seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Confidence level for risk statistics, in (0, 1).
    #[inline]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Copy, Debug)]
pub struct SimulationConfigBuilder {
    n_paths: usize,
    n_steps: usize,
    seed: u64,
    confidence: f64,
}

impl Default for SimulationConfigBuilder {
    fn default() -> Self {
        Self {
            n_paths: 10_000,
            n_steps: 252,
            seed: 0,
            confidence: 0.95,
        }
    }
}

impl SimulationConfigBuilder {
    /// Number of Monte Carlo paths, in `[1, 10_000_000]`.
    #[must_use]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = n_paths;
        self
    }

    /// Number of time steps per path, in `[1, 10_000]`.
    #[must_use]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = n_steps;
        self
    }

    /// Base RNG seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Confidence level for risk statistics, strictly between 0 and 1.
    #[must_use]
    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Validate and build the configuration.
    pub fn build(self) -> Result<SimulationConfig, EngineError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(EngineError::InvalidPathCount(self.n_paths));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(EngineError::InvalidStepCount(self.n_steps));
        }
        if !self.confidence.is_finite() || self.confidence <= 0.0 || self.confidence >= 1.0 {
            return Err(EngineError::InvalidParameter {
                name: "confidence",
                value: self.confidence,
            });
        }
        Ok(SimulationConfig {
            n_paths: self.n_paths,
            n_steps: self.n_steps,
            seed: self.seed,
            confidence: self.confidence,
        })
    }
}
