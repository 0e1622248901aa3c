//! # Risk Engine (L3: Simulation and Aggregation)
//!
//! Monte Carlo pricing and risk aggregation on top of [`risk_models`]:
//!
//! - Instrument terms as tagged variants ([`instruments`])
//! - Path payoff evaluation ([`payoff`])
//! - A rayon-parallel option engine with reproducible per-path RNG
//!   streams ([`engine`])
//! - Empirical VaR / expected-shortfall statistics ([`measures`])
//! - Convergence diagnostics with incremental batching ([`convergence`])
//! - DV01 / partial-01 rate risk over simulated curves ([`dv01`])
//!
//! Enable the `serde` feature to serialise result types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod convergence;
pub mod dv01;
pub mod engine;
pub mod error;
pub mod instruments;
pub mod measures;
pub mod payoff;

pub use config::{SimulationConfig, SimulationConfigBuilder};
pub use convergence::{ConvergencePoint, ConvergenceStudy};
pub use dv01::{BondPosition, Dv01Analyzer};
pub use engine::{McOptionEngine, SimulationSummary};
pub use error::EngineError;
pub use instruments::{
    BarrierDirection, BarrierKnock, ExerciseStyle, OptionContract, PositionSide,
};
pub use measures::RiskStatistics;
pub use payoff::{evaluate, ScenarioObservation};
