//! # Risk Models (L2: Stochastic Path Generators)
//!
//! Path-level simulation models built on [`risk_core`]:
//!
//! - Geometric Brownian motion with optional Heston-style stochastic
//!   variance ([`gbm`])
//! - Single-factor Vasicek/Merton credit portfolio model ([`credit`])
//! - Correlated multi-tenor mean-reverting rate model ([`rates`])
//! - Tenor parsing and ordering ([`tenor`])
//! - Analytic Black-Scholes reference pricing ([`analytical`])
//!
//! All parameter structs are immutable after construction and validated up
//! front; simulation methods take an explicit [`risk_core::SimRng`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod analytical;
pub mod credit;
pub mod error;
pub mod gbm;
pub mod rates;
pub mod tenor;

pub use analytical::{black_scholes_greeks, black_scholes_price, BlackScholesGreeks, OptionKind};
pub use credit::{CreditParams, CreditPortfolio, CreditScenario};
pub use error::ModelError;
pub use gbm::{GbmParams, PricePath, StochVolParams};
pub use rates::{RateMarketGenerator, RateModelParams, RatePath};
pub use tenor::Tenor;
