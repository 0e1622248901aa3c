//! Payoff evaluation for simulated price paths.

use risk_models::PricePath;

use crate::instruments::{BarrierDirection, BarrierKnock, ExerciseStyle, OptionContract};

/// One path's contribution to the Monte Carlo estimate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioObservation {
    /// Terminal asset price on the path.
    pub terminal_price: f64,
    /// Signed payoff at maturity.
    pub payoff: f64,
    /// Signed payoff discounted to today.
    pub present_value: f64,
}

/// Evaluate a contract against one simulated path.
///
/// The payoff and present value carry the position sign: short positions
/// see the negated long payoff. Discounting uses
/// `exp(-rate * maturity)` with the contract's own maturity.
pub fn evaluate(path: &PricePath, contract: &OptionContract, rate: f64) -> ScenarioObservation {
    let terminal_price = path.terminal();

    let raw_payoff = match contract.style {
        ExerciseStyle::European => contract.kind.intrinsic(terminal_price, contract.strike),
        ExerciseStyle::Asian => contract.kind.intrinsic(path.mean_price(), contract.strike),
        ExerciseStyle::Barrier {
            level,
            direction,
            knock,
        } => {
            let hit = match direction {
                BarrierDirection::Up => path.touched_at_or_above(level),
                BarrierDirection::Down => path.touched_at_or_below(level),
            };
            let active = match knock {
                BarrierKnock::In => hit,
                BarrierKnock::Out => !hit,
            };
            if active {
                contract.kind.intrinsic(terminal_price, contract.strike)
            } else {
                0.0
            }
        }
    };

    let sign = contract.position.sign();
    let payoff = sign * raw_payoff;
    let present_value = payoff * (-rate * contract.maturity).exp();

    ScenarioObservation {
        terminal_price,
        payoff,
        present_value,
    }
}
