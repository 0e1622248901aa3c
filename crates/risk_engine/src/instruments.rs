//! Instrument terms as tagged variants.
//!
//! Every contract attribute is an enum checked at construction; there is
//! no string dispatch between the instrument description and the payoff
//! code.

use risk_models::OptionKind;

use crate::error::EngineError;

/// Direction a barrier must be crossed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BarrierDirection {
    /// Barrier above the spot; hit when the path reaches or exceeds it.
    Up,
    /// Barrier below the spot; hit when the path reaches or falls below it.
    Down,
}

/// Whether a barrier activates or extinguishes the option.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BarrierKnock {
    /// Pays the vanilla payoff only if the barrier was hit.
    In,
    /// Pays the vanilla payoff only if the barrier was never hit.
    Out,
}

/// How the option's payoff observes the path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExerciseStyle {
    /// Payoff on the terminal price only.
    European,
    /// Payoff on the arithmetic mean of the whole path.
    Asian,
    /// European payoff gated by a barrier condition over the whole path.
    Barrier {
        /// Barrier level.
        level: f64,
        /// Crossing direction.
        direction: BarrierDirection,
        /// Knock-in or knock-out.
        knock: BarrierKnock,
    },
}

/// Long or short the contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PositionSide {
    /// Holds the option; receives the payoff.
    Long,
    /// Wrote the option; pays the payoff.
    Short,
}

impl PositionSide {
    /// +1 for long, -1 for short.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            PositionSide::Long => 1.0,
            PositionSide::Short => -1.0,
        }
    }
}

/// A validated option contract.
///
/// # Examples
///
/// ```
/// use risk_engine::{ExerciseStyle, OptionContract, PositionSide};
/// use risk_models::OptionKind;
///
/// let contract = OptionContract::new(
///     OptionKind::Call,
///     ExerciseStyle::European,
///     100.0,
///     1.0,
///     PositionSide::Long,
/// )
/// .unwrap();
/// assert_eq!(contract.strike, 100.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OptionContract {
    /// Call or put.
    pub kind: OptionKind,
    /// Path observation style.
    pub style: ExerciseStyle,
    /// Strike price.
    pub strike: f64,
    /// Time to maturity in years.
    pub maturity: f64,
    /// Long or short.
    pub position: PositionSide,
}

impl OptionContract {
    /// Validated constructor.
    ///
    /// Requires `strike > 0`, finite maturity, and a positive barrier
    /// level for barrier styles.
    pub fn new(
        kind: OptionKind,
        style: ExerciseStyle,
        strike: f64,
        maturity: f64,
        position: PositionSide,
    ) -> Result<Self, EngineError> {
        if !strike.is_finite() || strike <= 0.0 {
            return Err(EngineError::InvalidParameter {
                name: "strike",
                value: strike,
            });
        }
        if !maturity.is_finite() {
            return Err(EngineError::InvalidParameter {
                name: "maturity",
                value: maturity,
            });
        }
        if let ExerciseStyle::Barrier { level, .. } = style {
            if !level.is_finite() || level <= 0.0 {
                return Err(EngineError::InvalidParameter {
                    name: "barrier_level",
                    value: level,
                });
            }
        }
        Ok(Self {
            kind,
            style,
            strike,
            maturity,
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_strike() {
        let result = OptionContract::new(
            OptionKind::Call,
            ExerciseStyle::European,
            0.0,
            1.0,
            PositionSide::Long,
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidParameter { name: "strike", .. })
        ));
    }

    #[test]
    fn rejects_bad_barrier_level() {
        let result = OptionContract::new(
            OptionKind::Put,
            ExerciseStyle::Barrier {
                level: -5.0,
                direction: BarrierDirection::Down,
                knock: BarrierKnock::Out,
            },
            100.0,
            1.0,
            PositionSide::Long,
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidParameter {
                name: "barrier_level",
                ..
            })
        ));
    }

    #[test]
    fn position_signs() {
        assert_eq!(PositionSide::Long.sign(), 1.0);
        assert_eq!(PositionSide::Short.sign(), -1.0);
    }
}
