//! Closed-form Black-Scholes pricing and greeks.
//!
//! Used by the Monte Carlo engine as an analytic cross-check for European
//! options; never on the simulation hot path.

use risk_core::math::distributions::{norm_cdf, norm_pdf};

/// Call or put.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionKind {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionKind {
    /// Intrinsic value at the given spot.
    #[inline]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionKind::Call => (spot - strike).max(0.0),
            OptionKind::Put => (strike - spot).max(0.0),
        }
    }
}

/// Black-Scholes sensitivities.
///
/// Vega is quoted per one percentage point of volatility and theta per
/// calendar day, matching desk conventions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlackScholesGreeks {
    /// dV/dS.
    pub delta: f64,
    /// d²V/dS².
    pub gamma: f64,
    /// dV/dσ per 1% volatility move.
    pub vega: f64,
    /// dV/dt per calendar day.
    pub theta: f64,
}

/// Black-Scholes price of a European option.
///
/// `maturity <= 0` or `volatility <= 0` short-circuits to the
/// (forward-adjusted, undiscounted at zero maturity) intrinsic value.
///
/// # Examples
///
/// ```
/// use risk_models::{black_scholes_price, OptionKind};
///
/// let call = black_scholes_price(100.0, 100.0, 1.0, 0.05, 0.0, 0.2, OptionKind::Call);
/// assert!((call - 10.4506).abs() < 1e-3);
/// ```
pub fn black_scholes_price(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
    kind: OptionKind,
) -> f64 {
    if maturity <= 0.0 {
        return kind.intrinsic(spot, strike);
    }
    if volatility <= 0.0 {
        let forward = spot * ((rate - dividend_yield) * maturity).exp();
        return (-rate * maturity).exp() * kind.intrinsic(forward, strike);
    }

    let (d1, d2) = d1_d2(spot, strike, maturity, rate, dividend_yield, volatility);
    let df_div = (-dividend_yield * maturity).exp();
    let df_rate = (-rate * maturity).exp();

    match kind {
        OptionKind::Call => spot * df_div * norm_cdf(d1) - strike * df_rate * norm_cdf(d2),
        OptionKind::Put => strike * df_rate * norm_cdf(-d2) - spot * df_div * norm_cdf(-d1),
    }
}

/// Black-Scholes greeks of a European option.
///
/// Degenerate inputs (`maturity <= 0` or `volatility <= 0`) return a step
/// delta at the strike with all other sensitivities zero.
pub fn black_scholes_greeks(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
    kind: OptionKind,
) -> BlackScholesGreeks {
    if maturity <= 0.0 || volatility <= 0.0 {
        let in_the_money = match kind {
            OptionKind::Call => spot > strike,
            OptionKind::Put => spot < strike,
        };
        let delta = match (kind, in_the_money) {
            (OptionKind::Call, true) => 1.0,
            (OptionKind::Put, true) => -1.0,
            (_, false) => 0.0,
        };
        return BlackScholesGreeks {
            delta,
            gamma: 0.0,
            vega: 0.0,
            theta: 0.0,
        };
    }

    let (d1, d2) = d1_d2(spot, strike, maturity, rate, dividend_yield, volatility);
    let df_div = (-dividend_yield * maturity).exp();
    let df_rate = (-rate * maturity).exp();
    let sqrt_t = maturity.sqrt();
    let pdf_d1 = norm_pdf(d1);

    let delta = match kind {
        OptionKind::Call => df_div * norm_cdf(d1),
        OptionKind::Put => df_div * (norm_cdf(d1) - 1.0),
    };
    let gamma = df_div * pdf_d1 / (spot * volatility * sqrt_t);
    let vega = spot * df_div * pdf_d1 * sqrt_t / 100.0;

    let decay = -spot * df_div * pdf_d1 * volatility / (2.0 * sqrt_t);
    let theta_year = match kind {
        OptionKind::Call => {
            decay - rate * strike * df_rate * norm_cdf(d2) + dividend_yield * spot * df_div * norm_cdf(d1)
        }
        OptionKind::Put => {
            decay + rate * strike * df_rate * norm_cdf(-d2)
                - dividend_yield * spot * df_div * norm_cdf(-d1)
        }
    };

    BlackScholesGreeks {
        delta,
        gamma,
        vega,
        theta: theta_year / 365.0,
    }
}

#[inline]
fn d1_d2(
    spot: f64,
    strike: f64,
    maturity: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
) -> (f64, f64) {
    let vol_sqrt_t = volatility * maturity.sqrt();
    let d1 = ((spot / strike).ln()
        + (rate - dividend_yield + 0.5 * volatility * volatility) * maturity)
        / vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn atm_call_benchmark() {
        let price = black_scholes_price(100.0, 100.0, 1.0, 0.05, 0.0, 0.2, OptionKind::Call);
        assert_relative_eq!(price, 10.4506, epsilon = 1e-3);
    }

    #[test]
    fn put_call_parity() {
        let (s, k, t, r, q, sigma) = (105.0, 100.0, 0.75, 0.03, 0.01, 0.25);
        let call = black_scholes_price(s, k, t, r, q, sigma, OptionKind::Call);
        let put = black_scholes_price(s, k, t, r, q, sigma, OptionKind::Put);
        let parity = s * (-q * t).exp() - k * (-r * t).exp();
        assert_relative_eq!(call - put, parity, epsilon = 1e-6);
    }

    #[test]
    fn zero_maturity_is_intrinsic() {
        assert_eq!(
            black_scholes_price(110.0, 100.0, 0.0, 0.05, 0.0, 0.2, OptionKind::Call),
            10.0
        );
        assert_eq!(
            black_scholes_price(110.0, 100.0, -1.0, 0.05, 0.0, 0.2, OptionKind::Put),
            0.0
        );
    }

    #[test]
    fn zero_volatility_is_discounted_forward_intrinsic() {
        let price = black_scholes_price(100.0, 90.0, 1.0, 0.05, 0.0, 0.0, OptionKind::Call);
        let forward = 100.0 * 0.05f64.exp();
        assert_relative_eq!(price, (-0.05f64).exp() * (forward - 90.0), epsilon = 1e-10);
    }

    #[test]
    fn greeks_benchmark_values() {
        let greeks = black_scholes_greeks(100.0, 100.0, 1.0, 0.05, 0.0, 0.2, OptionKind::Call);
        assert_relative_eq!(greeks.delta, 0.6368, epsilon = 1e-3);
        assert_relative_eq!(greeks.gamma, 0.01876, epsilon = 1e-4);
        assert_relative_eq!(greeks.vega, 0.3752, epsilon = 1e-3);
        assert!(greeks.theta < 0.0);
    }

    #[test]
    fn call_and_put_deltas_differ_by_dividend_discount() {
        let (s, k, t, r, q, sigma) = (100.0, 95.0, 0.5, 0.04, 0.02, 0.3);
        let call = black_scholes_greeks(s, k, t, r, q, sigma, OptionKind::Call);
        let put = black_scholes_greeks(s, k, t, r, q, sigma, OptionKind::Put);
        assert_relative_eq!(call.delta - put.delta, (-q * t).exp(), epsilon = 1e-10);
        assert_relative_eq!(call.gamma, put.gamma, epsilon = 1e-12);
        assert_relative_eq!(call.vega, put.vega, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_greeks_are_step_functions() {
        let greeks = black_scholes_greeks(110.0, 100.0, 0.0, 0.05, 0.0, 0.2, OptionKind::Call);
        assert_eq!(greeks.delta, 1.0);
        assert_eq!(greeks.gamma, 0.0);
        let greeks = black_scholes_greeks(90.0, 100.0, 0.0, 0.05, 0.0, 0.2, OptionKind::Put);
        assert_eq!(greeks.delta, -1.0);
    }
}
