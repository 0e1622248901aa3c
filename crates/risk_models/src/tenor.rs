//! Curve tenor labels with a year-fraction ordering.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::ModelError;

/// A curve tenor such as `"6m"`, `"5y"`, or a bare year fraction.
///
/// Tenors compare and sort by year fraction, with the normalised label as
/// a tiebreaker so equal maturities expressed differently still order
/// deterministically. Equality and hashing use the label alone, keeping
/// both consistent and `BTreeMap`-safe despite the float field.
///
/// # Examples
///
/// ```
/// use risk_models::Tenor;
///
/// let six_months: Tenor = "6m".parse().unwrap();
/// let five_years: Tenor = "5y".parse().unwrap();
/// assert!(six_months < five_years);
/// assert_eq!(six_months.years(), 0.5);
/// assert_eq!(five_years.to_string(), "5y");
/// ```
#[derive(Clone, Debug)]
pub struct Tenor {
    label: String,
    years: f64,
}

impl Tenor {
    /// Year fraction of the tenor.
    #[inline]
    pub fn years(&self) -> f64 {
        self.years
    }

    /// Normalised label, e.g. `"5y"`.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl FromStr for Tenor {
    type Err = ModelError;

    /// Parse `"<n>y"` (years), `"<n>m"` (months), or a bare number read as
    /// a year fraction. Case-insensitive; surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_ascii_lowercase();
        let invalid = || ModelError::InvalidTenor(s.to_string());

        let years = if let Some(n) = label.strip_suffix('y') {
            n.parse::<f64>().map_err(|_| invalid())?
        } else if let Some(n) = label.strip_suffix('m') {
            n.parse::<f64>().map_err(|_| invalid())? / 12.0
        } else {
            label.parse::<f64>().map_err(|_| invalid())?
        };

        if !years.is_finite() || years <= 0.0 {
            return Err(invalid());
        }
        Ok(Self { label, years })
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

impl PartialEq for Tenor {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for Tenor {}

impl Hash for Tenor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}

impl PartialOrd for Tenor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tenor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.years
            .total_cmp(&other.years)
            .then_with(|| self.label.cmp(&other.label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_years_and_months() {
        let t: Tenor = "10y".parse().unwrap();
        assert_eq!(t.years(), 10.0);
        let t: Tenor = "3M".parse().unwrap();
        assert_eq!(t.years(), 0.25);
        let t: Tenor = " 0.5 ".parse().unwrap();
        assert_eq!(t.years(), 0.5);
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "y", "5x", "abc", "-2y", "0y", "nan"] {
            assert!(
                bad.parse::<Tenor>().is_err(),
                "expected parse failure for {bad:?}"
            );
        }
    }

    #[test]
    fn orders_by_year_fraction() {
        let mut tenors: Vec<Tenor> = ["5y", "1m", "2y", "6m"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        tenors.sort();
        let labels: Vec<&str> = tenors.iter().map(Tenor::label).collect();
        assert_eq!(labels, ["1m", "6m", "2y", "5y"]);
    }

    #[test]
    fn display_round_trips() {
        for s in ["1m", "6m", "2y", "30y"] {
            let t: Tenor = s.parse().unwrap();
            assert_eq!(t.to_string(), s);
            let back: Tenor = t.to_string().parse().unwrap();
            assert_eq!(back, t);
        }
    }

    #[test]
    fn equality_is_label_based() {
        let a: Tenor = "12m".parse().unwrap();
        let b: Tenor = "1y".parse().unwrap();
        // Same maturity, different label: ordered deterministically, not equal.
        assert_ne!(a, b);
        assert_eq!(a.years(), b.years());
        assert_eq!(a.cmp(&b), std::cmp::Ordering::Less);
    }
}
