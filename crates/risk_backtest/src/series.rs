//! Date-indexed observation series.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// A date-indexed series of observations (returns or VaR estimates).
///
/// Dates are unique and iterate in calendar order. Inserting a date twice
/// replaces the earlier value.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use risk_backtest::ReturnSeries;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
/// let series = ReturnSeries::from_pairs([(day(2), -0.01), (day(1), 0.02)]);
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.iter().next(), Some((&day(1), &0.02)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReturnSeries {
    observations: BTreeMap<NaiveDate, f64>,
}

impl ReturnSeries {
    /// Empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Series from date/value pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        Self {
            observations: pairs.into_iter().collect(),
        }
    }

    /// Insert or replace the observation for `date`.
    pub fn insert(&mut self, date: NaiveDate, value: f64) {
        self.observations.insert(date, value);
    }

    /// Observation on `date`, if present.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.observations.get(&date).copied()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &f64)> {
        self.observations.iter()
    }

    /// Values on the date intersection of two series, in calendar order.
    pub(crate) fn aligned_with(&self, other: &Self) -> Vec<(f64, f64)> {
        self.observations
            .iter()
            .filter_map(|(date, &a)| other.observations.get(date).map(|&b| (a, b)))
            .collect()
    }
}
