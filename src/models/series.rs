//! Time-indexed numeric series for prices and macro observations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Ascending, gap-free sequence of observations for one instrument or macro series.
///
/// Missing points (non-finite values) are dropped on construction, so every
/// value held here is usable by the lookback computations. A series is rebuilt
/// on each data refresh and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    observations: Vec<Observation>,
}

impl PriceSeries {
    pub fn new(observations: Vec<Observation>) -> Self {
        let mut observations: Vec<Observation> = observations
            .into_iter()
            .filter(|o| o.value.is_finite())
            .collect();
        observations.sort_by_key(|o| o.date);
        Self { observations }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a series from raw values, dating them one calendar day apart
    /// starting at `start`.
    pub fn from_values(start: NaiveDate, values: &[f64]) -> Self {
        let observations = values
            .iter()
            .zip(start.iter_days())
            .map(|(&value, date)| Observation::new(date, value))
            .collect();
        Self::new(observations)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.last().map(|o| o.value)
    }

    /// Trailing `count` observations (all of them when the series is shorter).
    pub fn tail(&self, count: usize) -> &[Observation] {
        let start = self.observations.len().saturating_sub(count);
        &self.observations[start..]
    }

    /// Arithmetic mean of the trailing `window` values, `None` when the series
    /// holds fewer than `window` points.
    pub fn trailing_mean(&self, window: usize) -> Option<f64> {
        if window == 0 || self.observations.len() < window {
            return None;
        }
        let sum: f64 = self.tail(window).iter().map(|o| o.value).sum();
        Some(sum / window as f64)
    }
}

/// Percentage change between the last two observations.
///
/// Returns `0.0` when fewer than two points are available.
pub fn pct_change(series: &PriceSeries) -> f64 {
    match series.tail(2) {
        [prev, last] => (last.value / prev.value - 1.0) * 100.0,
        _ => 0.0,
    }
}
