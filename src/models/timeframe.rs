//! Lookback windows used for moving-average deviations

use serde::{Deserialize, Serialize};

/// Trading days per calendar year, used to size the fetch range.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Named trailing window, counted in trading-day observations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeframe {
    pub label: String,
    pub window: usize,
}

impl Timeframe {
    pub fn new(label: impl Into<String>, window: usize) -> Self {
        Self {
            label: label.into(),
            window,
        }
    }
}

/// Ordered, immutable set of timeframes configured once per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeframeSet {
    timeframes: Vec<Timeframe>,
}

impl TimeframeSet {
    pub fn new(timeframes: Vec<Timeframe>) -> Self {
        Self { timeframes }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Timeframe> {
        self.timeframes.iter()
    }

    pub fn len(&self) -> usize {
        self.timeframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timeframes.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&Timeframe> {
        self.timeframes.iter().find(|t| t.label == label)
    }

    pub fn max_window(&self) -> usize {
        self.timeframes.iter().map(|t| t.window).max().unwrap_or(0)
    }

    /// Calendar days of history to request so the longest window is covered,
    /// with a 10% margin for holidays.
    pub fn fetch_range_days(&self) -> i64 {
        let years = self.max_window() as f64 / TRADING_DAYS_PER_YEAR;
        (years * 365.0 * 1.1).ceil() as i64
    }
}

impl Default for TimeframeSet {
    fn default() -> Self {
        Self::new(vec![
            Timeframe::new("Weekly", 5),
            Timeframe::new("Monthly", 21),
            Timeframe::new("Quarterly", 63),
            Timeframe::new("Yearly", 252),
            Timeframe::new("5 Years", 1260),
        ])
    }
}
