//! Dashboard payload handed to the presentation layer

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeBadge {
    pub label: String,
    pub window: usize,
    /// `None` when the instrument lacks enough history for this window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    pub arrow: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentCard {
    pub name: String,
    pub ticker: String,
    pub has_data: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_price: Option<f64>,
    pub delta_pct: f64,
    pub performance_color: String,
    pub raw_score: f64,
    pub adjusted_score: f64,
    pub border_color: String,
    pub background_color: String,
    pub timeframes: Vec<TimeframeBadge>,
    pub origin_pct: f64,
    pub recommended_pct: f64,
    pub dca_allocation_pct: f64,
    pub chart_window: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroReading {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub threshold_pct: f64,
    pub pool_pct: f64,
    pub equity_share_pct: f64,
    pub shift: f64,
    pub recommendations_edited: bool,
    pub instruments: Vec<InstrumentCard>,
    pub macro_enabled: bool,
    pub macro_indicators: Vec<MacroReading>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<String>,
}

impl DashboardSnapshot {
    pub fn card(&self, name: &str) -> Option<&InstrumentCard> {
        self.instruments.iter().find(|c| c.name == name)
    }
}
