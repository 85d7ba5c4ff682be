//! Deviation tiers and per-instrument score records

use serde::{Deserialize, Serialize};

/// Discretized deviation of a price from its moving average.
///
/// Lower prices relative to history score positively, so `StrongBuy`
/// carries `+1.0` and `StrongReduce` carries `-1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationTier {
    StrongBuy,
    Buy,
    Neutral,
    Reduce,
    StrongReduce,
}

impl DeviationTier {
    pub fn score(self) -> f64 {
        match self {
            DeviationTier::StrongBuy => 1.0,
            DeviationTier::Buy => 0.5,
            DeviationTier::Neutral => 0.0,
            DeviationTier::Reduce => -0.5,
            DeviationTier::StrongReduce => -1.0,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            DeviationTier::StrongBuy => "↑",
            DeviationTier::Buy => "↗",
            DeviationTier::Neutral => "→",
            DeviationTier::Reduce => "↘",
            DeviationTier::StrongReduce => "↓",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            DeviationTier::StrongBuy => "#66BB6A",
            DeviationTier::Buy => "#A5D6A7",
            DeviationTier::Neutral => "#90CAF9",
            DeviationTier::Reduce => "#FFB74D",
            DeviationTier::StrongReduce => "#E57373",
        }
    }
}

pub const INSUFFICIENT_ARROW: &str = "N/A";
pub const INSUFFICIENT_COLOR: &str = "#9E9E9E";

/// Outcome of scoring one timeframe for one instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TimeframeSignal {
    Scored {
        tier: DeviationTier,
        mean: f64,
        diff: f64,
    },
    /// Fewer points than the window; excluded from the raw score.
    Insufficient,
}

impl TimeframeSignal {
    /// Contribution to the raw score, `None` when the timeframe is not eligible.
    pub fn score(&self) -> Option<f64> {
        match self {
            TimeframeSignal::Scored { tier, .. } => Some(tier.score()),
            TimeframeSignal::Insufficient => None,
        }
    }

    pub fn tier(&self) -> Option<DeviationTier> {
        match self {
            TimeframeSignal::Scored { tier, .. } => Some(*tier),
            TimeframeSignal::Insufficient => None,
        }
    }

    pub fn arrow(&self) -> &'static str {
        self.tier().map_or(INSUFFICIENT_ARROW, DeviationTier::arrow)
    }

    pub fn color(&self) -> &'static str {
        self.tier().map_or(INSUFFICIENT_COLOR, DeviationTier::color)
    }
}

/// Signal for one labelled timeframe, kept in configuration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeScore {
    pub label: String,
    pub window: usize,
    pub signal: TimeframeSignal,
}

/// Aggregated score of one instrument over every configured timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentScore {
    pub raw_score: f64,
    pub timeframes: Vec<TimeframeScore>,
}

impl InstrumentScore {
    pub fn get(&self, label: &str) -> Option<&TimeframeSignal> {
        self.timeframes
            .iter()
            .find(|t| t.label == label)
            .map(|t| &t.signal)
    }

    pub fn eligible_count(&self) -> usize {
        self.timeframes
            .iter()
            .filter(|t| t.signal.score().is_some())
            .count()
    }
}
