//! Per-instrument aggregation of timeframe deviation scores

use crate::models::score::{InstrumentScore, TimeframeScore, TimeframeSignal};
use crate::models::series::PriceSeries;
use crate::models::timeframe::TimeframeSet;
use crate::signals::scoring::score_against_mean;

/// Aggregate deviation scores across timeframes for one instrument
pub struct Aggregator;

impl Aggregator {
    /// Score every timeframe and sum the eligible ones into the raw score.
    ///
    /// A timeframe whose window exceeds the available history is marked
    /// [`TimeframeSignal::Insufficient`] and left out of the sum, so short
    /// series are compared on fewer timeframes rather than penalized.
    pub fn aggregate(
        series: &PriceSeries,
        timeframes: &TimeframeSet,
        threshold_pct: f64,
    ) -> InstrumentScore {
        let last = series.last_value();
        let mut raw_score = 0.0;

        let scores = timeframes
            .iter()
            .map(|timeframe| {
                let scored = match (last, series.trailing_mean(timeframe.window)) {
                    (Some(last), Some(mean)) => score_against_mean(last, mean, threshold_pct)
                        .map(|(tier, diff)| TimeframeSignal::Scored { tier, mean, diff }),
                    _ => None,
                };
                // A zero mean cannot produce a relative deviation
                let signal = scored.unwrap_or(TimeframeSignal::Insufficient);
                if let Some(score) = signal.score() {
                    raw_score += score;
                }
                TimeframeScore {
                    label: timeframe.label.clone(),
                    window: timeframe.window,
                    signal,
                }
            })
            .collect();

        InstrumentScore {
            raw_score,
            timeframes: scores,
        }
    }
}
