//! Dashboard engine: price history → timeframe scores → allocations.

use crate::core::session::SessionState;
use crate::models::instrument::{Instrument, MacroSeries};
use crate::models::market::MarketData;
use crate::models::score::{InstrumentScore, TimeframeSignal};
use crate::models::series::{pct_change, Observation, PriceSeries};
use crate::models::snapshot::{DashboardSnapshot, InstrumentCard, MacroReading, TimeframeBadge};
use crate::models::timeframe::TimeframeSet;
use crate::signals::aggregation::Aggregator;
use crate::signals::allocation::{normalize, AllocationResult, FULL_POOL};
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::debug;

/// Knobs exposed to the user on each refresh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParams {
    pub threshold_pct: f64,
    pub pool_pct: f64,
    pub equity_share_pct: f64,
}

impl Default for EngineParams {
    fn default() -> Self {
        Self {
            threshold_pct: crate::config::DEFAULT_THRESHOLD_PCT,
            pool_pct: FULL_POOL,
            equity_share_pct: 50.0,
        }
    }
}

/// Frame colour and translucent background for an aggregate score.
pub fn score_colors(score: f64) -> (&'static str, &'static str) {
    if score > 0.0 {
        ("green", "rgba(0,128,0,0.5)")
    } else if score < 0.0 {
        ("crimson", "rgba(220,20,60,0.5)")
    } else {
        ("gray", "rgba(128,128,128,0.5)")
    }
}

pub fn performance_color(delta_pct: f64) -> &'static str {
    if delta_pct >= 0.0 {
        "green"
    } else {
        "crimson"
    }
}

pub struct DashboardEngine {
    instruments: Vec<Instrument>,
    timeframes: TimeframeSet,
    macro_series: Vec<MacroSeries>,
}

impl DashboardEngine {
    pub fn new(
        instruments: Vec<Instrument>,
        timeframes: TimeframeSet,
        macro_series: Vec<MacroSeries>,
    ) -> Self {
        Self {
            instruments,
            timeframes,
            macro_series,
        }
    }

    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    pub fn timeframes(&self) -> &TimeframeSet {
        &self.timeframes
    }

    /// Score every instrument of the basket, keyed by instrument name.
    pub fn score_all(
        &self,
        prices: &BTreeMap<String, PriceSeries>,
        threshold_pct: f64,
    ) -> BTreeMap<String, InstrumentScore> {
        let empty = PriceSeries::empty();
        self.instruments
            .iter()
            .map(|instrument| {
                let series = prices.get(&instrument.name).unwrap_or(&empty);
                let score = Aggregator::aggregate(series, &self.timeframes, threshold_pct);
                (instrument.name.clone(), score)
            })
            .collect()
    }

    /// Score the basket and offer the score-driven recommendations to the
    /// session, which keeps them only when the user has not edited its own.
    pub fn recommend(
        &self,
        data: &MarketData,
        session: &mut SessionState,
        threshold_pct: f64,
    ) -> (BTreeMap<String, InstrumentScore>, AllocationResult) {
        let scores = self.score_all(&data.prices, threshold_pct);
        let raw_scores = raw_scores(&scores);

        let recommended = normalize(&raw_scores, Some(session.origin_weights()), FULL_POOL);
        debug!(
            shift = recommended.shift,
            fallback = recommended.fallback,
            threshold_pct = threshold_pct,
            "Computed recommendations"
        );

        session.record_threshold(threshold_pct);
        session.offer_recommendations(recommended.allocations.clone());
        (scores, recommended)
    }

    /// Recompute the whole dashboard from freshly loaded data.
    pub fn snapshot(
        &self,
        data: &MarketData,
        session: &mut SessionState,
        params: EngineParams,
    ) -> DashboardSnapshot {
        let (scores, recommended) = self.recommend(data, session, params.threshold_pct);
        let raw_scores = raw_scores(&scores);
        let dca_pool = params.pool_pct * params.equity_share_pct / 100.0;
        let dca = normalize(&raw_scores, None, dca_pool);

        let empty = PriceSeries::empty();
        let instruments = self
            .instruments
            .iter()
            .map(|instrument| {
                let name = &instrument.name;
                let series = data.series(name).unwrap_or(&empty);
                let raw_score = raw_scores.get(name).copied().unwrap_or(0.0);
                let delta_pct = pct_change(series);
                let (border, background) = score_colors(raw_score);

                InstrumentCard {
                    name: name.clone(),
                    ticker: instrument.ticker.clone(),
                    has_data: !series.is_empty(),
                    last_price: series.last_value(),
                    delta_pct,
                    performance_color: performance_color(delta_pct).to_string(),
                    raw_score,
                    adjusted_score: recommended.adjusted.get(name).copied().unwrap_or(0.0),
                    border_color: border.to_string(),
                    background_color: background.to_string(),
                    timeframes: scores.get(name).map(badges).unwrap_or_default(),
                    origin_pct: session.origin_weights().get(name).copied().unwrap_or(0.0),
                    recommended_pct: session.recommendations().get(name).copied().unwrap_or(0.0),
                    dca_allocation_pct: dca.allocations.get(name).copied().unwrap_or(0.0),
                    chart_window: session.chart_window(name).to_string(),
                }
            })
            .collect();

        let mut warnings = Vec::new();
        if session.origin_drift() {
            let total: f64 = session.origin_weights().values().sum();
            warnings.push(format!("Origin weights sum to {:.2}% instead of 100%", total));
        }
        if !data.macro_enabled {
            warnings.push("Macro indicators disabled: FRED_API_KEY is not configured".to_string());
        }

        DashboardSnapshot {
            generated_at: Utc::now(),
            threshold_pct: params.threshold_pct,
            pool_pct: params.pool_pct,
            equity_share_pct: params.equity_share_pct,
            shift: recommended.shift,
            recommendations_edited: session.recommendations_edited(),
            instruments,
            macro_enabled: data.macro_enabled,
            macro_indicators: self.macro_readings(&data.macro_data),
            warnings,
        }
    }

    /// Latest value of every configured macro series, `None` when unavailable.
    pub fn macro_readings(&self, macro_data: &BTreeMap<String, PriceSeries>) -> Vec<MacroReading> {
        self.macro_series
            .iter()
            .map(|series| {
                let last = macro_data.get(&series.label).and_then(PriceSeries::last);
                MacroReading {
                    label: series.label.clone(),
                    latest: last.map(|o| o.value),
                    date: last.map(|o| o.date),
                }
            })
            .collect()
    }

    /// Chart points for an instrument over the timeframe selected in the session.
    pub fn chart<'a>(
        &self,
        series: &'a PriceSeries,
        session: &SessionState,
        name: &str,
    ) -> (String, &'a [Observation]) {
        let label = session.chart_window(name).to_string();
        let window = self
            .timeframes
            .get(&label)
            .map(|t| t.window)
            .unwrap_or_else(|| self.timeframes.max_window());
        (label, series.tail(window))
    }
}

fn raw_scores(scores: &BTreeMap<String, InstrumentScore>) -> BTreeMap<String, f64> {
    scores
        .iter()
        .map(|(name, score)| (name.clone(), score.raw_score))
        .collect()
}

fn badges(score: &InstrumentScore) -> Vec<TimeframeBadge> {
    score
        .timeframes
        .iter()
        .map(|entry| {
            let (mean, diff) = match entry.signal {
                TimeframeSignal::Scored { mean, diff, .. } => (Some(mean), Some(diff)),
                TimeframeSignal::Insufficient => (None, None),
            };
            TimeframeBadge {
                label: entry.label.clone(),
                window: entry.window,
                score: entry.signal.score(),
                arrow: entry.signal.arrow().to_string(),
                color: entry.signal.color().to_string(),
                mean,
                diff,
            }
        })
        .collect()
}
