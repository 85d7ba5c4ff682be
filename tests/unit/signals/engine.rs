//! Unit tests for dashboard assembly

use chrono::NaiveDate;
use dca_dashboard::core::session::SessionState;
use dca_dashboard::models::instrument::{Instrument, MacroSeries};
use dca_dashboard::models::market::MarketData;
use dca_dashboard::models::series::PriceSeries;
use dca_dashboard::models::timeframe::{Timeframe, TimeframeSet};
use dca_dashboard::signals::engine::{score_colors, DashboardEngine, EngineParams};
use std::collections::BTreeMap;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 3).unwrap()
}

fn engine() -> DashboardEngine {
    DashboardEngine::new(
        vec![
            Instrument::new("Cheap", "CHP"),
            Instrument::new("Pricey", "PRC"),
            Instrument::new("Missing", "MIS"),
        ],
        TimeframeSet::new(vec![Timeframe::new("Short", 2), Timeframe::new("Long", 4)]),
        vec![MacroSeries::new("Rate", "RATE"), MacroSeries::new("CPI", "CPI")],
    )
}

fn session(engine: &DashboardEngine) -> SessionState {
    SessionState::new(
        engine.instruments().iter().map(|i| i.name.clone()).collect(),
        "Long",
    )
}

fn market() -> MarketData {
    let mut prices = BTreeMap::new();
    prices.insert(
        "Cheap".to_string(),
        PriceSeries::from_values(start(), &[100.0, 100.0, 100.0, 70.0]),
    );
    prices.insert(
        "Pricey".to_string(),
        PriceSeries::from_values(start(), &[100.0, 100.0, 100.0, 130.0]),
    );
    prices.insert("Missing".to_string(), PriceSeries::empty());

    let mut macro_data = BTreeMap::new();
    macro_data.insert(
        "Rate".to_string(),
        PriceSeries::from_values(start(), &[5.25, 5.5]),
    );
    MarketData::new(prices, macro_data, true)
}

#[test]
fn test_snapshot_ranks_cheap_instrument_first() {
    let engine = engine();
    let mut session = session(&engine);
    let snapshot = engine.snapshot(&market(), &mut session, EngineParams::default());

    let cheap = snapshot.card("Cheap").unwrap();
    let pricey = snapshot.card("Pricey").unwrap();
    let missing = snapshot.card("Missing").unwrap();

    assert_eq!(cheap.raw_score, 2.0);
    assert_eq!(pricey.raw_score, -2.0);
    assert_eq!(missing.raw_score, 0.0);
    assert_eq!(snapshot.shift, 2.0);

    assert_eq!(pricey.adjusted_score, 0.0);
    assert_eq!(cheap.adjusted_score, 4.0);
    assert_eq!(missing.adjusted_score, 2.0);

    assert!(cheap.recommended_pct > missing.recommended_pct);
    assert_eq!(pricey.recommended_pct, 0.0);

    let reco_total: f64 = snapshot.instruments.iter().map(|c| c.recommended_pct).sum();
    assert!((reco_total - 100.0).abs() < 1e-6);
    let dca_total: f64 = snapshot.instruments.iter().map(|c| c.dca_allocation_pct).sum();
    assert!((dca_total - 50.0).abs() < 1e-6);
}

#[test]
fn test_snapshot_cards_carry_display_data() {
    let engine = engine();
    let mut session = session(&engine);
    let snapshot = engine.snapshot(&market(), &mut session, EngineParams::default());

    let cheap = snapshot.card("Cheap").unwrap();
    assert_eq!(cheap.last_price, Some(70.0));
    assert!((cheap.delta_pct + 30.0).abs() < 1e-9);
    assert_eq!(cheap.performance_color, "crimson");
    assert_eq!(cheap.border_color, "green");
    assert_eq!(cheap.timeframes.len(), 2);
    assert_eq!(cheap.timeframes[0].arrow, "↑");
    assert_eq!(cheap.chart_window, "Long");

    let missing = snapshot.card("Missing").unwrap();
    assert!(!missing.has_data);
    assert_eq!(missing.last_price, None);
    assert_eq!(missing.border_color, "gray");
    assert!(missing.timeframes.iter().all(|b| b.score.is_none() && b.arrow == "N/A"));
}

#[test]
fn test_macro_readings_report_latest_or_missing() {
    let engine = engine();
    let mut session = session(&engine);
    let snapshot = engine.snapshot(&market(), &mut session, EngineParams::default());

    assert_eq!(snapshot.macro_indicators.len(), 2);
    assert_eq!(snapshot.macro_indicators[0].label, "Rate");
    assert_eq!(snapshot.macro_indicators[0].latest, Some(5.5));
    assert_eq!(snapshot.macro_indicators[1].latest, None);
}

#[test]
fn test_warnings_for_drift_and_disabled_macro() {
    let engine = engine();
    let mut session = session(&engine);
    session.set_origin_weight("Cheap", 90.0).unwrap();

    let mut data = market();
    data.macro_enabled = false;
    let snapshot = engine.snapshot(&data, &mut session, EngineParams::default());

    assert!(!snapshot.macro_enabled);
    assert_eq!(snapshot.warnings.len(), 2);
    assert!(snapshot.warnings[0].contains("Origin weights"));
}

#[test]
fn test_edited_recommendations_survive_recompute() {
    let engine = engine();
    let mut session = session(&engine);
    engine.snapshot(&market(), &mut session, EngineParams::default());
    session.edit_recommendation("Pricey", 50.0).unwrap();

    let snapshot = engine.snapshot(&market(), &mut session, EngineParams::default());
    assert!(snapshot.recommendations_edited);
    assert!((snapshot.card("Pricey").unwrap().recommended_pct - 50.0).abs() < 1e-9);
}

#[test]
fn test_recommend_replaces_seeded_split_with_scores() {
    let engine = engine();
    let mut session = session(&engine);
    assert_eq!(session.threshold_pct(), None);

    let (scores, recommended) = engine.recommend(&market(), &mut session, 10.0);
    assert_eq!(scores["Cheap"].raw_score, 2.0);
    assert_eq!(session.threshold_pct(), Some(10.0));
    assert_eq!(session.recommendations(), &recommended.allocations);
    assert_eq!(session.recommendations()["Pricey"], 0.0);

    // An edit now starts from the score-driven split
    let edited = session.edit_recommendation("Missing", 0.0).unwrap().clone();
    assert_eq!(edited["Pricey"], 0.0);
    assert!((edited["Cheap"] - 100.0).abs() < 1e-9);
}

#[test]
fn test_chart_uses_selected_window() {
    let engine = engine();
    let mut session = session(&engine);
    let data = market();
    let series = data.series("Cheap").unwrap();

    let (label, points) = engine.chart(series, &session, "Cheap");
    assert_eq!(label, "Long");
    assert_eq!(points.len(), 4);

    session
        .select_chart_window("Cheap", "Short", engine.timeframes())
        .unwrap();
    let (label, points) = engine.chart(series, &session, "Cheap");
    assert_eq!(label, "Short");
    assert_eq!(points.len(), 2);
    assert_eq!(points[1].value, 70.0);
}

#[test]
fn test_score_colors() {
    assert_eq!(score_colors(1.5).0, "green");
    assert_eq!(score_colors(-0.5).0, "crimson");
    assert_eq!(score_colors(0.0).0, "gray");
}
