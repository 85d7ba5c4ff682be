//! Test utilities for API server integration tests

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::NaiveDate;
use dca_dashboard::config::DashboardConfig;
use dca_dashboard::core::cache::DataCache;
use dca_dashboard::core::http::{create_router, AppState};
use dca_dashboard::metrics::Metrics;
use dca_dashboard::models::instrument::{Instrument, MacroSeries};
use dca_dashboard::models::series::PriceSeries;
use dca_dashboard::models::timeframe::{Timeframe, TimeframeSet};
use dca_dashboard::services::{MacroDataProvider, MarketDataProvider, ProviderError};
use std::sync::Arc;

/// Deterministic prices: `ALPHA` trades 20% below its yearly mean, `BETA`
/// sits exactly on it and `GAMMA` is unavailable.
pub struct StaticMarket;

#[async_trait]
impl MarketDataProvider for StaticMarket {
    async fn fetch_prices(
        &self,
        ticker: &str,
        start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<PriceSeries, ProviderError> {
        match ticker {
            "ALPHA" => {
                let mut values = vec![100.0; 251];
                // Mean of 252 points with the last one at x: (25100 + x) / 252.
                // x = 0.8 * mean  =>  x = 25100 * 0.8 / (252 - 0.8)
                values.push(25100.0 * 0.8 / 251.2);
                Ok(PriceSeries::from_values(start, &values))
            }
            "BETA" => Ok(PriceSeries::from_values(start, &[50.0; 252])),
            _ => Err(ProviderError::Payload(format!("unknown ticker {}", ticker))),
        }
    }
}

pub struct StaticMacro;

#[async_trait]
impl MacroDataProvider for StaticMacro {
    async fn fetch_series(
        &self,
        _code: &str,
        start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<PriceSeries, ProviderError> {
        Ok(PriceSeries::from_values(start, &[4.0, 4.25]))
    }
}

pub fn test_config() -> DashboardConfig {
    DashboardConfig {
        instruments: vec![
            Instrument::new("Alpha", "ALPHA"),
            Instrument::new("Beta", "BETA"),
            Instrument::new("Gamma", "GAMMA"),
        ],
        timeframes: TimeframeSet::new(vec![
            Timeframe::new("Weekly", 5),
            Timeframe::new("Yearly", 252),
            Timeframe::new("5 Years", 1260),
        ]),
        macro_series: vec![MacroSeries::new("Fed Funds Rate", "FEDFUNDS")],
        ..DashboardConfig::default()
    }
}

/// Test helper for API server integration tests
#[allow(dead_code)]
pub struct TestApiServer {
    pub server: TestServer,
    pub metrics: Arc<Metrics>,
    pub state: AppState,
}

impl TestApiServer {
    pub async fn new() -> Self {
        Self::with_macro(true).await
    }

    pub async fn with_macro(macro_enabled: bool) -> Self {
        let config = test_config();
        let metrics = Arc::new(Metrics::new().expect("metrics initialization"));
        let macro_provider: Option<Arc<dyn MacroDataProvider>> = if macro_enabled {
            Some(Arc::new(StaticMacro))
        } else {
            None
        };
        let cache = DataCache::new(
            Arc::new(StaticMarket),
            macro_provider,
            config.instruments.clone(),
            config.macro_series.clone(),
            config.timeframes.fetch_range_days(),
        )
        .with_metrics(metrics.clone())
        .with_end_date(NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());

        let state = AppState::new(config, cache, metrics.clone());
        let app = create_router(state.clone());
        let server = TestServer::new(app).expect("start test server");

        Self {
            server,
            metrics,
            state,
        }
    }
}
