//! Cached market data, reloaded only on explicit refresh

use crate::config::MACRO_HISTORY_DAYS;
use crate::metrics::Metrics;
use crate::models::instrument::{Instrument, MacroSeries};
use crate::models::market::MarketData;
use crate::services::macro_data::{load_macro, MacroDataProvider};
use crate::services::market_data::{load_prices, MarketDataProvider};
use chrono::{Duration, NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Holds the last loaded [`MarketData`] until a refresh is requested.
pub struct DataCache {
    market: Arc<dyn MarketDataProvider>,
    macro_provider: Option<Arc<dyn MacroDataProvider>>,
    instruments: Vec<Instrument>,
    macro_series: Vec<MacroSeries>,
    price_range_days: i64,
    metrics: Option<Arc<Metrics>>,
    end_date: Option<NaiveDate>,
    current: RwLock<Option<Arc<MarketData>>>,
}

impl DataCache {
    pub fn new(
        market: Arc<dyn MarketDataProvider>,
        macro_provider: Option<Arc<dyn MacroDataProvider>>,
        instruments: Vec<Instrument>,
        macro_series: Vec<MacroSeries>,
        price_range_days: i64,
    ) -> Self {
        Self {
            market,
            macro_provider,
            instruments,
            macro_series,
            price_range_days,
            metrics: None,
            end_date: None,
            current: RwLock::new(None),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Pin the end of the requested range instead of using today.
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    fn end_date(&self) -> NaiveDate {
        self.end_date.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Cached data, loading it first when the cache is empty.
    pub async fn get(&self) -> Arc<MarketData> {
        if let Some(data) = self.current.read().await.as_ref() {
            return data.clone();
        }

        let mut current = self.current.write().await;
        // Another request may have loaded while we waited for the write lock
        if let Some(data) = current.as_ref() {
            return data.clone();
        }
        let data = Arc::new(self.load().await);
        *current = Some(data.clone());
        data
    }

    /// Drop the cached data and load it again.
    pub async fn refresh(&self) -> Arc<MarketData> {
        let mut current = self.current.write().await;
        let data = Arc::new(self.load().await);
        *current = Some(data.clone());
        data
    }

    pub async fn is_loaded(&self) -> bool {
        self.current.read().await.is_some()
    }

    async fn load(&self) -> MarketData {
        let end = self.end_date();
        let price_start = end - Duration::days(self.price_range_days);
        let macro_start = end - Duration::days(MACRO_HISTORY_DAYS);
        let metrics = self.metrics.as_deref();

        let (prices, macro_data) = tokio::join!(
            load_prices(
                self.market.as_ref(),
                &self.instruments,
                price_start,
                end,
                metrics
            ),
            load_macro(
                self.macro_provider.as_deref(),
                &self.macro_series,
                macro_start,
                end,
                metrics
            ),
        );

        if let Some(metrics) = metrics {
            metrics.data_refreshes_total.inc();
        }

        let with_data = prices.values().filter(|s| !s.is_empty()).count();
        info!(
            instruments = prices.len(),
            with_data = with_data,
            macro_series = macro_data.len(),
            %price_start,
            %end,
            "Market data loaded"
        );

        MarketData::new(prices, macro_data, self.macro_provider.is_some())
    }
}
