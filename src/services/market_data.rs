//! Market data provider interface.

use crate::metrics::Metrics;
use crate::models::instrument::Instrument;
use crate::models::series::PriceSeries;
use crate::services::ProviderError;
use async_trait::async_trait;
use chrono::NaiveDate;
use futures_util::future::join_all;
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily adjusted closes for `ticker` between `start` and `end`, falling
    /// back to plain closes when no adjusted series is published.
    async fn fetch_prices(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ProviderError>;
}

/// Fetch every instrument of the basket concurrently.
///
/// A failed fetch never propagates: the instrument gets an empty series so
/// every timeframe downstream is marked insufficient.
pub async fn load_prices(
    provider: &dyn MarketDataProvider,
    instruments: &[Instrument],
    start: NaiveDate,
    end: NaiveDate,
    metrics: Option<&Metrics>,
) -> BTreeMap<String, PriceSeries> {
    let fetches = instruments.iter().map(|instrument| async move {
        let series = match provider.fetch_prices(&instrument.ticker, start, end).await {
            Ok(series) => {
                debug!(
                    instrument = %instrument.name,
                    ticker = %instrument.ticker,
                    points = series.len(),
                    "Loaded price history"
                );
                series
            }
            Err(e) => {
                warn!(
                    instrument = %instrument.name,
                    ticker = %instrument.ticker,
                    error = %e,
                    "Price fetch failed, using empty series"
                );
                if let Some(metrics) = metrics {
                    metrics.provider_failures_total.with_label_values(&["market"]).inc();
                }
                PriceSeries::empty()
            }
        };
        (instrument.name.clone(), series)
    });

    join_all(fetches).await.into_iter().collect()
}
