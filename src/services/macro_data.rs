//! Macro indicator provider interface.

use crate::metrics::Metrics;
use crate::models::instrument::MacroSeries;
use crate::models::series::PriceSeries;
use crate::services::ProviderError;
use async_trait::async_trait;
use chrono::NaiveDate;
use futures_util::future::join_all;
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[async_trait]
pub trait MacroDataProvider: Send + Sync {
    async fn fetch_series(
        &self,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ProviderError>;
}

/// Load every configured macro series.
///
/// Without a provider (no credential configured) the result is empty and the
/// macro panel is disabled. Individual failures yield empty series.
pub async fn load_macro(
    provider: Option<&dyn MacroDataProvider>,
    series: &[MacroSeries],
    start: NaiveDate,
    end: NaiveDate,
    metrics: Option<&Metrics>,
) -> BTreeMap<String, PriceSeries> {
    let Some(provider) = provider else {
        debug!("Macro provider not configured, skipping macro series");
        return BTreeMap::new();
    };

    let fetches = series.iter().map(|macro_series| async move {
        let data = match provider.fetch_series(&macro_series.code, start, end).await {
            Ok(data) => data,
            Err(e) => {
                warn!(
                    series = %macro_series.label,
                    code = %macro_series.code,
                    error = %e,
                    "Macro fetch failed, using empty series"
                );
                if let Some(metrics) = metrics {
                    metrics.provider_failures_total.with_label_values(&["macro"]).inc();
                }
                PriceSeries::empty()
            }
        };
        (macro_series.label.clone(), data)
    });

    join_all(fetches).await.into_iter().collect()
}
