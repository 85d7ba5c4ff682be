//! Yahoo Finance chart API price provider

use crate::models::series::{Observation, PriceSeries};
use crate::services::market_data::MarketDataProvider;
use crate::services::{http_client, ProviderError};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<Quote>,
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct YahooChartProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooChartProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderError> {
        Ok(Self::with_client(base_url, http_client()?))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn chart_url(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| {
                ProviderError::Payload(format!("base url cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker]);

        let period1 = unix_seconds(start);
        let period2 = unix_seconds(end);
        url.query_pairs_mut()
            .append_pair("period1", &period1.to_string())
            .append_pair("period2", &period2.to_string())
            .append_pair("interval", "1d")
            .append_pair("events", "history");
        Ok(url)
    }
}

fn unix_seconds(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

fn into_series(result: ChartResult) -> PriceSeries {
    let ChartResult {
        timestamp,
        indicators,
    } = result;

    let adjusted = indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .filter(|values| values.iter().any(Option::is_some));
    let closes = match adjusted {
        Some(values) => values,
        None => indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default(),
    };

    let observations = timestamp
        .iter()
        .zip(closes)
        .filter_map(|(&ts, value)| {
            let date = DateTime::from_timestamp(ts, 0)?.date_naive();
            Some(Observation::new(date, value?))
        })
        .collect();

    PriceSeries::new(observations)
}

#[async_trait]
impl MarketDataProvider for YahooChartProvider {
    async fn fetch_prices(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ProviderError> {
        let url = self.chart_url(ticker, start, end)?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::Status {
                status: response.status().as_u16(),
                what: ticker.to_string(),
            });
        }

        let body: ChartResponse = response.json().await?;
        if let Some(error) = body.chart.error {
            return Err(ProviderError::Payload(format!(
                "{}: {}",
                error.code, error.description
            )));
        }

        let result = body
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ProviderError::Payload(format!("no chart result for {}", ticker)))?;

        Ok(into_series(result))
    }
}
