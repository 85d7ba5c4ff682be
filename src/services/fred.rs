//! FRED (Federal Reserve Economic Data) macro series provider

use crate::models::series::{Observation, PriceSeries};
use crate::services::macro_data::MacroDataProvider;
use crate::services::{http_client, ProviderError};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use url::Url;

/// FRED marks missing observations with a lone dot.
const MISSING_VALUE: &str = ".";

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

#[derive(Debug, Clone)]
pub struct FredProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FredProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        Ok(Self::with_client(base_url, api_key, http_client()?))
    }

    pub fn with_client(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    /// Provider gated on the credential: `None` when no key is configured.
    pub fn from_key(
        base_url: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Option<Self>, ProviderError> {
        api_key.map(|key| Self::new(base_url, key)).transpose()
    }

    fn observations_url(
        &self,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)?.join("fred/series/observations")?;
        url.query_pairs_mut()
            .append_pair("series_id", code)
            .append_pair("api_key", &self.api_key)
            .append_pair("file_type", "json")
            .append_pair("observation_start", &start.format("%Y-%m-%d").to_string())
            .append_pair("observation_end", &end.format("%Y-%m-%d").to_string());
        Ok(url)
    }
}

fn parse_observation(raw: &RawObservation) -> Option<Observation> {
    if raw.value == MISSING_VALUE {
        return None;
    }
    let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d").ok()?;
    let value = raw.value.parse::<f64>().ok()?;
    Some(Observation::new(date, value))
}

#[async_trait]
impl MacroDataProvider for FredProvider {
    async fn fetch_series(
        &self,
        code: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, ProviderError> {
        let url = self.observations_url(code, start, end)?;
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::Status {
                status: response.status().as_u16(),
                what: code.to_string(),
            });
        }

        let body: ObservationsResponse = response.json().await?;
        let observations = body.observations.iter().filter_map(parse_observation).collect();
        Ok(PriceSeries::new(observations))
    }
}
