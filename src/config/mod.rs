//! Environment-driven configuration
//!
//! Values come from process environment variables, optionally seeded from a
//! `.env` file by the binaries through `dotenvy`.

use crate::error::DashboardError;
use crate::models::instrument::{Instrument, MacroSeries};
use crate::models::timeframe::TimeframeSet;
use std::env;
use std::str::FromStr;
use thiserror::Error;

pub const MIN_THRESHOLD_PCT: f64 = 1.0;
pub const MAX_THRESHOLD_PCT: f64 = 30.0;
pub const DEFAULT_THRESHOLD_PCT: f64 = 10.0;
pub const DEFAULT_CHART_WINDOW: &str = "Yearly";
pub const MACRO_HISTORY_DAYS: i64 = 365 * 6;

pub const YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const FRED_BASE_URL: &str = "https://api.stlouisfed.org";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
    #[error("{key} must be within {min}..={max}, got {value}")]
    OutOfRange {
        key: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Deployment environment name (`APP_ENV`), defaults to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub port: u16,
    pub instruments: Vec<Instrument>,
    pub timeframes: TimeframeSet,
    pub macro_series: Vec<MacroSeries>,
    /// Default deviation threshold in percent
    pub threshold_pct: f64,
    /// Capital pool the recommendations are expressed against
    pub pool_pct: f64,
    /// Share of the pool invested in equities by the plain DCA split
    pub equity_share_pct: f64,
    pub fred_api_key: Option<String>,
    pub yahoo_base_url: String,
    pub fred_base_url: String,
    pub default_chart_window: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            instruments: Instrument::default_basket(),
            timeframes: TimeframeSet::default(),
            macro_series: MacroSeries::defaults(),
            threshold_pct: DEFAULT_THRESHOLD_PCT,
            pool_pct: 100.0,
            equity_share_pct: 50.0,
            fred_api_key: None,
            yahoo_base_url: YAHOO_BASE_URL.to_string(),
            fred_base_url: FRED_BASE_URL.to_string(),
            default_chart_window: DEFAULT_CHART_WINDOW.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Build a configuration from environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let threshold_pct = parse_var("THRESHOLD_PCT")?.unwrap_or(defaults.threshold_pct);
        validate_threshold(threshold_pct).map_err(|_| ConfigError::OutOfRange {
            key: "THRESHOLD_PCT",
            value: threshold_pct,
            min: MIN_THRESHOLD_PCT,
            max: MAX_THRESHOLD_PCT,
        })?;

        let pool_pct = parse_var("POOL_PCT")?.unwrap_or(defaults.pool_pct);
        validate_pool(pool_pct).map_err(|_| ConfigError::OutOfRange {
            key: "POOL_PCT",
            value: pool_pct,
            min: 0.0,
            max: f64::INFINITY,
        })?;

        let equity_share_pct =
            parse_var("EQUITY_SHARE_PCT")?.unwrap_or(defaults.equity_share_pct);
        validate_equity_share(equity_share_pct).map_err(|_| ConfigError::OutOfRange {
            key: "EQUITY_SHARE_PCT",
            value: equity_share_pct,
            min: 0.0,
            max: 100.0,
        })?;

        let fred_api_key = env::var("FRED_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Ok(Self {
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            threshold_pct,
            pool_pct,
            equity_share_pct,
            fred_api_key,
            yahoo_base_url: env::var("YAHOO_BASE_URL").unwrap_or(defaults.yahoo_base_url),
            fred_base_url: env::var("FRED_BASE_URL").unwrap_or(defaults.fred_base_url),
            ..defaults
        })
    }

    pub fn instrument(&self, name: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.name == name)
    }

    pub fn instrument_names(&self) -> Vec<String> {
        self.instruments.iter().map(|i| i.name.clone()).collect()
    }
}

/// Check a user-supplied threshold against the accepted slider range.
pub fn validate_threshold(threshold_pct: f64) -> Result<f64, DashboardError> {
    if (MIN_THRESHOLD_PCT..=MAX_THRESHOLD_PCT).contains(&threshold_pct) {
        Ok(threshold_pct)
    } else {
        Err(DashboardError::InvalidThreshold {
            value: threshold_pct,
            min: MIN_THRESHOLD_PCT,
            max: MAX_THRESHOLD_PCT,
        })
    }
}

/// The capital pool must be finite and strictly positive.
pub fn validate_pool(pool_pct: f64) -> Result<f64, DashboardError> {
    if pool_pct.is_finite() && pool_pct > 0.0 {
        Ok(pool_pct)
    } else {
        Err(DashboardError::InvalidPool(pool_pct))
    }
}

pub fn validate_equity_share(equity_share_pct: f64) -> Result<f64, DashboardError> {
    if (0.0..=100.0).contains(&equity_share_pct) {
        Ok(equity_share_pct)
    } else {
        Err(DashboardError::InvalidEquityShare(equity_share_pct))
    }
}

fn parse_var<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        Err(_) => Ok(None),
    }
}
