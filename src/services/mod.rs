//! External data collaborators: market prices and macro indicators.

pub mod fred;
pub mod macro_data;
pub mod market_data;
pub mod yahoo;

pub use fred::FredProvider;
pub use macro_data::{load_macro, MacroDataProvider};
pub use market_data::{load_prices, MarketDataProvider};
pub use yahoo::YahooChartProvider;

use std::time::Duration;
use thiserror::Error;

/// Identifies the dashboard to data providers. The Yahoo chart endpoint
/// throttles requests that carry no user agent.
pub const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; dca-dashboard/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("provider returned {status} for {what}")]
    Status { status: u16, what: String },
    #[error("unexpected payload: {0}")]
    Payload(String),
}

/// HTTP client shared by the providers.
pub fn http_client() -> Result<reqwest::Client, ProviderError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}
