use crate::models::series::PriceSeries;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Everything loaded from the data providers in one refresh.
#[derive(Debug, Clone)]
pub struct MarketData {
    /// Price history keyed by instrument name
    pub prices: BTreeMap<String, PriceSeries>,
    /// Macro series keyed by label
    pub macro_data: BTreeMap<String, PriceSeries>,
    /// False when no macro credential is configured
    pub macro_enabled: bool,
    pub loaded_at: DateTime<Utc>,
}

impl MarketData {
    pub fn new(
        prices: BTreeMap<String, PriceSeries>,
        macro_data: BTreeMap<String, PriceSeries>,
        macro_enabled: bool,
    ) -> Self {
        Self {
            prices,
            macro_data,
            macro_enabled,
            loaded_at: Utc::now(),
        }
    }

    pub fn series(&self, name: &str) -> Option<&PriceSeries> {
        self.prices.get(name)
    }
}
