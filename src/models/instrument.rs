//! Instrument basket and macro series definitions

use serde::{Deserialize, Serialize};

/// A tradable instrument in the DCA basket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    /// Display name, also used as the key across scores and weights
    pub name: String,
    /// Market data ticker
    pub ticker: String,
}

impl Instrument {
    pub fn new(name: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ticker: ticker.into(),
        }
    }

    pub fn default_basket() -> Vec<Instrument> {
        vec![
            Instrument::new("S&P500", "SPY"),
            Instrument::new("NASDAQ100", "QQQ"),
            Instrument::new("CAC40", "^FCHI"),
            Instrument::new("EURO STOXX50", "FEZ"),
            Instrument::new("EURO STOXX600 TECH", "EXV3.DE"),
            Instrument::new("NIKKEI 225", "^N225"),
            Instrument::new("WORLD", "VT"),
            Instrument::new("EMERGING", "EEM"),
        ]
    }
}

/// Macro indicator shown alongside every instrument card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroSeries {
    pub label: String,
    pub code: String,
}

impl MacroSeries {
    pub fn new(label: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            code: code.into(),
        }
    }

    pub fn defaults() -> Vec<MacroSeries> {
        vec![
            MacroSeries::new("CAPE10", "CAPE"),
            MacroSeries::new("Fed Funds Rate", "FEDFUNDS"),
            MacroSeries::new("CPI YoY", "CPIAUCSL"),
            MacroSeries::new("ECY", "DGS10"),
        ]
    }
}
