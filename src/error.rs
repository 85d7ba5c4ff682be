//! Error types surfaced by the dashboard API

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DashboardError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),
    #[error("unknown timeframe: {0}")]
    UnknownTimeframe(String),
    #[error("threshold must be within {min}..={max}%, got {value}")]
    InvalidThreshold { value: f64, min: f64, max: f64 },
    #[error("pool must be a positive finite percentage, got {0}")]
    InvalidPool(f64),
    #[error("equity share must be within 0..=100%, got {0}")]
    InvalidEquityShare(f64),
}
