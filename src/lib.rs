//! DCA dashboard engine.
//!
//! Ranks a basket of ETFs by how far their price deviates from moving
//! averages over several timeframes and turns the scores into a
//! dollar-cost-averaging allocation.

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
