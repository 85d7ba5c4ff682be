//! Scoring and allocation engine.

pub mod aggregation;
pub mod allocation;
pub mod engine;
pub mod scoring;

pub use aggregation::Aggregator;
pub use allocation::{normalize, redistribute, shift_scores, AllocationResult};
pub use engine::{DashboardEngine, EngineParams};
pub use scoring::{relative_deviation, score_deviation};
