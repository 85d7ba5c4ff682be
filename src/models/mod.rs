//! Shared data models spanning the engine layers.

pub mod instrument;
pub mod market;
pub mod score;
pub mod series;
pub mod snapshot;
pub mod timeframe;

pub use instrument::{Instrument, MacroSeries};
pub use market::MarketData;
pub use score::{DeviationTier, InstrumentScore, TimeframeScore, TimeframeSignal};
pub use series::{pct_change, Observation, PriceSeries};
pub use snapshot::{DashboardSnapshot, InstrumentCard, MacroReading, TimeframeBadge};
pub use timeframe::{Timeframe, TimeframeSet};
