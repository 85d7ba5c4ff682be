//! Core application primitives (HTTP surface, data cache, session state)

pub mod cache;
pub mod http;
pub mod session;

pub use cache::DataCache;
pub use http::*;
pub use session::SessionState;
