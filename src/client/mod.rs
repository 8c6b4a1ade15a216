//! Remote data source clients
//!
//! The `StatsSource` trait and its HTTP implementation.

pub mod error;
pub mod http;
pub mod source;

pub use error::{ClientError, ClientResult};
pub use http::{calendar_month, decode_envelope, decode_payload, HttpStatsClient};
pub use source::StatsSource;
