//! Market data integration module
//!
//! REST client for paginated historical kline fetching.

pub mod client;

pub use client::*;
