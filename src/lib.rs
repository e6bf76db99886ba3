//! Pairtrader: per-pair strategy-profile backtesting engine
//!
//! This crate replays historical OHLCV candle series against per-(symbol,
//! timeframe) strategy profiles and simulates the resulting leveraged
//! positions, producing trade logs and performance statistics.
//!
//! # Features
//!
//! - **Data Management**: normalized OHLCV candle series per symbol/timeframe
//! - **Technical Indicators**: RSI, MACD, EMA, ATR, Bollinger Bands, volume
//!   ratios, computed candle-by-candle with explicit warm-up
//! - **Strategy Rules**: four mutually exclusive rule families
//!   (trend-following, mean-reversion, momentum, range-trading) with
//!   confidence scoring
//! - **Risk Sizing**: ATR-based stop/target brackets and leveraged notional
//! - **Backtesting**: causal candle-by-candle replay with capital ledger,
//!   commissions and drawdown tracking
//! - **Market Data**: paginated historical kline fetching over REST
//!
//! # Example
//!
//! ```no_run
//! use pairtrader::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> pairtrader::Result<()> {
//!     let client = MarketDataClient::new();
//!     let catalog = ProfileCatalog::default_catalog();
//!     let settings = RunSettings::default();
//!     let report = run_pair(
//!         &client,
//!         &catalog,
//!         &settings,
//!         "BTCUSDT",
//!         Timeframe::H1,
//!         1_700_000_000_000,
//!         1_707_000_000_000,
//!     )
//!     .await?;
//!     println!("{}", BacktestReport::new(&report).format());
//!     Ok(())
//! }
//! ```

pub mod backtest;
pub mod config;
pub mod data;
pub mod error;
pub mod exchange;
pub mod indicators;
pub mod portfolio;
pub mod strategy;

// Re-export commonly used types
pub mod prelude {
    pub use crate::backtest::*;
    pub use crate::config::*;
    pub use crate::data::*;
    pub use crate::error::PairtraderError;
    pub use crate::exchange::*;
    pub use crate::indicators::*;
    pub use crate::portfolio::*;
    pub use crate::strategy::*;
}

/// Result type alias over the crate error enum
pub type Result<T> = std::result::Result<T, error::PairtraderError>;
