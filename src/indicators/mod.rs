//! Technical indicators module
//!
//! Incremental, warm-up aware indicators and the engine that derives a
//! per-candle [`IndicatorSnapshot`] sequence from a candle series.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod engine;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod volume;

pub use atr::*;
pub use bollinger::*;
pub use ema::*;
pub use engine::*;
pub use macd::*;
pub use rsi::*;
pub use sma::*;
pub use volume::*;

/// Indicator trait for single-input indicators
pub trait Indicator {
    /// Get the name of the indicator
    fn name(&self) -> &str;

    /// Update indicator with new value
    fn update(&mut self, value: f64);

    /// Get current indicator value; `None` until the window is full
    fn value(&self) -> Option<f64>;

    /// Check if indicator is ready (has enough data)
    fn is_ready(&self) -> bool;
}
