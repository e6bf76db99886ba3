//! OHLCV candle data structures

use crate::data::Timeframe;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV candle data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bar open time
    pub open_time: DateTime<Utc>,
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Volume
    pub volume: f64,
}

impl Candle {
    /// Create a new candle
    pub fn new(
        open_time: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            open_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Check if candle is bullish
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Check if candle is bearish
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Get total range (high - low)
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Bar range as a percentage of the close
    pub fn volatility_pct(&self) -> f64 {
        (self.high - self.low) / self.close * 100.0
    }
}

/// Ordered candle series for one (symbol, timeframe) pair.
///
/// Construction sorts by open time and drops duplicate open times, so index
/// order is chronological order.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    symbol: String,
    timeframe: Timeframe,
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Create new empty series
    pub fn new(symbol: impl Into<String>, timeframe: Timeframe) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe,
            candles: Vec::new(),
        }
    }

    /// Create from a vector of candles, normalizing ordering and duplicates
    pub fn from_candles(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        mut candles: Vec<Candle>,
    ) -> Self {
        candles.sort_by_key(|c| c.open_time);
        candles.dedup_by_key(|c| c.open_time);
        Self {
            symbol: symbol.into(),
            timeframe,
            candles,
        }
    }

    /// Append a candle, keeping the series ordered and duplicate-free
    pub fn push(&mut self, candle: Candle) {
        match self.candles.last().map(|c| c.open_time) {
            Some(last_time) if candle.open_time <= last_time => {
                // equal open time: keep the first occurrence
                if candle.open_time < last_time {
                    self.candles.push(candle);
                    self.candles.sort_by_key(|c| c.open_time);
                    self.candles.dedup_by_key(|c| c.open_time);
                }
            }
            _ => self.candles.push(candle),
        }
    }

    /// Symbol this series belongs to
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Timeframe of this series
    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// Get number of candles
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Check if series is empty
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Get candle at index
    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    /// Get last candle
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Get all candles
    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Get close prices as vector
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }
}
