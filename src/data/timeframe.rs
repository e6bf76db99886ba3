//! Candle timeframes

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported candle timeframes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// 15 minutes
    #[serde(rename = "15m")]
    M15,
    /// 1 hour
    #[serde(rename = "1h")]
    H1,
    /// 4 hours
    #[serde(rename = "4h")]
    H4,
}

impl Timeframe {
    /// Interval string as used by the market-data API
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M15 => "15m",
            Timeframe::H1 => "1h",
            Timeframe::H4 => "4h",
        }
    }

    /// Duration of one bar
    pub fn bar_duration(&self) -> Duration {
        match self {
            Timeframe::M15 => Duration::minutes(15),
            Timeframe::H1 => Duration::hours(1),
            Timeframe::H4 => Duration::hours(4),
        }
    }

    /// Duration of one bar in milliseconds
    pub fn bar_millis(&self) -> i64 {
        self.bar_duration().num_milliseconds()
    }

    /// Maximum number of bars a position may stay open before a time exit.
    ///
    /// Faster timeframes tolerate longer holds in bar terms.
    pub fn max_hold_bars(&self) -> usize {
        match self {
            Timeframe::M15 => 30,
            Timeframe::H1 => 15,
            Timeframe::H4 => 10,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "15m" => Ok(Timeframe::M15),
            "1h" => Ok(Timeframe::H1),
            "4h" => Ok(Timeframe::H4),
            other => Err(format!("unsupported timeframe: {}", other)),
        }
    }
}
