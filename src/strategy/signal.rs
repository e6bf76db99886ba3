//! Trading signals

use crate::config::StrategyKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// Signed unit: +1 for long, -1 for short
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Long => f.write_str("LONG"),
            Direction::Short => f.write_str("SHORT"),
        }
    }
}

/// An entry signal produced by a rule family.
///
/// At most one per candle, and only while no position is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Entry direction
    pub direction: Direction,
    /// Rule family that produced the signal
    pub kind: StrategyKind,
    /// Confidence score, 0-100
    pub confidence: f64,
    /// Close price the signal was generated at
    pub reference_price: f64,
    /// ATR at signal time, used for stop placement
    pub atr_at_signal: f64,
    /// Bar volatility (percent) at signal time
    pub volatility_at_signal: f64,
}
