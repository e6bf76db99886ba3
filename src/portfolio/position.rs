//! Position tracking

use crate::config::StrategyKind;
use crate::data::Candle;
use crate::strategy::Direction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a position was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitReason {
    StopLoss,
    TakeProfit,
    TimeExit,
}

impl ExitReason {
    /// Canonical display name
    pub fn as_str(&self) -> &'static str {
        match self {
            ExitReason::StopLoss => "STOP_LOSS",
            ExitReason::TakeProfit => "TAKE_PROFIT",
            ExitReason::TimeExit => "TIME_EXIT",
        }
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One open simulated position.
///
/// Owned exclusively by the backtest engine between entry and settlement;
/// at most one exists per run at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Position direction
    pub direction: Direction,
    /// Entry price
    pub entry_price: f64,
    /// Stop loss price
    pub stop_loss: f64,
    /// Take profit price
    pub take_profit: f64,
    /// Position size in base units
    pub size: f64,
    /// Candle index the position was opened at
    pub entry_index: usize,
    /// Rule family that opened the position
    pub kind: StrategyKind,
    /// Confidence of the entry signal
    pub confidence: f64,
}

impl Position {
    /// Check the candle against stop and target.
    ///
    /// Stop loss is checked before take profit: when both levels fall
    /// inside one candle the intra-candle ordering is unknown, so the
    /// conservative outcome wins.
    pub fn bracket_exit(&self, candle: &Candle) -> Option<(f64, ExitReason)> {
        match self.direction {
            Direction::Long => {
                if candle.low <= self.stop_loss {
                    Some((self.stop_loss, ExitReason::StopLoss))
                } else if candle.high >= self.take_profit {
                    Some((self.take_profit, ExitReason::TakeProfit))
                } else {
                    None
                }
            }
            Direction::Short => {
                if candle.high >= self.stop_loss {
                    Some((self.stop_loss, ExitReason::StopLoss))
                } else if candle.low <= self.take_profit {
                    Some((self.take_profit, ExitReason::TakeProfit))
                } else {
                    None
                }
            }
        }
    }

    /// Bars the position has been held at `current_index`
    pub fn bars_held(&self, current_index: usize) -> usize {
        current_index.saturating_sub(self.entry_index)
    }

    /// Leveraged percent return for an exit at `exit_price`
    pub fn pnl_pct(&self, exit_price: f64, leverage: f64) -> f64 {
        (exit_price - self.entry_price) / self.entry_price * self.direction.sign() * leverage
    }

    /// Notional value at entry
    pub fn entry_value(&self) -> f64 {
        self.entry_price * self.size
    }
}

/// Immutable settlement record of a closed position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Position direction
    pub direction: Direction,
    /// Rule family that opened the position
    pub kind: StrategyKind,
    /// Entry price
    pub entry_price: f64,
    /// Exit price
    pub exit_price: f64,
    /// Realized profit/loss in quote currency
    pub pnl: f64,
    /// Leveraged percent return
    pub pnl_pct: f64,
    /// Why the position closed
    pub exit_reason: ExitReason,
    /// Bars between entry and exit
    pub bars_held: usize,
    /// Confidence of the entry signal
    pub confidence: f64,
}
