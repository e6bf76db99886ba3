//! Risk sizing

use crate::config::{RunSettings, StrategyKind, StrategyProfile};
use crate::strategy::{Direction, Signal};
use serde::{Deserialize, Serialize};

/// ATR multiplier bump applied when volatility runs near the profile ceiling
const HIGH_VOLATILITY_BUMP: f64 = 0.3;
/// Fraction of the ceiling that counts as "near"
const HIGH_VOLATILITY_FRACTION: f64 = 0.8;
/// Extra stop width for the faster-churning families
const WIDE_STOP_FACTOR: f64 = 1.1;
/// Reward multiple for momentum entries
const MOMENTUM_REWARD_MULTIPLE: f64 = 2.0;
/// Reward multiple for every other family
const DEFAULT_REWARD_MULTIPLE: f64 = 1.5;

/// Concrete stop/target/size numbers for a signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    /// Stop loss price
    pub stop_loss: f64,
    /// Take profit price
    pub take_profit: f64,
    /// Position size in base units
    pub size: f64,
    /// Leverage applied
    pub leverage: f64,
}

/// Turn a signal into stop/target levels and a leveraged position size.
///
/// Pure: reads the signal, the profile and the run settings, touches
/// nothing.
pub fn size_position(
    signal: &Signal,
    profile: &StrategyProfile,
    settings: &RunSettings,
    capital: f64,
) -> Bracket {
    let mut atr_multiplier = profile.atr_multiplier;
    if signal.volatility_at_signal > profile.max_volatility * HIGH_VOLATILITY_FRACTION {
        atr_multiplier += HIGH_VOLATILITY_BUMP;
    }
    if matches!(
        signal.kind,
        StrategyKind::Momentum | StrategyKind::RangeTrading
    ) {
        atr_multiplier *= WIDE_STOP_FACTOR;
    }

    let stop_distance = signal.atr_at_signal * atr_multiplier;
    let reward_multiple = if signal.kind == StrategyKind::Momentum {
        MOMENTUM_REWARD_MULTIPLE
    } else {
        DEFAULT_REWARD_MULTIPLE
    };
    let target_distance = stop_distance * reward_multiple;

    let (stop_loss, take_profit) = match signal.direction {
        Direction::Long => (
            signal.reference_price - stop_distance,
            signal.reference_price + target_distance,
        ),
        Direction::Short => (
            signal.reference_price + stop_distance,
            signal.reference_price - target_distance,
        ),
    };

    let size =
        capital * settings.risk_per_trade * settings.leverage / signal.reference_price;

    Bracket {
        stop_loss,
        take_profit,
        size,
        leverage: settings.leverage,
    }
}
