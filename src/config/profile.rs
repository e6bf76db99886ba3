//! Strategy profile configuration

use serde::{Deserialize, Serialize};
use std::fmt;

/// The rule family a profile trades with. Exactly one per profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyKind {
    TrendFollowing,
    MeanReversion,
    Momentum,
    RangeTrading,
}

impl StrategyKind {
    /// Canonical display name
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::TrendFollowing => "TREND_FOLLOWING",
            StrategyKind::MeanReversion => "MEAN_REVERSION",
            StrategyKind::Momentum => "MOMENTUM",
            StrategyKind::RangeTrading => "RANGE_TRADING",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-(symbol, timeframe) strategy parameters.
///
/// Immutable once loaded; one rule family per profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyProfile {
    /// Selected rule family
    pub kind: StrategyKind,
    /// Minimum close-over-close change (percent) a rule may require
    pub min_change_pct: f64,
    /// RSI oversold bound
    pub rsi_oversold: f64,
    /// RSI overbought bound
    pub rsi_overbought: f64,
    /// Minimum volume / 20-bar average volume ratio
    pub min_volume_ratio: f64,
    /// Volatility ceiling (percent); above it no rule family runs
    pub max_volatility: f64,
    /// Base ATR multiplier for stop placement
    pub atr_multiplier: f64,
    /// Minimum confidence a signal must reach (0-100)
    pub min_confidence: f64,
    /// Trend filter weighting (kept per profile for tuning parity)
    pub trend_filter_strength: f64,
    /// Bollinger-position threshold that counts as a band extreme
    #[serde(default = "default_bb_extreme")]
    pub bb_extreme: f64,
    /// Cap momentum confidence at 70 for erratic pairs
    #[serde(default)]
    pub extra_caution: bool,
}

fn default_bb_extreme() -> f64 {
    0.2
}

impl Default for StrategyProfile {
    fn default() -> Self {
        Self {
            kind: StrategyKind::TrendFollowing,
            min_change_pct: 2.0,
            rsi_oversold: 35.0,
            rsi_overbought: 65.0,
            min_volume_ratio: 1.15,
            max_volatility: 9.0,
            atr_multiplier: 2.0,
            min_confidence: 58.0,
            trend_filter_strength: 1.0,
            bb_extreme: default_bb_extreme(),
            extra_caution: false,
        }
    }
}
