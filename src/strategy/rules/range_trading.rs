//! Range-trading rule family

use crate::config::StrategyProfile;
use crate::indicators::IndicatorSnapshot;
use crate::strategy::rules::FamilyVerdict;
use crate::strategy::Direction;

/// RSI slack around the bound that still counts as a band touch
const RSI_TOUCH_MARGIN: f64 = 5.0;
/// Fraction of the change threshold that must be moving into the band edge
const FADE_CHANGE_FACTOR: f64 = 0.7;

/// Fade the edges of a range: close in the outer Bollinger band, RSI within
/// reach of its bound, and a push into the edge worth fading.
pub(crate) fn evaluate(
    snap: &IndicatorSnapshot,
    profile: &StrategyProfile,
) -> Option<FamilyVerdict> {
    let change = snap.change_pct?;
    let rsi = snap.rsi?;
    let bb_position = snap.bollinger_position?;

    let fade_threshold = profile.min_change_pct * FADE_CHANGE_FACTOR;
    let deep_extreme = profile.bb_extreme / 2.0;

    if bb_position < profile.bb_extreme
        && rsi < profile.rsi_oversold + RSI_TOUCH_MARGIN
        && change < -fade_threshold
    {
        let mut confidence = profile.min_confidence;
        if bb_position < deep_extreme {
            confidence += 10.0;
        }
        if rsi < profile.rsi_oversold {
            confidence += 8.0;
        }
        return Some((Direction::Long, confidence));
    }

    if bb_position > 1.0 - profile.bb_extreme
        && rsi > profile.rsi_overbought - RSI_TOUCH_MARGIN
        && change > fade_threshold
    {
        let mut confidence = profile.min_confidence;
        if bb_position > 1.0 - deep_extreme {
            confidence += 10.0;
        }
        if rsi > profile.rsi_overbought {
            confidence += 8.0;
        }
        return Some((Direction::Short, confidence));
    }

    None
}
