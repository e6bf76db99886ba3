//! Momentum rule family

use crate::config::StrategyProfile;
use crate::indicators::IndicatorSnapshot;
use crate::strategy::rules::FamilyVerdict;
use crate::strategy::Direction;

/// Minimum short/long volume trend that counts as expanding participation
const VOLUME_TREND_FLOOR: f64 = 1.2;
/// Volume trend level that earns the larger bonus
const VOLUME_TREND_STRONG: f64 = 1.5;
/// RSI midline separating continuation directions
const RSI_MIDLINE: f64 = 50.0;
/// Confidence ceiling applied to extra-caution profiles
const CAUTION_CAP: f64 = 70.0;

/// Ride an accelerating move: change past threshold, expanding volume, a
/// strengthening histogram, and RSI extending away from the midline without
/// having reached the exhaustion bound yet.
pub(crate) fn evaluate(
    snap: &IndicatorSnapshot,
    prev: &IndicatorSnapshot,
    profile: &StrategyProfile,
) -> Option<FamilyVerdict> {
    let change = snap.change_pct?;
    let rsi = snap.rsi?;
    let histogram = snap.macd_histogram?;
    let prev_histogram = prev.macd_histogram?;
    let volume_ratio = snap.volume_ratio?;
    let volume_trend = snap.volume_trend?;

    if volume_ratio <= profile.min_volume_ratio || volume_trend <= VOLUME_TREND_FLOOR {
        return None;
    }

    let long_entry = change > profile.min_change_pct
        && histogram > prev_histogram
        && rsi > RSI_MIDLINE
        && rsi < profile.rsi_overbought;

    let short_entry = change < -profile.min_change_pct
        && histogram < prev_histogram
        && rsi < RSI_MIDLINE
        && rsi > profile.rsi_oversold;

    let direction = if long_entry {
        Direction::Long
    } else if short_entry {
        Direction::Short
    } else {
        return None;
    };

    let mut confidence = profile.min_confidence;
    if volume_trend > VOLUME_TREND_STRONG {
        confidence += 10.0;
    }
    if change.abs() > profile.min_change_pct * 1.5 {
        confidence += 8.0;
    }
    if profile.extra_caution {
        confidence = confidence.min(CAUTION_CAP);
    }

    Some((direction, confidence))
}
