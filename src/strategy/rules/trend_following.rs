//! Trend-following rule family

use crate::config::StrategyProfile;
use crate::indicators::IndicatorSnapshot;
use crate::strategy::rules::FamilyVerdict;
use crate::strategy::Direction;

/// RSI continuation band for longs
const RSI_LONG_BAND: (f64, f64) = (45.0, 70.0);
/// RSI continuation band for shorts
const RSI_SHORT_BAND: (f64, f64) = (30.0, 55.0);
/// Family confidence ceiling
const MAX_CONFIDENCE: f64 = 85.0;

/// Enter with the trend: EMA alignment, histogram sign matching direction,
/// and at least half the profile's change threshold already underway.
pub(crate) fn evaluate(
    snap: &IndicatorSnapshot,
    prev: &IndicatorSnapshot,
    profile: &StrategyProfile,
) -> Option<FamilyVerdict> {
    let change = snap.change_pct?;
    let rsi = snap.rsi?;
    let histogram = snap.macd_histogram?;
    let prev_histogram = prev.macd_histogram?;
    let uptrend = snap.is_uptrend?;
    let volume_ratio = snap.volume_ratio?;

    let half_threshold = profile.min_change_pct * 0.5;

    let long_entry = uptrend
        && histogram > 0.0
        && change > half_threshold
        && rsi > RSI_LONG_BAND.0
        && rsi < RSI_LONG_BAND.1;

    let short_entry = !uptrend
        && histogram < 0.0
        && change < -half_threshold
        && rsi > RSI_SHORT_BAND.0
        && rsi < RSI_SHORT_BAND.1;

    let (direction, strengthening) = if long_entry {
        (Direction::Long, histogram > prev_histogram)
    } else if short_entry {
        (Direction::Short, histogram < prev_histogram)
    } else {
        return None;
    };

    let mut confidence = profile.min_confidence + 10.0;
    if strengthening {
        confidence += 10.0;
    }
    if volume_ratio > profile.min_volume_ratio {
        confidence += 5.0;
    }

    Some((direction, confidence.min(MAX_CONFIDENCE)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyKind;
    use crate::strategy::rules::test_support::warm_snapshot;

    fn profile() -> StrategyProfile {
        StrategyProfile {
            kind: StrategyKind::TrendFollowing,
            min_change_pct: 2.0,
            min_volume_ratio: 1.15,
            min_confidence: 58.0,
            ..StrategyProfile::default()
        }
    }

    #[test]
    fn test_long_with_all_bonuses() {
        let mut snap = warm_snapshot();
        snap.is_uptrend = Some(true);
        snap.macd_histogram = Some(0.8);
        snap.change_pct = Some(1.5); // above 2.0 * 0.5
        snap.rsi = Some(60.0);
        snap.volume_ratio = Some(1.3);
        let mut prev = warm_snapshot();
        prev.macd_histogram = Some(0.5);

        let (direction, confidence) = evaluate(&snap, &prev, &profile()).unwrap();
        assert_eq!(direction, Direction::Long);
        // 58 + 10 base, +10 strengthening, +5 volume
        assert_eq!(confidence, 83.0);
    }

    #[test]
    fn test_confidence_capped_at_85() {
        let mut p = profile();
        p.min_confidence = 75.0;
        let mut snap = warm_snapshot();
        snap.is_uptrend = Some(true);
        snap.macd_histogram = Some(0.8);
        snap.change_pct = Some(1.5);
        snap.rsi = Some(60.0);
        snap.volume_ratio = Some(1.3);
        let mut prev = warm_snapshot();
        prev.macd_histogram = Some(0.5);

        let (_, confidence) = evaluate(&snap, &prev, &p).unwrap();
        assert_eq!(confidence, 85.0);
    }

    #[test]
    fn test_short_requires_downtrend_alignment() {
        let mut snap = warm_snapshot();
        snap.is_uptrend = Some(false);
        snap.macd_histogram = Some(-0.4);
        snap.change_pct = Some(-1.5);
        snap.rsi = Some(40.0);
        snap.volume_ratio = Some(1.0);
        let mut prev = warm_snapshot();
        prev.macd_histogram = Some(-0.2);

        let (direction, confidence) = evaluate(&snap, &prev, &profile()).unwrap();
        assert_eq!(direction, Direction::Short);
        // 58 + 10 base, +10 weakening histogram, no volume bonus
        assert_eq!(confidence, 78.0);
    }

    #[test]
    fn test_overextended_rsi_blocks_entry() {
        let mut snap = warm_snapshot();
        snap.is_uptrend = Some(true);
        snap.macd_histogram = Some(0.8);
        snap.change_pct = Some(1.5);
        snap.rsi = Some(75.0); // beyond the continuation band
        let prev = warm_snapshot();

        assert!(evaluate(&snap, &prev, &profile()).is_none());
    }

    #[test]
    fn test_histogram_against_direction_blocks_entry() {
        let mut snap = warm_snapshot();
        snap.is_uptrend = Some(true);
        snap.macd_histogram = Some(-0.1);
        snap.change_pct = Some(1.5);
        snap.rsi = Some(60.0);
        let prev = warm_snapshot();

        assert!(evaluate(&snap, &prev, &profile()).is_none());
    }
}
