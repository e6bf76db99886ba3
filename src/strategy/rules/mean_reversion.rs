//! Mean-reversion rule family

use crate::config::StrategyProfile;
use crate::indicators::IndicatorSnapshot;
use crate::strategy::rules::FamilyVerdict;
use crate::strategy::Direction;

/// Extra RSI depth past the bound that earns the big bonus
const RSI_DEPTH_BONUS_MARGIN: f64 = 5.0;
/// Family confidence ceiling
const MAX_CONFIDENCE: f64 = 80.0;

/// Fade an overdone move: change beyond threshold against the entry
/// direction, RSI past its bound, close pinned at a Bollinger extreme, on
/// confirming volume.
pub(crate) fn evaluate(
    snap: &IndicatorSnapshot,
    profile: &StrategyProfile,
) -> Option<FamilyVerdict> {
    let change = snap.change_pct?;
    let rsi = snap.rsi?;
    let bb_position = snap.bollinger_position?;
    let volume_ratio = snap.volume_ratio?;

    if volume_ratio <= profile.min_volume_ratio {
        return None;
    }

    let deep_extreme = profile.bb_extreme / 2.0;

    if change < -profile.min_change_pct
        && rsi < profile.rsi_oversold
        && bb_position < profile.bb_extreme
    {
        let mut confidence = profile.min_confidence;
        if rsi < profile.rsi_oversold - RSI_DEPTH_BONUS_MARGIN {
            confidence += 15.0;
        }
        if bb_position < deep_extreme {
            confidence += 10.0;
        }
        return Some((Direction::Long, confidence.min(MAX_CONFIDENCE)));
    }

    if change > profile.min_change_pct
        && rsi > profile.rsi_overbought
        && bb_position > 1.0 - profile.bb_extreme
    {
        let mut confidence = profile.min_confidence;
        if rsi > profile.rsi_overbought + RSI_DEPTH_BONUS_MARGIN {
            confidence += 15.0;
        }
        if bb_position > 1.0 - deep_extreme {
            confidence += 10.0;
        }
        return Some((Direction::Short, confidence.min(MAX_CONFIDENCE)));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyKind;
    use crate::strategy::rules::test_support::warm_snapshot;

    fn profile() -> StrategyProfile {
        StrategyProfile {
            kind: StrategyKind::MeanReversion,
            min_change_pct: 2.5,
            rsi_oversold: 33.0,
            rsi_overbought: 67.0,
            min_volume_ratio: 1.15,
            min_confidence: 57.0,
            ..StrategyProfile::default()
        }
    }

    #[test]
    fn test_long_with_depth_bonuses() {
        let mut snap = warm_snapshot();
        snap.change_pct = Some(-4.0);
        snap.rsi = Some(25.0); // deeper than 33 - 5
        snap.bollinger_position = Some(0.05); // deeper than 0.1
        snap.volume_ratio = Some(1.4);

        let (direction, confidence) = evaluate(&snap, &profile()).unwrap();
        assert_eq!(direction, Direction::Long);
        // 57 + 15 + 10, capped at 80
        assert_eq!(confidence, 80.0);
    }

    #[test]
    fn test_short_base_confidence() {
        let mut snap = warm_snapshot();
        snap.change_pct = Some(3.0);
        snap.rsi = Some(70.0); // past 67 but not past 72
        snap.bollinger_position = Some(0.85);
        snap.volume_ratio = Some(1.3);

        let (direction, confidence) = evaluate(&snap, &profile()).unwrap();
        assert_eq!(direction, Direction::Short);
        assert_eq!(confidence, 57.0);
    }

    #[test]
    fn test_quiet_volume_blocks_entry() {
        let mut snap = warm_snapshot();
        snap.change_pct = Some(-4.0);
        snap.rsi = Some(25.0);
        snap.bollinger_position = Some(0.05);
        snap.volume_ratio = Some(1.0);

        assert!(evaluate(&snap, &profile()).is_none());
    }

    #[test]
    fn test_mid_band_blocks_entry() {
        let mut snap = warm_snapshot();
        snap.change_pct = Some(-4.0);
        snap.rsi = Some(25.0);
        snap.bollinger_position = Some(0.4); // not an extreme
        snap.volume_ratio = Some(1.4);

        assert!(evaluate(&snap, &profile()).is_none());
    }
}
