//! Rule families and signal evaluation

pub mod mean_reversion;
pub mod momentum;
pub mod range_trading;
pub mod trend_following;

use crate::config::{StrategyKind, StrategyProfile};
use crate::indicators::IndicatorSnapshot;
use crate::strategy::{Direction, Signal};
use tracing::debug;

/// Evaluate the profile's rule family against one candle.
///
/// Stateless and side-effect free. Short-circuits to `None` when the
/// volatility ceiling is exceeded, when any required indicator is still
/// warming up, or when the computed confidence stays below the profile
/// minimum.
pub fn evaluate(
    snapshot: &IndicatorSnapshot,
    previous: &IndicatorSnapshot,
    profile: &StrategyProfile,
) -> Option<Signal> {
    let volatility = snapshot.volatility_pct?;
    if volatility > profile.max_volatility {
        return None;
    }
    let atr = snapshot.atr?;
    // Slowest window in the snapshot; nothing trades until the whole
    // snapshot is warm, whichever family is active.
    snapshot.ema_slow?;

    let (direction, confidence) = match profile.kind {
        StrategyKind::TrendFollowing => trend_following::evaluate(snapshot, previous, profile)?,
        StrategyKind::MeanReversion => mean_reversion::evaluate(snapshot, profile)?,
        StrategyKind::Momentum => momentum::evaluate(snapshot, previous, profile)?,
        StrategyKind::RangeTrading => range_trading::evaluate(snapshot, profile)?,
    };

    if confidence < profile.min_confidence {
        return None;
    }

    debug!(
        kind = %profile.kind,
        %direction,
        confidence,
        price = snapshot.close,
        "entry signal"
    );

    Some(Signal {
        direction,
        kind: profile.kind,
        confidence,
        reference_price: snapshot.close,
        atr_at_signal: atr,
        volatility_at_signal: volatility,
    })
}

/// Outcome of a single rule family: direction plus raw confidence.
pub(crate) type FamilyVerdict = (Direction, f64);

#[cfg(test)]
pub(crate) mod test_support {
    use crate::indicators::IndicatorSnapshot;

    /// Snapshot with every window warm and neutral values; tests override
    /// the fields a rule looks at.
    pub fn warm_snapshot() -> IndicatorSnapshot {
        IndicatorSnapshot {
            close: 100.0,
            change_pct: Some(0.0),
            range_position: Some(0.5),
            atr: Some(1.5),
            rsi: Some(50.0),
            ema_fast: Some(100.0),
            ema_slow: Some(100.0),
            macd: Some(0.0),
            macd_signal: Some(0.0),
            macd_histogram: Some(0.0),
            bollinger_upper: Some(102.0),
            bollinger_middle: Some(100.0),
            bollinger_lower: Some(98.0),
            bollinger_position: Some(0.5),
            volatility_pct: Some(2.0),
            volume_ratio: Some(1.0),
            volume_trend: Some(1.0),
            trend_strength: Some(0.0),
            is_uptrend: Some(false),
        }
    }
}
