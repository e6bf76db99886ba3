//! Per-candle indicator snapshot engine

use crate::data::{Candle, CandleSeries};
use crate::indicators::{BollingerBands, Indicator, ATR, EMA, MACD, RSI, VolumeProfile};

/// Fast EMA window
pub const EMA_FAST_PERIOD: usize = 20;
/// Slow EMA window
pub const EMA_SLOW_PERIOD: usize = 50;
/// RSI window
pub const RSI_PERIOD: usize = 14;
/// ATR window
pub const ATR_PERIOD: usize = 14;
/// Bollinger window
pub const BOLLINGER_PERIOD: usize = 20;
/// Bollinger band width in standard deviations
pub const BOLLINGER_STD_DEV: f64 = 2.0;
/// MACD fast EMA window
pub const MACD_FAST_PERIOD: usize = 12;
/// MACD slow EMA window
pub const MACD_SLOW_PERIOD: usize = 26;
/// MACD signal EMA window
pub const MACD_SIGNAL_PERIOD: usize = 9;
/// Short volume averaging window
pub const VOLUME_SHORT_PERIOD: usize = 5;
/// Long volume averaging window
pub const VOLUME_LONG_PERIOD: usize = 20;

/// Guard added to the bar range when normalizing the close position.
const RANGE_EPSILON: f64 = 1e-5;

/// Derived indicator values for one candle.
///
/// Every field is `None` until its trailing window is full; a `None` input
/// makes downstream rules evaluate to "no signal", never an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndicatorSnapshot {
    /// Close the snapshot was computed at
    pub close: f64,
    /// Close-over-close change, percent
    pub change_pct: Option<f64>,
    /// Close position inside the bar range (0 at low, 1 at high)
    pub range_position: Option<f64>,
    /// Average true range
    pub atr: Option<f64>,
    /// Relative strength index
    pub rsi: Option<f64>,
    /// Fast (20-bar) EMA of closes
    pub ema_fast: Option<f64>,
    /// Slow (50-bar) EMA of closes
    pub ema_slow: Option<f64>,
    /// MACD line
    pub macd: Option<f64>,
    /// MACD signal line
    pub macd_signal: Option<f64>,
    /// MACD histogram
    pub macd_histogram: Option<f64>,
    /// Upper Bollinger band
    pub bollinger_upper: Option<f64>,
    /// Middle Bollinger band
    pub bollinger_middle: Option<f64>,
    /// Lower Bollinger band
    pub bollinger_lower: Option<f64>,
    /// Close position inside the Bollinger band (0 lower, 1 upper)
    pub bollinger_position: Option<f64>,
    /// Bar range over close, percent
    pub volatility_pct: Option<f64>,
    /// Bar volume over its 20-bar average
    pub volume_ratio: Option<f64>,
    /// 5-bar over 20-bar average volume
    pub volume_trend: Option<f64>,
    /// EMA spread over close, percent
    pub trend_strength: Option<f64>,
    /// Fast EMA above slow EMA
    pub is_uptrend: Option<bool>,
}

/// Streaming indicator engine: feed candles in order, get one snapshot per
/// candle. Pure with respect to the input series; recomputation over the
/// same candles yields identical snapshots.
#[derive(Debug)]
pub struct IndicatorEngine {
    ema_fast: EMA,
    ema_slow: EMA,
    rsi: RSI,
    atr: ATR,
    macd: MACD,
    bollinger: BollingerBands,
    volume: VolumeProfile,
    prev_close: Option<f64>,
}

impl IndicatorEngine {
    /// Create an engine with the standard windows
    pub fn new() -> Self {
        Self {
            ema_fast: EMA::new(EMA_FAST_PERIOD),
            ema_slow: EMA::new(EMA_SLOW_PERIOD),
            rsi: RSI::new(RSI_PERIOD),
            atr: ATR::new(ATR_PERIOD),
            macd: MACD::new(MACD_FAST_PERIOD, MACD_SLOW_PERIOD, MACD_SIGNAL_PERIOD),
            bollinger: BollingerBands::new(BOLLINGER_PERIOD, BOLLINGER_STD_DEV),
            volume: VolumeProfile::new(VOLUME_SHORT_PERIOD, VOLUME_LONG_PERIOD),
            prev_close: None,
        }
    }

    /// Advance all indicators by one candle and return its snapshot
    pub fn update(&mut self, candle: &Candle) -> IndicatorSnapshot {
        let change_pct = self
            .prev_close
            .map(|prev| (candle.close - prev) / prev * 100.0);
        self.prev_close = Some(candle.close);

        self.ema_fast.update(candle.close);
        self.ema_slow.update(candle.close);
        self.rsi.update(candle.close);
        self.atr.update(candle.high, candle.low, candle.close);
        self.macd.update(candle.close);
        self.bollinger.update(candle.close);
        self.volume.update(candle.volume);

        let ema_fast = self.ema_fast.value();
        let ema_slow = self.ema_slow.value();
        let trend_strength = match (ema_fast, ema_slow) {
            (Some(fast), Some(slow)) => Some((fast - slow).abs() / candle.close * 100.0),
            _ => None,
        };
        let is_uptrend = match (ema_fast, ema_slow) {
            (Some(fast), Some(slow)) => Some(fast > slow),
            _ => None,
        };

        let bands = self.bollinger.value();

        IndicatorSnapshot {
            close: candle.close,
            change_pct,
            range_position: Some(
                (candle.close - candle.low) / (candle.high - candle.low + RANGE_EPSILON),
            ),
            atr: self.atr.value(),
            rsi: self.rsi.value(),
            ema_fast,
            ema_slow,
            macd: self.macd.macd(),
            macd_signal: self.macd.signal(),
            macd_histogram: self.macd.histogram(),
            bollinger_upper: bands.map(|b| b.upper),
            bollinger_middle: bands.map(|b| b.middle),
            bollinger_lower: bands.map(|b| b.lower),
            bollinger_position: self.bollinger.position(candle.close),
            volatility_pct: Some(candle.volatility_pct()),
            volume_ratio: self.volume.ratio(),
            volume_trend: self.volume.trend(),
            trend_strength,
            is_uptrend,
        }
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the snapshot sequence for a whole series.
///
/// The output has the same length and order as the input candles.
pub fn compute_snapshots(series: &CandleSeries) -> Vec<IndicatorSnapshot> {
    let mut engine = IndicatorEngine::new();
    series
        .candles()
        .iter()
        .map(|candle| engine.update(candle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Timeframe;
    use chrono::{TimeZone, Utc};

    fn series_of(closes: &[f64]) -> CandleSeries {
        let candles = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let ts = Utc.timestamp_opt(1_700_000_000 + i as i64 * 3600, 0).unwrap();
                Candle::new(ts, close, close + 1.0, close - 1.0, close, 1000.0)
            })
            .collect();
        CandleSeries::from_candles("BTCUSDT", Timeframe::H1, candles)
    }

    #[test]
    fn test_snapshot_length_matches_series() {
        let closes: Vec<f64> = (0..120).map(|i| 100.0 + (i % 7) as f64).collect();
        let series = series_of(&closes);
        let snapshots = compute_snapshots(&series);
        assert_eq!(snapshots.len(), series.len());
    }

    #[test]
    fn test_warm_up_nulls() {
        let closes: Vec<f64> = (0..120).map(|i| 100.0 + (i % 7) as f64).collect();
        let snapshots = compute_snapshots(&series_of(&closes));

        assert_eq!(snapshots[0].change_pct, None);
        assert!(snapshots[1].change_pct.is_some());

        // Windowed values appear exactly when their window fills
        assert_eq!(snapshots[EMA_SLOW_PERIOD - 2].ema_slow, None);
        assert!(snapshots[EMA_SLOW_PERIOD - 1].ema_slow.is_some());
        assert_eq!(snapshots[EMA_SLOW_PERIOD - 2].is_uptrend, None);
        assert!(snapshots[EMA_SLOW_PERIOD - 1].is_uptrend.is_some());

        assert_eq!(snapshots[RSI_PERIOD - 1].rsi, None);
        assert!(snapshots[RSI_PERIOD].rsi.is_some());

        assert_eq!(snapshots[ATR_PERIOD - 2].atr, None);
        assert!(snapshots[ATR_PERIOD - 1].atr.is_some());

        assert_eq!(snapshots[BOLLINGER_PERIOD - 2].bollinger_position, None);
        assert!(snapshots[BOLLINGER_PERIOD - 1].bollinger_position.is_some());

        let signal_ready = MACD_SLOW_PERIOD + MACD_SIGNAL_PERIOD - 1;
        assert_eq!(snapshots[signal_ready - 2].macd_signal, None);
        assert!(snapshots[signal_ready - 1].macd_signal.is_some());
    }

    #[test]
    fn test_recompute_is_bit_identical() {
        let closes: Vec<f64> = (0..200)
            .map(|i| 100.0 + ((i * 13) % 29) as f64 * 0.7)
            .collect();
        let series = series_of(&closes);
        assert_eq!(compute_snapshots(&series), compute_snapshots(&series));
    }
}
