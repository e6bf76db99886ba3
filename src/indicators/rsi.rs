//! RSI (Relative Strength Index) indicator

use crate::indicators::Indicator;

/// Denominator guard so a zero-loss window yields RSI ~= 100 instead of a
/// division by zero.
const RS_EPSILON: f64 = 1e-5;

/// Wilder-smoothed RSI.
///
/// The average gain/loss pair is seeded with the arithmetic mean of the
/// first `period` deltas and smoothed from there.
#[derive(Debug, Clone)]
pub struct RSI {
    period: usize,
    prev_close: Option<f64>,
    avg_gain: f64,
    avg_loss: f64,
    gain_sum: f64,
    loss_sum: f64,
    delta_count: usize,
    last_value: Option<f64>,
}

impl RSI {
    /// Create new RSI indicator
    pub fn new(period: usize) -> Self {
        Self {
            period,
            prev_close: None,
            avg_gain: 0.0,
            avg_loss: 0.0,
            gain_sum: 0.0,
            loss_sum: 0.0,
            delta_count: 0,
            last_value: None,
        }
    }

    /// Get RSI period
    pub fn period(&self) -> usize {
        self.period
    }

    fn recompute(&mut self) {
        let rs = self.avg_gain / (self.avg_loss + RS_EPSILON);
        self.last_value = Some(100.0 - 100.0 / (1.0 + rs));
    }
}

impl Indicator for RSI {
    fn name(&self) -> &str {
        "RSI"
    }

    fn update(&mut self, value: f64) {
        let prev = match self.prev_close.replace(value) {
            Some(prev) => prev,
            None => return,
        };

        let change = value - prev;
        let gain = change.max(0.0);
        let loss = (-change).max(0.0);
        self.delta_count += 1;

        if self.delta_count < self.period {
            self.gain_sum += gain;
            self.loss_sum += loss;
        } else if self.delta_count == self.period {
            self.gain_sum += gain;
            self.loss_sum += loss;
            self.avg_gain = self.gain_sum / self.period as f64;
            self.avg_loss = self.loss_sum / self.period as f64;
            self.recompute();
        } else {
            let w = self.period as f64;
            self.avg_gain = (self.avg_gain * (w - 1.0) + gain) / w;
            self.avg_loss = (self.avg_loss * (w - 1.0) + loss) / w;
            self.recompute();
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }

    fn is_ready(&self) -> bool {
        self.delta_count >= self.period
    }
}

/// Calculate RSI from a series of values
pub fn calculate_rsi(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut rsi = RSI::new(period);
    let mut results = Vec::new();

    for &value in values {
        rsi.update(value);
        results.push(rsi.value());
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_warm_up() {
        let mut rsi = RSI::new(14);
        for i in 0..14 {
            rsi.update(100.0 + i as f64);
        }
        // 14 closes = 13 deltas: one short of a full window
        assert!(!rsi.is_ready());
        assert_eq!(rsi.value(), None);

        rsi.update(114.0);
        assert!(rsi.is_ready());
        assert!(rsi.value().is_some());
    }

    #[test]
    fn test_rsi_extremes() {
        // Monotonic rise: zero-loss window, RSI pinned at the top
        let rising: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let out = calculate_rsi(&rising, 14);
        let last = out.last().unwrap().unwrap();
        assert!(last > 99.0, "zero-loss RSI should be ~100, got {last}");

        // Monotonic fall: zero-gain window, RSI pinned at the bottom
        let falling: Vec<f64> = (0..30).map(|i| 100.0 - i as f64).collect();
        let out = calculate_rsi(&falling, 14);
        let last = out.last().unwrap().unwrap();
        assert!(last < 1.0, "zero-gain RSI should be ~0, got {last}");
    }

    #[test]
    fn test_rsi_bounded() {
        let closes: Vec<f64> = (0..60)
            .map(|i| 100.0 + ((i * 7) % 13) as f64 - 6.0)
            .collect();
        for value in calculate_rsi(&closes, 14).into_iter().flatten() {
            assert!((0.0..=100.0).contains(&value));
        }
    }
}
