//! Bollinger Bands indicator

use std::collections::VecDeque;

/// Guard added to the band width when normalizing the close position.
const BAND_EPSILON: f64 = 1e-5;

/// Bollinger Bands: SMA middle band with sample-stddev envelopes
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev: f64,
    window: VecDeque<f64>,
}

/// One bar's band values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerOutput {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands indicator
    pub fn new(period: usize, std_dev: f64) -> Self {
        Self {
            period,
            std_dev,
            window: VecDeque::with_capacity(period + 1),
        }
    }

    /// Update with a new close
    pub fn update(&mut self, value: f64) {
        self.window.push_back(value);
        if self.window.len() > self.period {
            self.window.pop_front();
        }
    }

    /// Current band values; `None` until the window is full
    pub fn value(&self) -> Option<BollingerOutput> {
        if !self.is_ready() {
            return None;
        }
        let n = self.period as f64;
        let mean = self.window.iter().sum::<f64>() / n;
        // Sample standard deviation (ddof = 1)
        let variance = self
            .window
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / (n - 1.0);
        let band = variance.sqrt() * self.std_dev;
        Some(BollingerOutput {
            upper: mean + band,
            middle: mean,
            lower: mean - band,
        })
    }

    /// Check if the window is full
    pub fn is_ready(&self) -> bool {
        self.window.len() >= self.period
    }

    /// Position of `close` inside the band, 0 at the lower band and 1 at the
    /// upper band; may leave [0, 1] when the close escapes the bands.
    pub fn position(&self, close: f64) -> Option<f64> {
        let bands = self.value()?;
        Some((close - bands.lower) / (bands.upper - bands.lower + BAND_EPSILON))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bollinger_known_window() {
        let mut bb = BollingerBands::new(4, 2.0);
        for value in [1.0, 2.0, 3.0] {
            bb.update(value);
        }
        assert!(bb.value().is_none());

        bb.update(4.0);
        let out = bb.value().unwrap();
        // mean = 2.5, sample variance = ((1.5^2)*2 + (0.5^2)*2) / 3 = 5/3
        let expected_band = (5.0f64 / 3.0).sqrt() * 2.0;
        assert!((out.middle - 2.5).abs() < 1e-12);
        assert!((out.upper - (2.5 + expected_band)).abs() < 1e-12);
        assert!((out.lower - (2.5 - expected_band)).abs() < 1e-12);
    }

    #[test]
    fn test_position_normalized() {
        let mut bb = BollingerBands::new(3, 2.0);
        for value in [10.0, 12.0, 14.0] {
            bb.update(value);
        }
        let bands = bb.value().unwrap();
        let mid_pos = bb.position(bands.middle).unwrap();
        assert!((mid_pos - 0.5).abs() < 1e-3);
        assert!(bb.position(bands.lower).unwrap() < 0.01);
        assert!(bb.position(bands.upper).unwrap() > 0.99);
    }
}
