//! ATR (Average True Range) indicator

use std::collections::VecDeque;

/// Average True Range: rolling arithmetic mean of the True Range.
///
/// TR = max(high - low, |high - prev_close|, |low - prev_close|); the first
/// bar has no previous close and contributes high - low.
#[derive(Debug, Clone)]
pub struct ATR {
    period: usize,
    prev_close: Option<f64>,
    window: VecDeque<f64>,
    sum: f64,
}

impl ATR {
    /// Create new ATR indicator
    pub fn new(period: usize) -> Self {
        Self {
            period,
            prev_close: None,
            window: VecDeque::with_capacity(period + 1),
            sum: 0.0,
        }
    }

    /// Get ATR period
    pub fn period(&self) -> usize {
        self.period
    }

    /// Update with a full bar
    pub fn update(&mut self, high: f64, low: f64, close: f64) {
        let tr = match self.prev_close {
            Some(prev) => (high - low)
                .max((high - prev).abs())
                .max((low - prev).abs()),
            None => high - low,
        };
        self.prev_close = Some(close);

        self.window.push_back(tr);
        self.sum += tr;
        if self.window.len() > self.period {
            if let Some(evicted) = self.window.pop_front() {
                self.sum -= evicted;
            }
        }
    }

    /// Current ATR; `None` until the window is full
    pub fn value(&self) -> Option<f64> {
        if self.is_ready() {
            Some(self.sum / self.period as f64)
        } else {
            None
        }
    }

    /// Check if the window is full
    pub fn is_ready(&self) -> bool {
        self.window.len() >= self.period
    }
}
