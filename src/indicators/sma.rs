//! SMA (Simple Moving Average) indicator

use crate::indicators::Indicator;
use std::collections::VecDeque;

/// Simple moving average over a trailing fixed-length window
#[derive(Debug, Clone)]
pub struct SMA {
    period: usize,
    window: VecDeque<f64>,
    sum: f64,
}

impl SMA {
    /// Create new SMA indicator
    pub fn new(period: usize) -> Self {
        Self {
            period,
            window: VecDeque::with_capacity(period + 1),
            sum: 0.0,
        }
    }

    /// Get SMA period
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for SMA {
    fn name(&self) -> &str {
        "SMA"
    }

    fn update(&mut self, value: f64) {
        self.window.push_back(value);
        self.sum += value;
        if self.window.len() > self.period {
            if let Some(evicted) = self.window.pop_front() {
                self.sum -= evicted;
            }
        }
    }

    fn value(&self) -> Option<f64> {
        if self.is_ready() {
            Some(self.sum / self.period as f64)
        } else {
            None
        }
    }

    fn is_ready(&self) -> bool {
        self.window.len() >= self.period
    }
}

/// Calculate SMA from a series of values
pub fn calculate_sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut sma = SMA::new(period);
    let mut results = Vec::new();

    for &value in values {
        sma.update(value);
        results.push(sma.value());
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_rolls_window() {
        let mut sma = SMA::new(3);
        sma.update(1.0);
        sma.update(2.0);
        assert_eq!(sma.value(), None);

        sma.update(3.0);
        assert!((sma.value().unwrap() - 2.0).abs() < 1e-12);

        sma.update(4.0);
        assert!((sma.value().unwrap() - 3.0).abs() < 1e-12);
    }
}
