//! Run-level settings

use serde::{Deserialize, Serialize};

/// Run-level simulation constants, shared by every (symbol, timeframe) run.
///
/// These are deliberately not part of the per-pair profiles: risk fraction,
/// leverage and commission describe the account, not the strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSettings {
    /// Starting capital for each run
    pub initial_capital: f64,
    /// Fraction of capital risked per trade (e.g. 0.02 = 2%)
    pub risk_per_trade: f64,
    /// Leverage applied to every position
    pub leverage: f64,
    /// Commission rate per fill (e.g. 0.0004 = 4 bps)
    pub commission_rate: f64,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            initial_capital: 220.0,
            risk_per_trade: 0.02,
            leverage: 3.0,
            commission_rate: 0.0004,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = RunSettings::default();
        assert_eq!(settings.initial_capital, 220.0);
        assert_eq!(settings.risk_per_trade, 0.02);
        assert_eq!(settings.leverage, 3.0);
        assert_eq!(settings.commission_rate, 0.0004);
    }
}
