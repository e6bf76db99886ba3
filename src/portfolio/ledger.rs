//! Run-scoped capital ledger

use serde::{Deserialize, Serialize};

/// Capital state for one backtest run.
///
/// Created at run start, mutated only by the backtest loop, and dropped when
/// the run completes. Never shared across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapitalLedger {
    /// Capital the run started with
    pub initial_capital: f64,
    /// Current capital
    pub capital: f64,
    /// Highest capital seen so far
    pub peak_capital: f64,
    /// Worst peak-to-trough decline, percent
    pub max_drawdown_pct: f64,
    /// Total commissions charged so far
    pub commission_paid: f64,
}

impl CapitalLedger {
    /// Create a ledger with the configured starting capital
    pub fn new(initial_capital: f64) -> Self {
        Self {
            initial_capital,
            capital: initial_capital,
            peak_capital: initial_capital,
            max_drawdown_pct: 0.0,
            commission_paid: 0.0,
        }
    }

    /// Update peak capital and max drawdown from the current capital.
    ///
    /// Called once per candle by the backtest loop.
    pub fn mark(&mut self) {
        if self.capital > self.peak_capital {
            self.peak_capital = self.capital;
        }
        let drawdown = (self.peak_capital - self.capital) / self.peak_capital * 100.0;
        if drawdown > self.max_drawdown_pct {
            self.max_drawdown_pct = drawdown;
        }
    }

    /// Deduct a commission charge
    pub fn charge_commission(&mut self, amount: f64) {
        self.capital -= amount;
        self.commission_paid += amount;
    }

    /// Apply a settled trade: pnl credited, exit commission charged
    pub fn settle(&mut self, pnl: f64, exit_commission: f64) {
        self.capital += pnl;
        self.charge_commission(exit_commission);
    }

    /// Total return over the initial capital, percent
    pub fn total_return_pct(&self) -> f64 {
        (self.capital - self.initial_capital) / self.initial_capital * 100.0
    }
}
