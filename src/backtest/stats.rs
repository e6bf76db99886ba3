//! Backtest performance statistics

use crate::backtest::RunReport;
use crate::config::StrategyKind;
use crate::portfolio::{ExitReason, Trade};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Aggregates for one trade grouping
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupStats {
    /// Trades in the group
    pub trades: usize,
    /// Winning trades in the group
    pub wins: usize,
    /// Summed profit/loss of the group
    pub total_pnl: f64,
    /// Win rate, percent
    pub win_rate: f64,
}

impl GroupStats {
    fn record(&mut self, trade: &Trade) {
        self.trades += 1;
        self.total_pnl += trade.pnl;
        if trade.pnl > 0.0 {
            self.wins += 1;
        }
        self.win_rate = self.wins as f64 / self.trades as f64 * 100.0;
    }
}

/// Read-only reduction over a finished run.
///
/// An empty trade list produces an all-zero result, never an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    /// Settled trades
    pub total_trades: usize,
    /// Trades with positive pnl
    pub winning_trades: usize,
    /// Trades with zero or negative pnl
    pub losing_trades: usize,
    /// Win rate, percent
    pub win_rate: f64,
    /// Mean pnl of winning trades
    pub avg_win: f64,
    /// Mean pnl of losing trades (non-positive)
    pub avg_loss: f64,
    /// Gross wins over absolute gross losses
    pub profit_factor: f64,
    /// Mean over standard deviation of per-trade returns
    pub sharpe_ratio: f64,
    /// Total return over initial capital, percent
    pub total_return_pct: f64,
    /// Capital after the run
    pub final_capital: f64,
    /// Worst drawdown observed live during the run, percent
    pub max_drawdown_pct: f64,
    /// Per-rule-family breakdown
    pub by_strategy: HashMap<StrategyKind, GroupStats>,
    /// Per-exit-reason breakdown
    pub by_exit_reason: HashMap<ExitReason, GroupStats>,
}

impl Statistics {
    /// Reduce a finished run report to its statistics
    pub fn from_report(report: &RunReport) -> Self {
        let trades = &report.trades;
        if trades.is_empty() {
            return Self {
                final_capital: report.final_capital,
                ..Self::default()
            };
        }

        let total_trades = trades.len();
        let winning: Vec<&Trade> = trades.iter().filter(|t| t.pnl > 0.0).collect();
        let losing: Vec<&Trade> = trades.iter().filter(|t| t.pnl <= 0.0).collect();

        let gross_profit: f64 = winning.iter().map(|t| t.pnl).sum();
        let gross_loss: f64 = losing.iter().map(|t| t.pnl).sum::<f64>().abs();

        let avg_win = if winning.is_empty() {
            0.0
        } else {
            gross_profit / winning.len() as f64
        };
        let avg_loss = if losing.is_empty() {
            0.0
        } else {
            losing.iter().map(|t| t.pnl).sum::<f64>() / losing.len() as f64
        };

        // Zero-loss runs divide by 1 instead of blowing up to infinity
        let profit_factor = if gross_loss > 0.0 {
            gross_profit / gross_loss
        } else {
            gross_profit
        };

        let sharpe_ratio = sharpe(trades);

        let mut by_strategy: HashMap<StrategyKind, GroupStats> = HashMap::new();
        let mut by_exit_reason: HashMap<ExitReason, GroupStats> = HashMap::new();
        for trade in trades {
            by_strategy.entry(trade.kind).or_default().record(trade);
            by_exit_reason
                .entry(trade.exit_reason)
                .or_default()
                .record(trade);
        }

        Self {
            total_trades,
            winning_trades: winning.len(),
            losing_trades: losing.len(),
            win_rate: winning.len() as f64 / total_trades as f64 * 100.0,
            avg_win,
            avg_loss,
            profit_factor,
            sharpe_ratio,
            total_return_pct: (report.final_capital - report.initial_capital)
                / report.initial_capital
                * 100.0,
            final_capital: report.final_capital,
            max_drawdown_pct: report.max_drawdown_pct,
            by_strategy,
            by_exit_reason,
        }
    }
}

/// Mean over population standard deviation of per-trade returns; zero when
/// fewer than two trades or no variance.
fn sharpe(trades: &[Trade]) -> f64 {
    if trades.len() < 2 {
        return 0.0;
    }
    let returns: Vec<f64> = trades.iter().map(|t| t.pnl_pct / 100.0).collect();
    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / returns.len() as f64;
    let std_dev = variance.sqrt();
    if std_dev > 0.0 {
        mean / std_dev
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Timeframe;
    use crate::strategy::Direction;

    fn trade(kind: StrategyKind, exit_reason: ExitReason, pnl: f64) -> Trade {
        Trade {
            direction: Direction::Long,
            kind,
            entry_price: 100.0,
            exit_price: 100.0 + pnl,
            pnl,
            pnl_pct: pnl,
            exit_reason,
            bars_held: 5,
            confidence: 60.0,
        }
    }

    fn report(trades: Vec<Trade>, final_capital: f64) -> RunReport {
        RunReport {
            symbol: "BTCUSDT".to_string(),
            timeframe: Timeframe::H1,
            trades,
            initial_capital: 200.0,
            final_capital,
            max_drawdown_pct: 4.2,
            commission_paid: 0.4,
            open_position: None,
        }
    }

    #[test]
    fn test_empty_trades_yield_zeroed_statistics() {
        let stats = Statistics::from_report(&report(Vec::new(), 200.0));
        assert_eq!(stats.total_trades, 0);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.profit_factor, 0.0);
        assert_eq!(stats.sharpe_ratio, 0.0);
        assert!(stats.by_strategy.is_empty());
        assert!(stats.by_exit_reason.is_empty());
    }

    #[test]
    fn test_mixed_trades() {
        let trades = vec![
            trade(StrategyKind::Momentum, ExitReason::TakeProfit, 10.0),
            trade(StrategyKind::Momentum, ExitReason::StopLoss, -4.0),
            trade(StrategyKind::MeanReversion, ExitReason::TimeExit, 2.0),
            trade(StrategyKind::MeanReversion, ExitReason::StopLoss, -6.0),
        ];
        let stats = Statistics::from_report(&report(trades, 202.0));

        assert_eq!(stats.total_trades, 4);
        assert_eq!(stats.winning_trades, 2);
        assert_eq!(stats.losing_trades, 2);
        assert_eq!(stats.win_rate, 50.0);
        assert!((stats.avg_win - 6.0).abs() < 1e-12);
        assert!((stats.avg_loss + 5.0).abs() < 1e-12);
        assert!((stats.profit_factor - 1.2).abs() < 1e-12);
        assert!((stats.total_return_pct - 1.0).abs() < 1e-12);
        assert_eq!(stats.max_drawdown_pct, 4.2);

        let momentum = &stats.by_strategy[&StrategyKind::Momentum];
        assert_eq!(momentum.trades, 2);
        assert_eq!(momentum.wins, 1);
        assert!((momentum.total_pnl - 6.0).abs() < 1e-12);
        assert_eq!(momentum.win_rate, 50.0);

        let stops = &stats.by_exit_reason[&ExitReason::StopLoss];
        assert_eq!(stops.trades, 2);
        assert_eq!(stops.wins, 0);
    }

    #[test]
    fn test_zero_loss_profit_factor_is_gross_wins() {
        let trades = vec![
            trade(StrategyKind::Momentum, ExitReason::TakeProfit, 3.0),
            trade(StrategyKind::Momentum, ExitReason::TakeProfit, 5.0),
        ];
        let stats = Statistics::from_report(&report(trades, 208.0));
        assert!((stats.profit_factor - 8.0).abs() < 1e-12);
        assert_eq!(stats.losing_trades, 0);
        assert_eq!(stats.avg_loss, 0.0);
    }
}
