//! Backtest report generation

use crate::backtest::{RunReport, Statistics};

/// Formatted summary of one backtest run
#[derive(Debug)]
pub struct BacktestReport {
    symbol: String,
    timeframe: String,
    statistics: Statistics,
    initial_capital: f64,
}

impl BacktestReport {
    /// Create new report from a run report
    pub fn new(report: &RunReport) -> Self {
        Self {
            symbol: report.symbol.clone(),
            timeframe: report.timeframe.as_str().to_string(),
            statistics: Statistics::from_report(report),
            initial_capital: report.initial_capital,
        }
    }

    /// Format report as string
    pub fn format(&self) -> String {
        let s = &self.statistics;
        let mut out = format!(
            r#"
Backtest Results: {} {}
================================
Starting Capital: ${:.2}
Final Capital: ${:.2}
Total Return: {:.2}%
Number of Trades: {}
Winning Trades: {}
Losing Trades: {}
Win Rate: {:.2}%
Average Win: ${:.2}
Average Loss: ${:.2}
Profit Factor: {:.2}
Sharpe Ratio: {:.2}
Maximum Drawdown: {:.2}%
"#,
            self.symbol,
            self.timeframe,
            self.initial_capital,
            s.final_capital,
            s.total_return_pct,
            s.total_trades,
            s.winning_trades,
            s.losing_trades,
            s.win_rate,
            s.avg_win,
            s.avg_loss,
            s.profit_factor,
            s.sharpe_ratio,
            s.max_drawdown_pct,
        );

        if !s.by_strategy.is_empty() {
            out.push_str("\nBy strategy:\n");
            let mut kinds: Vec<_> = s.by_strategy.iter().collect();
            kinds.sort_by_key(|(kind, _)| kind.as_str());
            for (kind, group) in kinds {
                out.push_str(&format!(
                    "  {:<16} {} trades, {:.1}% WR, ${:.2}\n",
                    kind, group.trades, group.win_rate, group.total_pnl
                ));
            }
        }

        if !s.by_exit_reason.is_empty() {
            out.push_str("\nBy exit reason:\n");
            let mut reasons: Vec<_> = s.by_exit_reason.iter().collect();
            reasons.sort_by_key(|(reason, _)| reason.as_str());
            for (reason, group) in reasons {
                out.push_str(&format!(
                    "  {:<16} {} trades, {:.1}% WR, ${:.2}\n",
                    reason, group.trades, group.win_rate, group.total_pnl
                ));
            }
        }

        out
    }

    /// Computed statistics
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Timeframe;

    #[test]
    fn test_format_empty_run() {
        let report = RunReport {
            symbol: "BTCUSDT".to_string(),
            timeframe: Timeframe::H1,
            trades: Vec::new(),
            initial_capital: 220.0,
            final_capital: 220.0,
            max_drawdown_pct: 0.0,
            commission_paid: 0.0,
            open_position: None,
        };
        let formatted = BacktestReport::new(&report).format();
        assert!(formatted.contains("BTCUSDT 1h"));
        assert!(formatted.contains("Number of Trades: 0"));
        assert!(!formatted.contains("By strategy"));
    }
}
