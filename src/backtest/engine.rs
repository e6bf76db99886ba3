//! Backtest loop and position lifecycle

use crate::config::{RunSettings, StrategyProfile};
use crate::data::{CandleSeries, Timeframe};
use crate::indicators::compute_snapshots;
use crate::portfolio::{size_position, CapitalLedger, ExitReason, Position, Trade};
use crate::strategy::rules;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Result of one (symbol, timeframe) backtest run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Symbol the run replayed
    pub symbol: String,
    /// Timeframe the run replayed
    pub timeframe: Timeframe,
    /// Settled trades in close order
    pub trades: Vec<Trade>,
    /// Capital the run started with
    pub initial_capital: f64,
    /// Capital after the last candle
    pub final_capital: f64,
    /// Worst peak-to-trough capital decline, percent
    pub max_drawdown_pct: f64,
    /// Total commissions charged
    pub commission_paid: f64,
    /// Position still open at series end; unsettled and excluded from trades
    pub open_position: Option<Position>,
}

/// Position lifecycle state: flat, or exactly one open position.
#[derive(Debug)]
enum PositionState {
    Flat,
    Open(Position),
}

/// Candle-by-candle backtest engine.
///
/// Deterministic and causal: each step sees only candles up to the current
/// index, and at most one position is open at any time.
#[derive(Debug, Clone)]
pub struct BacktestEngine {
    settings: RunSettings,
}

impl BacktestEngine {
    /// Create an engine with the given run settings
    pub fn new(settings: RunSettings) -> Self {
        Self { settings }
    }

    /// Run settings in effect
    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Replay the series against the profile and settle trades.
    ///
    /// A position opened on candle `i` is first checked for exits on candle
    /// `i + 1`; a position still open after the last candle is left
    /// unsettled.
    pub fn run(&self, series: &CandleSeries, profile: &StrategyProfile) -> RunReport {
        let snapshots = compute_snapshots(series);
        let mut ledger = CapitalLedger::new(self.settings.initial_capital);
        let mut trades: Vec<Trade> = Vec::new();
        let mut state = PositionState::Flat;
        let max_hold_bars = series.timeframe().max_hold_bars();

        for (index, candle) in series.candles().iter().enumerate() {
            ledger.mark();

            state = match state {
                PositionState::Flat => {
                    if index == 0 {
                        PositionState::Flat
                    } else {
                        match rules::evaluate(&snapshots[index], &snapshots[index - 1], profile) {
                            Some(signal) => {
                                let bracket = size_position(
                                    &signal,
                                    profile,
                                    &self.settings,
                                    ledger.capital,
                                );
                                let position = Position {
                                    direction: signal.direction,
                                    entry_price: signal.reference_price,
                                    stop_loss: bracket.stop_loss,
                                    take_profit: bracket.take_profit,
                                    size: bracket.size,
                                    entry_index: index,
                                    kind: signal.kind,
                                    confidence: signal.confidence,
                                };
                                let entry_commission =
                                    position.entry_value() * self.settings.commission_rate;
                                ledger.charge_commission(entry_commission);
                                debug!(
                                    index,
                                    direction = %position.direction,
                                    entry = position.entry_price,
                                    stop = position.stop_loss,
                                    target = position.take_profit,
                                    "open position"
                                );
                                PositionState::Open(position)
                            }
                            None => PositionState::Flat,
                        }
                    }
                }
                PositionState::Open(position) => {
                    let exit = position.bracket_exit(candle).or_else(|| {
                        if position.bars_held(index) > max_hold_bars {
                            Some((candle.close, ExitReason::TimeExit))
                        } else {
                            None
                        }
                    });

                    match exit {
                        Some((exit_price, exit_reason)) => {
                            let pnl_pct = position.pnl_pct(exit_price, self.settings.leverage);
                            let pnl = ledger.capital * pnl_pct;
                            let exit_commission =
                                position.size * exit_price * self.settings.commission_rate;
                            ledger.settle(pnl, exit_commission);
                            debug!(
                                index,
                                %exit_reason,
                                exit = exit_price,
                                pnl,
                                capital = ledger.capital,
                                "close position"
                            );
                            trades.push(Trade {
                                direction: position.direction,
                                kind: position.kind,
                                entry_price: position.entry_price,
                                exit_price,
                                pnl,
                                pnl_pct: pnl_pct * 100.0,
                                exit_reason,
                                bars_held: position.bars_held(index),
                                confidence: position.confidence,
                            });
                            PositionState::Flat
                        }
                        None => PositionState::Open(position),
                    }
                }
            };
        }

        let open_position = match state {
            PositionState::Open(position) => Some(position),
            PositionState::Flat => None,
        };
        info!(
            symbol = series.symbol(),
            timeframe = %series.timeframe(),
            trades = trades.len(),
            final_capital = ledger.capital,
            max_drawdown_pct = ledger.max_drawdown_pct,
            "backtest run complete"
        );

        RunReport {
            symbol: series.symbol().to_string(),
            timeframe: series.timeframe(),
            trades,
            initial_capital: ledger.initial_capital,
            final_capital: ledger.capital,
            max_drawdown_pct: ledger.max_drawdown_pct,
            commission_paid: ledger.commission_paid,
            open_position,
        }
    }
}
