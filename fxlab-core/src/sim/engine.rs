//! Bar-by-bar execution loop.
//!
//! The signal is known at the close of day T; the trade occupies the whole
//! of day T+1: entry at the open, stop-loss monitored against the intraday
//! high/low, exit at the stop level or the close. Position sizing compounds
//! on the running capital, so the loop is an ordered fold, not a map.

use thiserror::Error;

use crate::domain::{Direction, EquityPoint, SignalBar, Trade};
use crate::sim::config::{ConfigError, SimConfig};

/// Output of one simulation run: the trade ledger and the equity curve,
/// in lockstep (`trades[i]` settles into `equity[i]`).
#[derive(Debug, Clone, PartialEq)]
pub struct SimResult {
    pub trades: Vec<Trade>,
    pub equity: Vec<EquityPoint>,
}

impl SimResult {
    /// Account value after the last trade, or `initial` if no trades ran.
    pub fn final_equity(&self, initial: f64) -> f64 {
        self.equity.last().map(|p| p.equity).unwrap_or(initial)
    }
}

/// Terminal failures for a simulation run. Nothing is partially computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("insufficient data: need at least 2 bars, got {bars}")]
    InsufficientData { bars: usize },
}

/// Run the simulation over an ordered bar sequence.
///
/// Pure function of its inputs: no state survives across calls, and two
/// runs with identical bars and config produce identical ledgers.
pub fn run(bars: &[SignalBar], config: &SimConfig) -> Result<SimResult, SimError> {
    config.validate()?;
    if bars.len() < 2 {
        return Err(SimError::InsufficientData { bars: bars.len() });
    }

    let cost = config.transaction_cost();
    let mut capital = config.initial_capital;
    let mut trades = Vec::with_capacity(bars.len() - 1);
    let mut equity = Vec::with_capacity(bars.len() - 1);

    for pair in bars.windows(2) {
        let signal_bar = &pair[0];
        let trade_bar = &pair[1].bar;

        let direction = Direction::from_signal(signal_bar.signal);
        let entry_price = trade_bar.open;

        // Sizing compounds: current capital, not initial.
        let position_value = capital * config.position_size_pct * config.leverage;
        let position_size = position_value / entry_price;

        let (stop_loss_price, stopped_out) = match direction {
            Direction::Long => {
                let stop = entry_price * (1.0 - config.stop_loss_pct);
                (stop, trade_bar.low <= stop)
            }
            Direction::Short => {
                let stop = entry_price * (1.0 + config.stop_loss_pct);
                (stop, trade_bar.high >= stop)
            }
        };

        let exit_price = if stopped_out {
            stop_loss_price
        } else {
            trade_bar.close
        };

        let price_move = match direction {
            Direction::Long => exit_price - entry_price - cost,
            Direction::Short => entry_price - exit_price - cost,
        };

        let pnl = position_size * price_move;
        capital += pnl;

        trades.push(Trade {
            date: trade_bar.date,
            direction,
            entry_price,
            exit_price,
            stop_loss_price,
            pnl,
            stopped_out,
            position_size,
        });
        equity.push(EquityPoint {
            date: trade_bar.date,
            equity: capital,
        });
    }

    Ok(SimResult { trades, equity })
}
