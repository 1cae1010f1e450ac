//! Trade — one simulated day-long position.

use super::bar::Direction;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Record of a single simulated trade.
///
/// Each trade spans exactly one bar: entry at the open, exit either at the
/// stop-loss level (if touched intraday) or at the close. Created once by
/// the engine and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Date of the bar the trade was executed on (signal date + 1).
    pub date: NaiveDate,
    pub direction: Direction,
    pub entry_price: f64,
    pub exit_price: f64,
    pub stop_loss_price: f64,
    /// Realized profit/loss in account currency, net of the spread cost.
    pub pnl: f64,
    pub stopped_out: bool,
    /// Position size in base-currency units.
    pub position_size: f64,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }
}

/// Single point in the equity curve: account value after a trade settles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}
