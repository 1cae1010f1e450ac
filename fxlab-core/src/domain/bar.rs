//! Bar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLC bar for a single currency pair.
///
/// Bars are assumed chronologically sorted and duplicate-free by the time
/// they reach the engine; the ingestion layer enforces this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    /// Basic OHLC sanity check: high >= low, high/low bracket open and close,
    /// all prices strictly positive.
    pub fn is_sane(&self) -> bool {
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.low > 0.0
    }
}

/// A bar with an externally attached directional forecast.
///
/// The signal is the value produced by the forecast collaborator at the
/// close of this bar; the engine trades it over the *next* bar. Only `+1`
/// means Long — every other value (including `0`) is traded as Short.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalBar {
    pub bar: Bar,
    pub signal: i8,
}

impl SignalBar {
    pub fn new(bar: Bar, signal: i8) -> Self {
        Self { bar, signal }
    }
}

/// Trade direction derived from a raw signal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// `+1` is Long; any other value collapses to Short. There is no flat
    /// state in this system.
    pub fn from_signal(signal: i8) -> Self {
        if signal == 1 {
            Direction::Long
        } else {
            Direction::Short
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
        }
    }
}
