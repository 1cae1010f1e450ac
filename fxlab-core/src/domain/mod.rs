//! Domain types: bars, signals, trades, equity points.

pub mod bar;
pub mod trade;

pub use bar::{Bar, Direction, SignalBar};
pub use trade::{EquityPoint, Trade};
