//! FxLab Core — signal-driven FX backtesting engine.
//!
//! This crate contains the heart of the system:
//! - Domain types (bars, signals, trades, equity points)
//! - CSV ingestion for French-locale EUR/USD exports
//! - Simulated ML forecast stream (seeded, accuracy-calibrated)
//! - Bar-by-bar execution loop with intrabar stop-loss monitoring and
//!   compounding position sizing
//! - Performance metrics and a stateless report formatter
//!
//! The execution loop is an ordered fold: capital at step *i* depends on
//! capital at step *i − 1*, so runs are strictly sequential. Separate runs
//! over the same bars are independent and safe to execute in parallel.

pub mod data;
pub mod domain;
pub mod metrics;
pub mod report;
pub mod signal;
pub mod sim;
