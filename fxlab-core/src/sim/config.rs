//! Simulation configuration and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum quoted price increment for the pair (EUR/USD).
pub const PIP: f64 = 0.0001;

/// Immutable parameters for a single simulation run.
///
/// There is deliberately no take-profit parameter: exits are stop-loss or
/// end-of-day close only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Starting account value in USD.
    pub initial_capital: f64,
    /// Fraction of current capital committed per trade, in (0, 1].
    pub position_size_pct: f64,
    /// Stop distance as a fraction of the entry price.
    pub stop_loss_pct: f64,
    /// Spread cost in pips, charged once per trade.
    pub transaction_cost_pips: f64,
    /// Leverage multiplier applied to the position value.
    pub leverage: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_capital: 100_000.0,
            position_size_pct: 0.10,
            stop_loss_pct: 0.005,
            transaction_cost_pips: 1.0,
            leverage: 1.0,
        }
    }
}

impl SimConfig {
    /// Check every parameter against its valid domain.
    ///
    /// Runs once at engine entry; nothing is simulated on failure.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_capital > 0.0) {
            return Err(ConfigError::NonPositiveCapital(self.initial_capital));
        }
        if !(self.position_size_pct > 0.0 && self.position_size_pct <= 1.0) {
            return Err(ConfigError::PositionSizeOutOfRange(self.position_size_pct));
        }
        if !(self.stop_loss_pct >= 0.0) {
            return Err(ConfigError::NegativeStopLoss(self.stop_loss_pct));
        }
        if !(self.transaction_cost_pips >= 0.0) {
            return Err(ConfigError::NegativeTransactionCost(
                self.transaction_cost_pips,
            ));
        }
        if !(self.leverage > 0.0) {
            return Err(ConfigError::NonPositiveLeverage(self.leverage));
        }
        Ok(())
    }

    /// Spread cost in price units.
    pub fn transaction_cost(&self) -> f64 {
        self.transaction_cost_pips * PIP
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two runs with identical configs share a run id, so artifact
    /// directories are content-addressable.
    pub fn run_id(&self) -> String {
        let json = serde_json::to_string(self).expect("SimConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

/// A configuration value outside its valid domain.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial_capital must be > 0, got {0}")]
    NonPositiveCapital(f64),

    #[error("position_size_pct must be in (0, 1], got {0}")]
    PositionSizeOutOfRange(f64),

    #[error("stop_loss_pct must be >= 0, got {0}")]
    NegativeStopLoss(f64),

    #[error("transaction_cost_pips must be >= 0, got {0}")]
    NegativeTransactionCost(f64),

    #[error("leverage must be > 0, got {0}")]
    NonPositiveLeverage(f64),
}
