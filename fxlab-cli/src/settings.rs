//! Optional TOML settings file.
//!
//! Every field is optional; resolution order is CLI flag, then settings
//! file, then built-in default. The file is a flat table:
//!
//! ```toml
//! data = "data/EUR_USD.csv"
//! accuracy = 0.60
//! seed = 42
//! capital = 100000.0
//! position = 0.10
//! stop_loss = 0.005
//! cost_pips = 1.0
//! leverage = 1.0
//! output_dir = "results"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub data: Option<PathBuf>,
    pub accuracy: Option<f64>,
    pub seed: Option<u64>,
    pub capital: Option<f64>,
    pub position: Option<f64>,
    pub stop_loss: Option<f64>,
    pub cost_pips: Option<f64>,
    pub leverage: Option<f64>,
    pub output_dir: Option<PathBuf>,
}

impl Settings {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }
}
