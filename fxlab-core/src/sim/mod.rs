//! Simulation engine — configuration, validation, and the execution loop.

pub mod config;
pub mod engine;

pub use config::{ConfigError, SimConfig, PIP};
pub use engine::{run, SimError, SimResult};
