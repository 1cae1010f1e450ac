//! Simulated ML forecast stream.
//!
//! Stands in for a trained directional model: given a target accuracy and a
//! seed, emits one forecast per bar plus a ground-truth correctness flag.
//! The engine never sees the flag; it exists for calibration checks (is the
//! empirical hit rate close to the requested accuracy?).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Bar, SignalBar};

/// One simulated forecast: the emitted signal and whether it matched the
/// true next-day direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalOutcome {
    /// `+1` long forecast, `-1` short forecast.
    pub signal: i8,
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SignalError {
    #[error("accuracy must be in [0, 1], got {0}")]
    AccuracyOutOfRange(f64),
}

/// Simulate a forecast stream over `bars` at the given accuracy.
///
/// The truth for bar T is the open→close direction of bar T+1 (the bar the
/// forecast would be traded over); the final bar falls back to its own
/// move. With probability `accuracy` the emitted signal is the truth,
/// otherwise it is flipped. Deterministic for a fixed seed.
pub fn simulate_signal(
    bars: &[Bar],
    accuracy: f64,
    seed: u64,
) -> Result<Vec<SignalOutcome>, SignalError> {
    if !(0.0..=1.0).contains(&accuracy) {
        return Err(SignalError::AccuracyOutOfRange(accuracy));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut outcomes = Vec::with_capacity(bars.len());

    for i in 0..bars.len() {
        let target = bars.get(i + 1).unwrap_or(&bars[i]);
        let truth: i8 = if target.close >= target.open { 1 } else { -1 };

        let correct = rng.gen_bool(accuracy);
        let signal = if correct { truth } else { -truth };
        outcomes.push(SignalOutcome { signal, correct });
    }

    Ok(outcomes)
}

/// Attach a forecast stream to its bars.
///
/// Panics in debug builds if the lengths disagree; the two sequences are
/// produced from the same bar slice.
pub fn attach_signals(bars: &[Bar], outcomes: &[SignalOutcome]) -> Vec<SignalBar> {
    debug_assert_eq!(bars.len(), outcomes.len());
    bars.iter()
        .zip(outcomes)
        .map(|(bar, outcome)| SignalBar::new(*bar, outcome.signal))
        .collect()
}

/// Fraction of forecasts flagged correct.
pub fn empirical_accuracy(outcomes: &[SignalOutcome]) -> f64 {
    if outcomes.is_empty() {
        return 0.0;
    }
    let correct = outcomes.iter().filter(|o| o.correct).count();
    correct as f64 / outcomes.len() as f64
}
