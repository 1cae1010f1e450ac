//! FxLab CLI — EUR/USD ML-signal backtest runner.
//!
//! Pipeline: load bars from CSV → simulate the forecast stream → run the
//! simulation → print the performance report → export run artifacts
//! (trades.csv, equity.csv, report.txt) under a content-addressed run
//! directory.

mod export;
mod settings;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use fxlab_core::data::load_bars;
use fxlab_core::metrics::PerformanceReport;
use fxlab_core::report::formatted_rows;
use fxlab_core::signal::{attach_signals, empirical_accuracy, simulate_signal};
use fxlab_core::sim::{run, SimConfig};

use export::save_artifacts;
use settings::Settings;

#[derive(Parser)]
#[command(name = "fxlab", about = "FxLab — EUR/USD ML signal backtesting engine")]
struct Cli {
    /// Path to a TOML settings file. Explicit flags override file values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// EUR/USD history CSV (French locale export).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Simulated model accuracy in [0, 1].
    #[arg(long)]
    accuracy: Option<f64>,

    /// Seed for the signal simulator.
    #[arg(long)]
    seed: Option<u64>,

    /// Initial capital (USD).
    #[arg(long)]
    capital: Option<f64>,

    /// Position size as a fraction of capital.
    #[arg(long)]
    position: Option<f64>,

    /// Stop-loss as a fraction of the entry price (e.g. 0.005 = 0.5%).
    #[arg(long)]
    stop_loss: Option<f64>,

    /// Spread cost in pips.
    #[arg(long)]
    cost_pips: Option<f64>,

    /// Leverage multiplier.
    #[arg(long)]
    leverage: Option<f64>,

    /// Directory for run artifacts.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

/// Fully resolved run parameters: flag > settings file > default.
struct ResolvedRun {
    data: PathBuf,
    accuracy: f64,
    seed: u64,
    output_dir: PathBuf,
    config: SimConfig,
}

fn resolve(cli: Cli) -> Result<ResolvedRun> {
    let file = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    let defaults = SimConfig::default();

    Ok(ResolvedRun {
        data: cli
            .data
            .or(file.data)
            .unwrap_or_else(|| PathBuf::from("data/EUR_USD.csv")),
        accuracy: cli.accuracy.or(file.accuracy).unwrap_or(0.60),
        seed: cli.seed.or(file.seed).unwrap_or(42),
        output_dir: cli
            .output_dir
            .or(file.output_dir)
            .unwrap_or_else(|| PathBuf::from("results")),
        config: SimConfig {
            initial_capital: cli
                .capital
                .or(file.capital)
                .unwrap_or(defaults.initial_capital),
            position_size_pct: cli
                .position
                .or(file.position)
                .unwrap_or(defaults.position_size_pct),
            stop_loss_pct: cli
                .stop_loss
                .or(file.stop_loss)
                .unwrap_or(defaults.stop_loss_pct),
            transaction_cost_pips: cli
                .cost_pips
                .or(file.cost_pips)
                .unwrap_or(defaults.transaction_cost_pips),
            leverage: cli.leverage.or(file.leverage).unwrap_or(defaults.leverage),
        },
    })
}

fn main() -> Result<()> {
    let resolved = resolve(Cli::parse())?;

    println!("EUR/USD · ML signal backtest");

    println!("[1/4] Loading data from {} ...", resolved.data.display());
    let bars = load_bars(&resolved.data)
        .with_context(|| format!("loading {}", resolved.data.display()))?;
    println!(
        "  {} trading days ({} -> {})",
        bars.len(),
        bars.first().map(|b| b.date.to_string()).unwrap_or_default(),
        bars.last().map(|b| b.date.to_string()).unwrap_or_default(),
    );

    println!(
        "[2/4] Simulating ML signal (accuracy={:.0}%, seed={}) ...",
        resolved.accuracy * 100.0,
        resolved.seed
    );
    let outcomes = simulate_signal(&bars, resolved.accuracy, resolved.seed)
        .context("simulating signal")?;
    let longs = outcomes.iter().filter(|o| o.signal == 1).count();
    println!(
        "  empirical accuracy {:.2}% | {} long / {} short",
        empirical_accuracy(&outcomes) * 100.0,
        longs,
        outcomes.len() - longs
    );

    println!("[3/4] Running simulation ...");
    let signal_bars = attach_signals(&bars, &outcomes);
    let result = run(&signal_bars, &resolved.config).context("running simulation")?;

    println!("[4/4] Performance report:");
    let report = PerformanceReport::compute(&result.trades, &result.equity, &resolved.config);
    for (name, value) in formatted_rows(&report) {
        println!("  {name:<20} {value}");
    }

    let run_dir = save_artifacts(
        &resolved.output_dir,
        &resolved.config.run_id(),
        &result.trades,
        &result.equity,
        &report,
    )?;
    println!("Artifacts saved to: {}", run_dir.display());

    Ok(())
}
