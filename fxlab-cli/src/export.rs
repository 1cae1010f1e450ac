//! Run artifact export: trades.csv, equity.csv, report.txt.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use fxlab_core::domain::{EquityPoint, Trade};
use fxlab_core::metrics::PerformanceReport;
use fxlab_core::report::render_text;

pub fn write_trades_csv(path: &Path, trades: &[Trade]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create trades CSV {}", path.display()))?;

    writeln!(
        file,
        "date,direction,entry_price,exit_price,stop_loss_price,pnl,stopped_out,position_size"
    )?;

    for trade in trades {
        writeln!(
            file,
            "{},{},{:.5},{:.5},{:.5},{:.4},{},{:.4}",
            trade.date,
            trade.direction.as_str(),
            trade.entry_price,
            trade.exit_price,
            trade.stop_loss_price,
            trade.pnl,
            trade.stopped_out,
            trade.position_size
        )?;
    }

    Ok(())
}

pub fn write_equity_csv(path: &Path, equity: &[EquityPoint]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create equity CSV {}", path.display()))?;
    writeln!(file, "date,equity")?;
    for point in equity {
        writeln!(file, "{},{:.4}", point.date, point.equity)?;
    }
    Ok(())
}

pub fn write_report_txt(path: &Path, report: &PerformanceReport) -> Result<()> {
    std::fs::write(path, render_text(report))
        .with_context(|| format!("failed to write report {}", path.display()))
}

/// Write the full artifact set under `<output_dir>/<run_id prefix>/`.
///
/// Returns the run directory.
pub fn save_artifacts(
    output_dir: &Path,
    run_id: &str,
    trades: &[Trade],
    equity: &[EquityPoint],
    report: &PerformanceReport,
) -> Result<PathBuf> {
    let short_id = &run_id[..run_id.len().min(12)];
    let run_dir = output_dir.join(short_id);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create output dir {}", run_dir.display()))?;

    write_trades_csv(&run_dir.join("trades.csv"), trades)?;
    write_equity_csv(&run_dir.join("equity.csv"), equity)?;
    write_report_txt(&run_dir.join("report.txt"), report)?;

    Ok(run_dir)
}
