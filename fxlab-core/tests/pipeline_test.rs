//! End-to-end pipeline test: CSV text → bars → simulated signal → engine →
//! metrics → formatted report.

use fxlab_core::data::parse_bars;
use fxlab_core::metrics::PerformanceReport;
use fxlab_core::report::{formatted_rows, render_text};
use fxlab_core::signal::{attach_signals, empirical_accuracy, simulate_signal};
use fxlab_core::sim::{run, SimConfig};

/// Build a French-locale CSV covering `n` trading days, newest first, the
/// way the broker export arrives.
fn sample_csv(n: usize) -> String {
    let start = chrono::NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let mut rows: Vec<String> = (0..n)
        .map(|i| {
            let date = start + chrono::Duration::days(i as i64);
            let mid = 1.08 + (i as f64 * 0.21).sin() * 0.01;
            let open = mid - 0.0015;
            let close = mid + 0.0010;
            let high = open.max(close) + 0.0020;
            let low = open.min(close) - 0.0020;
            let fr = |v: f64| format!("\"{}\"", format!("{v:.4}").replace('.', ","));
            format!(
                "{},{},{},{},{},\"0,00%\"",
                date.format("%d/%m/%Y"),
                fr(close),
                fr(open),
                fr(high),
                fr(low),
            )
        })
        .collect();
    rows.reverse();
    format!(
        "\u{feff}Date,Dernier,Ouv.,Haut,Bas,Variation %\n{}\n",
        rows.join("\n")
    )
}

#[test]
fn full_pipeline_produces_consistent_outputs() {
    let csv = sample_csv(120);
    let bars = parse_bars(&csv).expect("sample CSV parses");
    assert_eq!(bars.len(), 120);
    assert!(bars.windows(2).all(|w| w[0].date < w[1].date));

    let outcomes = simulate_signal(&bars, 0.60, 42).expect("valid accuracy");
    assert_eq!(outcomes.len(), bars.len());
    let acc = empirical_accuracy(&outcomes);
    assert!((acc - 0.60).abs() < 0.15, "empirical accuracy {acc}");

    let signal_bars = attach_signals(&bars, &outcomes);
    let config = SimConfig::default();
    let result = run(&signal_bars, &config).expect("simulation runs");

    assert_eq!(result.trades.len(), 119);
    assert_eq!(result.equity.len(), 119);

    let total_pnl: f64 = result.trades.iter().map(|t| t.pnl).sum();
    let final_eq = result.final_equity(config.initial_capital);
    assert!((final_eq - (config.initial_capital + total_pnl)).abs() < 1e-4);

    let report = PerformanceReport::compute(&result.trades, &result.equity, &config);
    assert_eq!(report.total_trades, 119);
    assert!((report.total_pnl - total_pnl).abs() < 1e-9);
    assert!(
        (report.total_return - (final_eq / config.initial_capital - 1.0)).abs() < 1e-12
    );
    assert!(report.win_rate >= 0.0 && report.win_rate <= 1.0);
    assert!(report.max_drawdown <= 0.0);
    assert!(report.stop_out_rate >= 0.0 && report.stop_out_rate <= 1.0);

    let rows = formatted_rows(&report);
    assert_eq!(rows.len(), 13);
    let text = render_text(&report);
    assert!(text.contains("Sharpe Ratio"));
}

#[test]
fn pipeline_is_deterministic_end_to_end() {
    let csv = sample_csv(80);
    let bars = parse_bars(&csv).unwrap();
    let config = SimConfig::default();

    let run_once = || {
        let outcomes = simulate_signal(&bars, 0.55, 7).unwrap();
        let signal_bars = attach_signals(&bars, &outcomes);
        run(&signal_bars, &config).unwrap()
    };

    let a = run_once();
    let b = run_once();
    assert_eq!(a, b);

    let ra = PerformanceReport::compute(&a.trades, &a.equity, &config);
    let rb = PerformanceReport::compute(&b.trades, &b.equity, &config);
    assert_eq!(ra, rb);
}
