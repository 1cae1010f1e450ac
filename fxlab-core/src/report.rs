//! Report presentation — stateless formatting over the numeric metrics.
//!
//! The metrics layer stays presentation-agnostic; this module renders a
//! [`PerformanceReport`] into the ordered name/value rows used for console
//! output and the report artifact. Unbounded ratios render as `inf`.

use crate::metrics::PerformanceReport;

/// Ordered (metric name, display string) rows for a report.
pub fn formatted_rows(report: &PerformanceReport) -> Vec<(&'static str, String)> {
    vec![
        ("Total Trades", report.total_trades.to_string()),
        ("Win Rate", format_pct(report.win_rate, 1)),
        ("Total PnL (USD)", format_usd(report.total_pnl)),
        ("Total Return", format_pct(report.total_return, 2)),
        ("Annualized Return", format_pct(report.annualized_return, 2)),
        ("Max Drawdown", format_pct(report.max_drawdown, 2)),
        ("Sharpe Ratio", format_ratio(report.sharpe)),
        ("Calmar Ratio", format_ratio(report.calmar)),
        ("Profit Factor", format_ratio(report.profit_factor)),
        ("Avg Win (USD)", format_usd(report.avg_win)),
        ("Avg Loss (USD)", format_usd(report.avg_loss)),
        ("Stop-outs", report.stop_outs.to_string()),
        ("Stop-out Rate", format_pct(report.stop_out_rate, 1)),
    ]
}

/// Render the report as an aligned text table.
pub fn render_text(report: &PerformanceReport) -> String {
    let mut out = String::new();
    for (name, value) in formatted_rows(report) {
        out.push_str(&format!("{name:<20} {value}\n"));
    }
    out
}

/// Fraction → percentage string, e.g. `0.523` → `"52.3%"`.
pub fn format_pct(fraction: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", fraction * 100.0)
}

/// Two-decimal ratio; infinities render as `inf`.
pub fn format_ratio(value: f64) -> String {
    format!("{value:.2}")
}

/// Currency with thousands separators, e.g. `-1234567.891` → `"-1,234,567.89"`.
pub fn format_usd(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((&rounded, "00"));

    let mut grouped = String::new();
    let digits = int_part.as_bytes();
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*d as char);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}
