//! Performance metrics — pure functions that compute run statistics.
//!
//! Every metric is a pure function: equity values and/or trade list in,
//! scalar out. Division-by-zero cases never propagate: each has an explicit
//! substitute (0, or positive infinity for the unbounded ratios), because
//! downstream reporting and comparisons depend on those exact values.

use serde::{Deserialize, Serialize};

use crate::domain::{EquityPoint, Trade};
use crate::sim::SimConfig;

/// Trading days per year, used for annualization.
pub const TRADING_DAYS: f64 = 252.0;

/// Aggregate performance statistics for a single run.
///
/// All fields are raw numbers; presentation lives in [`crate::report`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub total_trades: usize,
    pub win_rate: f64,
    pub total_pnl: f64,
    pub total_return: f64,
    pub annualized_return: f64,
    pub max_drawdown: f64,
    pub sharpe: f64,
    pub calmar: f64,
    pub profit_factor: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub stop_outs: usize,
    pub stop_out_rate: f64,
}

impl PerformanceReport {
    /// Compute all statistics from the finished ledger and equity curve.
    pub fn compute(trades: &[Trade], equity: &[EquityPoint], config: &SimConfig) -> Self {
        let values: Vec<f64> = equity.iter().map(|p| p.equity).collect();
        let annualized = annualized_return(&values, config.initial_capital);
        let max_dd = max_drawdown(&values);

        Self {
            total_trades: trades.len(),
            win_rate: win_rate(trades),
            total_pnl: total_pnl(trades),
            total_return: total_return(&values, config.initial_capital),
            annualized_return: annualized,
            max_drawdown: max_dd,
            sharpe: sharpe_ratio(&values),
            calmar: calmar_ratio(annualized, max_dd),
            profit_factor: profit_factor(trades),
            avg_win: avg_win(trades),
            avg_loss: avg_loss(trades),
            stop_outs: stop_outs(trades),
            stop_out_rate: stop_out_rate(trades),
        }
    }
}

// ─── Trade-ledger metrics ───────────────────────────────────────────

/// Fraction of trades with positive pnl. 0 for an empty ledger.
pub fn win_rate(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.is_winner()).count();
    winners as f64 / trades.len() as f64
}

pub fn total_pnl(trades: &[Trade]) -> f64 {
    trades.iter().map(|t| t.pnl).sum()
}

/// Gross winning pnl / |gross losing pnl|.
///
/// Positive infinity when there are no losing trades (pnl <= 0 counts as
/// a loss) — an explicit unbounded sentinel, never a finite cap.
pub fn profit_factor(trades: &[Trade]) -> f64 {
    let gross_profit: f64 = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).sum();
    let gross_loss: f64 = trades
        .iter()
        .filter(|t| t.pnl <= 0.0)
        .map(|t| t.pnl.abs())
        .sum();
    if gross_loss == 0.0 {
        return f64::INFINITY;
    }
    gross_profit / gross_loss
}

/// Mean pnl over winning trades; 0 when there are none.
pub fn avg_win(trades: &[Trade]) -> f64 {
    let wins: Vec<f64> = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).collect();
    mean(&wins)
}

/// Mean pnl over losing trades (pnl <= 0); 0 when there are none.
pub fn avg_loss(trades: &[Trade]) -> f64 {
    let losses: Vec<f64> = trades
        .iter()
        .filter(|t| t.pnl <= 0.0)
        .map(|t| t.pnl)
        .collect();
    mean(&losses)
}

pub fn stop_outs(trades: &[Trade]) -> usize {
    trades.iter().filter(|t| t.stopped_out).count()
}

/// Fraction of trades closed by the stop. 0 for an empty ledger.
pub fn stop_out_rate(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    stop_outs(trades) as f64 / trades.len() as f64
}

// ─── Equity-curve metrics ───────────────────────────────────────────

/// Total return as a fraction of initial capital.
pub fn total_return(equity: &[f64], initial_capital: f64) -> f64 {
    match equity.last() {
        Some(&final_eq) if initial_capital > 0.0 => final_eq / initial_capital - 1.0,
        _ => 0.0,
    }
}

/// Annualized return: `(final / initial)^(252 / n) - 1` over n trades.
///
/// The base equity is the capital immediately preceding the first trade,
/// i.e. initial capital. 0 for an empty curve or non-positive equity.
pub fn annualized_return(equity: &[f64], initial_capital: f64) -> f64 {
    let Some(&final_eq) = equity.last() else {
        return 0.0;
    };
    if initial_capital <= 0.0 || final_eq <= 0.0 {
        return 0.0;
    }
    (final_eq / initial_capital).powf(TRADING_DAYS / equity.len() as f64) - 1.0
}

/// Maximum peak-to-trough decline as a negative fraction of the peak.
/// 0 when equity never declines.
pub fn max_drawdown(equity: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;
    for &eq in equity {
        if eq > peak {
            peak = eq;
        }
        if peak > 0.0 {
            let dd = (eq - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Annualized Sharpe ratio over successive equity pct-changes.
///
/// 0 when the return variance is zero (flat or single-point curve).
pub fn sharpe_ratio(equity: &[f64]) -> f64 {
    let returns = daily_returns(equity);
    if returns.len() < 2 {
        return 0.0;
    }
    let std = std_dev(&returns);
    if std == 0.0 {
        return 0.0;
    }
    (mean(&returns) / std) * TRADING_DAYS.sqrt()
}

/// Calmar ratio: annualized return / |max drawdown|.
///
/// Positive infinity when the drawdown is exactly zero.
pub fn calmar_ratio(annualized_return: f64, max_drawdown: f64) -> f64 {
    if max_drawdown == 0.0 {
        return f64::INFINITY;
    }
    annualized_return / max_drawdown.abs()
}

// ─── Helpers ────────────────────────────────────────────────────────

/// Percentage changes between successive equity points.
pub fn daily_returns(equity: &[f64]) -> Vec<f64> {
    if equity.len() < 2 {
        return Vec::new();
    }
    equity
        .windows(2)
        .map(|w| if w[0] != 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Direction;
    use chrono::NaiveDate;

    fn make_trade(pnl: f64, stopped_out: bool) -> Trade {
        Trade {
            date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            direction: Direction::Long,
            entry_price: 1.1000,
            exit_price: 1.1000 + pnl / 9090.0,
            stop_loss_price: 1.0945,
            pnl,
            stopped_out,
            position_size: 9090.0,
        }
    }

    fn equity_points(values: &[f64]) -> Vec<EquityPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &equity)| EquityPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap()
                    + chrono::Duration::days(i as i64),
                equity,
            })
            .collect()
    }

    // ── Win rate ──

    #[test]
    fn win_rate_mixed() {
        let trades = vec![
            make_trade(50.0, false),
            make_trade(-20.0, true),
            make_trade(30.0, false),
            make_trade(-10.0, true),
        ];
        assert!((win_rate(&trades) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn win_rate_empty() {
        assert_eq!(win_rate(&[]), 0.0);
    }

    #[test]
    fn breakeven_trade_is_not_a_winner() {
        let trades = vec![make_trade(0.0, false)];
        assert_eq!(win_rate(&trades), 0.0);
    }

    // ── Profit factor ──

    #[test]
    fn profit_factor_mixed() {
        let trades = vec![
            make_trade(500.0, false),
            make_trade(-200.0, true),
            make_trade(300.0, false),
        ];
        assert!((profit_factor(&trades) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn profit_factor_no_losers_is_infinite() {
        let trades = vec![make_trade(500.0, false), make_trade(300.0, false)];
        assert_eq!(profit_factor(&trades), f64::INFINITY);
    }

    #[test]
    fn profit_factor_all_losers() {
        let trades = vec![make_trade(-500.0, true), make_trade(-300.0, true)];
        assert_eq!(profit_factor(&trades), 0.0);
    }

    // ── Average win / loss ──

    #[test]
    fn avg_win_and_loss() {
        let trades = vec![
            make_trade(100.0, false),
            make_trade(300.0, false),
            make_trade(-50.0, true),
        ];
        assert!((avg_win(&trades) - 200.0).abs() < 1e-10);
        assert!((avg_loss(&trades) + 50.0).abs() < 1e-10);
    }

    #[test]
    fn avg_loss_no_losers_is_zero() {
        let trades = vec![make_trade(100.0, false)];
        assert_eq!(avg_loss(&trades), 0.0);
    }

    // ── Stop-outs ──

    #[test]
    fn stop_out_count_and_rate() {
        let trades = vec![
            make_trade(-50.0, true),
            make_trade(30.0, false),
            make_trade(-40.0, true),
            make_trade(20.0, false),
        ];
        assert_eq!(stop_outs(&trades), 2);
        assert!((stop_out_rate(&trades) - 0.5).abs() < 1e-10);
        assert_eq!(stop_out_rate(&[]), 0.0);
    }

    // ── Total / annualized return ──

    #[test]
    fn total_return_from_initial_capital() {
        let eq = vec![100_500.0, 101_000.0, 110_000.0];
        assert!((total_return(&eq, 100_000.0) - 0.1).abs() < 1e-10);
    }

    #[test]
    fn total_return_empty_curve() {
        assert_eq!(total_return(&[], 100_000.0), 0.0);
    }

    #[test]
    fn annualized_return_one_year_flat_growth() {
        // 252 trades ending 10% up → annualized == total.
        let mut eq = Vec::with_capacity(252);
        let mut v = 100_000.0;
        let daily = (1.1_f64).powf(1.0 / 252.0);
        for _ in 0..252 {
            v *= daily;
            eq.push(v);
        }
        let a = annualized_return(&eq, 100_000.0);
        assert!((a - 0.1).abs() < 1e-9, "got {a}");
    }

    #[test]
    fn annualized_return_compounds_short_series() {
        // 2 trades, +1% total → (1.01)^126 - 1.
        let eq = vec![100_400.0, 101_000.0];
        let expected = (1.01_f64).powf(126.0) - 1.0;
        assert!((annualized_return(&eq, 100_000.0) - expected).abs() < 1e-9);
    }

    // ── Max drawdown ──

    #[test]
    fn max_drawdown_known() {
        let eq = vec![100_000.0, 110_000.0, 90_000.0, 95_000.0];
        let expected = (90_000.0 - 110_000.0) / 110_000.0;
        assert!((max_drawdown(&eq) - expected).abs() < 1e-10);
    }

    #[test]
    fn max_drawdown_monotonic_is_zero() {
        let eq: Vec<f64> = (0..100).map(|i| 100_000.0 + i as f64 * 100.0).collect();
        assert_eq!(max_drawdown(&eq), 0.0);
    }

    #[test]
    fn max_drawdown_empty() {
        assert_eq!(max_drawdown(&[]), 0.0);
    }

    // ── Sharpe ──

    #[test]
    fn sharpe_zero_variance_is_zero() {
        // Constant growth rate → zero std of returns.
        let mut eq = vec![100_000.0];
        for i in 1..100 {
            eq.push(eq[i - 1] * 1.001);
        }
        assert_eq!(sharpe_ratio(&eq), 0.0);
    }

    #[test]
    fn sharpe_single_point_is_zero() {
        assert_eq!(sharpe_ratio(&[100_000.0]), 0.0);
        assert_eq!(sharpe_ratio(&[]), 0.0);
    }

    #[test]
    fn sharpe_positive_for_mostly_up_curve() {
        let mut eq = vec![100_000.0];
        for i in 1..253 {
            let r = if i % 2 == 0 { 1.002 } else { 1.0005 };
            eq.push(eq[i - 1] * r);
        }
        let s = sharpe_ratio(&eq);
        assert!(s > 5.0, "expected high sharpe, got {s}");
    }

    // ── Calmar ──

    #[test]
    fn calmar_zero_drawdown_is_infinite() {
        assert_eq!(calmar_ratio(0.10, 0.0), f64::INFINITY);
    }

    #[test]
    fn calmar_known_values() {
        assert!((calmar_ratio(0.10, -0.05) - 2.0).abs() < 1e-10);
        assert!((calmar_ratio(-0.10, -0.05) + 2.0).abs() < 1e-10);
    }

    // ── Aggregate ──

    #[test]
    fn compute_full_report() {
        let config = SimConfig::default();
        let trades = vec![
            make_trade(500.0, false),
            make_trade(-200.0, true),
            make_trade(300.0, false),
        ];
        let equity = equity_points(&[100_500.0, 100_300.0, 100_600.0]);
        let report = PerformanceReport::compute(&trades, &equity, &config);

        assert_eq!(report.total_trades, 3);
        assert!((report.win_rate - 2.0 / 3.0).abs() < 1e-10);
        assert!((report.total_pnl - 600.0).abs() < 1e-10);
        assert!((report.total_return - 0.006).abs() < 1e-10);
        assert!((report.profit_factor - 4.0).abs() < 1e-10);
        assert_eq!(report.stop_outs, 1);
        assert!((report.stop_out_rate - 1.0 / 3.0).abs() < 1e-10);
        assert!(report.max_drawdown < 0.0);
        assert!(report.calmar.is_finite());
        assert!(report.sharpe.is_finite());
    }

    #[test]
    fn compute_report_one_winning_trade() {
        // One trade, one equity point: zero-variance sharpe, no drawdown,
        // no losers — every unbounded guard fires at once.
        let config = SimConfig::default();
        let trades = vec![make_trade(100.0, false)];
        let equity = equity_points(&[100_100.0]);
        let report = PerformanceReport::compute(&trades, &equity, &config);

        assert_eq!(report.sharpe, 0.0);
        assert_eq!(report.max_drawdown, 0.0);
        assert_eq!(report.calmar, f64::INFINITY);
        assert_eq!(report.profit_factor, f64::INFINITY);
        assert_eq!(report.avg_loss, 0.0);
    }
}
