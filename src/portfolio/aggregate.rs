// src/portfolio/aggregate.rs
use crate::errors::{PortfolioError, Result};
use crate::types::{PortfolioRow, PortfolioSummary};
use rust_decimal::Decimal;

/// Totals for the metric line. The mean P&L % is an unweighted mean over rows.
pub fn summarize(rows: &[PortfolioRow]) -> Result<PortfolioSummary> {
    if rows.is_empty() {
        return Err(PortfolioError::EmptyPortfolio);
    }

    let mut summary = PortfolioSummary {
        total_invested: Decimal::ZERO,
        total_current_value: Decimal::ZERO,
        total_pnl_abs: Decimal::ZERO,
        mean_pnl_pct: Decimal::ZERO,
    };
    let mut pct_sum = Decimal::ZERO;

    for row in rows {
        summary.total_invested += row.allocation.invested;
        summary.total_current_value += row.current_value;
        summary.total_pnl_abs += row.pnl_abs;
        pct_sum += row.pnl_pct;
    }
    summary.mean_pnl_pct = pct_sum / Decimal::from(rows.len());

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AllocationRow;
    use rust_decimal_macros::dec;

    fn row(symbol: &str, invested: Decimal, current_value: Decimal, pnl_pct: Decimal) -> PortfolioRow {
        PortfolioRow {
            allocation: AllocationRow {
                symbol: symbol.to_string(),
                buy_price: dec!(1),
                quantity: 0,
                invested,
            },
            live_price: dec!(1),
            current_value,
            pnl_abs: current_value - invested,
            pnl_pct,
        }
    }

    #[test]
    fn sums_and_averages_rows() {
        let rows = vec![
            row("A", dec!(50000), dec!(55000), dec!(10)),
            row("B", dec!(49975), dec!(49975), dec!(0)),
        ];
        let summary = summarize(&rows).unwrap();

        assert_eq!(summary.total_invested, dec!(99975));
        assert_eq!(summary.total_current_value, dec!(104975));
        assert_eq!(summary.total_pnl_abs, dec!(5000));
        assert_eq!(summary.mean_pnl_pct, dec!(5));
    }

    #[test]
    fn mean_counts_zero_investment_rows() {
        let rows = vec![
            row("A", dec!(100), dec!(130), dec!(30)),
            row("B", Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
            row("C", dec!(100), dec!(100), dec!(0)),
        ];
        assert_eq!(summarize(&rows).unwrap().mean_pnl_pct, dec!(10));
    }

    #[test]
    fn empty_portfolio_fails() {
        assert!(matches!(summarize(&[]), Err(PortfolioError::EmptyPortfolio)));
    }
}
