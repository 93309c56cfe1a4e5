// src/portfolio/valuation.rs
use crate::errors::{PortfolioError, Result};
use crate::types::{AllocationRow, PortfolioRow, PriceMap};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Marks every allocation to its live price.
///
/// Fails on the first instrument without a usable live price; a partial table is
/// never returned. Rows with nothing invested report 0% instead of dividing by zero.
pub fn valuate(rows: &[AllocationRow], live_prices: &PriceMap) -> Result<Vec<PortfolioRow>> {
    rows.iter()
        .map(|row| {
            let live_price = *live_prices
                .get(&row.symbol)
                .ok_or_else(|| PortfolioError::MissingPrice(row.symbol.clone()))?;
            if live_price <= Decimal::ZERO {
                return Err(PortfolioError::InvalidPrice {
                    symbol: row.symbol.clone(),
                    price: live_price,
                });
            }

            let current_value = Decimal::from(row.quantity) * live_price;
            let pnl_abs = current_value - row.invested;
            let pnl_pct = if row.invested > Decimal::ZERO {
                pnl_abs / row.invested * dec!(100)
            } else {
                Decimal::ZERO
            };

            Ok(PortfolioRow {
                allocation: row.clone(),
                live_price,
                current_value,
                pnl_abs,
                pnl_pct,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::allocator::allocate;

    fn prices(entries: &[(&str, Decimal)]) -> PriceMap {
        entries
            .iter()
            .map(|(symbol, price)| (symbol.to_string(), *price))
            .collect()
    }

    fn two_stock_allocation() -> Vec<AllocationRow> {
        let buy = prices(&[("A", dec!(1000)), ("B", dec!(1999))]);
        let weights = [("A", dec!(0.5)), ("B", dec!(0.5))];
        allocate(&buy, &weights, dec!(100000)).unwrap().0
    }

    #[test]
    fn computes_value_and_pnl_per_row() {
        let live = prices(&[("A", dec!(1100)), ("B", dec!(1999))]);
        let rows = valuate(&two_stock_allocation(), &live).unwrap();

        assert_eq!(rows[0].live_price, dec!(1100));
        assert_eq!(rows[0].current_value, dec!(55000));
        assert_eq!(rows[0].pnl_abs, dec!(5000));
        assert_eq!(rows[0].pnl_pct, dec!(10.0));

        assert_eq!(rows[1].current_value, dec!(49975));
        assert_eq!(rows[1].pnl_abs, Decimal::ZERO);
        assert_eq!(rows[1].pnl_pct, Decimal::ZERO);
    }

    #[test]
    fn reports_losses_as_negative() {
        let live = prices(&[("A", dec!(900)), ("B", dec!(1999))]);
        let rows = valuate(&two_stock_allocation(), &live).unwrap();
        assert_eq!(rows[0].pnl_abs, dec!(-5000));
        assert_eq!(rows[0].pnl_pct, dec!(-10));
    }

    #[test]
    fn zero_investment_is_zero_percent() {
        let (allocation, _) = allocate(&prices(&[("C", dec!(1000))]), &[("C", dec!(0.1))], dec!(100)).unwrap();
        let rows = valuate(&allocation, &prices(&[("C", dec!(1200))])).unwrap();

        assert_eq!(rows[0].allocation.quantity, 0);
        assert_eq!(rows[0].current_value, Decimal::ZERO);
        assert_eq!(rows[0].pnl_abs, Decimal::ZERO);
        assert_eq!(rows[0].pnl_pct, Decimal::ZERO);
    }

    #[test]
    fn valuing_at_buy_prices_breaks_even() {
        let buy = prices(&[("X", dec!(17.35)), ("Y", dec!(2451.9)), ("Z", dec!(99999))]);
        let weights = [("X", dec!(0.25)), ("Y", dec!(0.6)), ("Z", dec!(0.1))];
        let (allocation, _) = allocate(&buy, &weights, dec!(123456.78)).unwrap();

        for row in valuate(&allocation, &buy).unwrap() {
            assert_eq!(row.pnl_abs, Decimal::ZERO, "{}", row.allocation.symbol);
            assert_eq!(row.pnl_pct, Decimal::ZERO, "{}", row.allocation.symbol);
        }
    }

    #[test]
    fn missing_live_price_fails_whole_table() {
        let live = prices(&[("A", dec!(1100))]);
        assert!(matches!(
            valuate(&two_stock_allocation(), &live),
            Err(PortfolioError::MissingPrice(symbol)) if symbol == "B"
        ));
    }

    #[test]
    fn non_positive_live_price_fails() {
        let live = prices(&[("A", dec!(1100)), ("B", Decimal::ZERO)]);
        assert!(matches!(
            valuate(&two_stock_allocation(), &live),
            Err(PortfolioError::InvalidPrice { symbol, .. }) if symbol == "B"
        ));
    }
}
