// src/portfolio/allocator.rs
use crate::errors::{PortfolioError, Result};
use crate::types::{AllocationRow, PriceMap};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Splits `capital` across `weights` at the buy prices, buying whole shares only.
///
/// Rows come back in the order of `weights`, one per instrument, including
/// instruments whose slice of capital cannot afford a single share.
/// Returns the rows and the total amount actually invested.
pub fn allocate<S: AsRef<str>>(
    buy_prices: &PriceMap,
    weights: &[(S, Decimal)],
    capital: Decimal,
) -> Result<(Vec<AllocationRow>, Decimal)> {
    if capital < Decimal::ZERO {
        return Err(PortfolioError::InvalidCapital(capital));
    }

    let mut rows = Vec::with_capacity(weights.len());
    let mut total_invested = Decimal::ZERO;

    for (symbol, weight) in weights {
        let symbol = symbol.as_ref();
        let weight = *weight;
        if weight < Decimal::ZERO || weight > Decimal::ONE {
            return Err(PortfolioError::InvalidWeight {
                symbol: symbol.to_string(),
                weight,
            });
        }

        let price = *buy_prices
            .get(symbol)
            .ok_or_else(|| PortfolioError::MissingPrice(symbol.to_string()))?;
        let invalid_price = || PortfolioError::InvalidPrice {
            symbol: symbol.to_string(),
            price,
        };
        if price <= Decimal::ZERO {
            return Err(invalid_price());
        }

        let allocated_money = capital * weight;
        let quantity = allocated_money
            .checked_div(price)
            .and_then(|shares| shares.floor().to_u64())
            .ok_or_else(invalid_price)?;
        let invested = Decimal::from(quantity) * price;
        total_invested += invested;

        rows.push(AllocationRow {
            symbol: symbol.to_string(),
            buy_price: price,
            quantity,
            invested,
        });
    }

    Ok((rows, total_invested))
}
