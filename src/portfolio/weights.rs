// src/portfolio/weights.rs
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Target share of capital per instrument, in display order.
/// The remainder (here about a third) stays uninvested.
pub const TARGET_WEIGHTS: &[(&str, Decimal)] = &[
    ("INFY.NS", dec!(0.3310)),
    ("TCS.NS", dec!(0.3281)),
];

pub fn owned_weights(weights: &[(&str, Decimal)]) -> Vec<(String, Decimal)> {
    weights
        .iter()
        .map(|(symbol, weight)| (symbol.to_string(), *weight))
        .collect()
}
