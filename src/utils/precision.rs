// src/utils/precision.rs
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds half away from zero to `dp` places, the way prices are quoted.
pub fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Money with a currency symbol and thousands separators.
/// Example: (-1234.567, "₹", 2) -> "-₹1,234.57"
pub fn format_money(value: Decimal, currency: &str, dp: u32) -> String {
    let rounded = round_to(value, dp);
    let negative = rounded < Decimal::ZERO;
    let digits = format!("{:.*}", dp as usize, rounded.abs());

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + currency.len() + 4);
    if negative {
        out.push('-');
    }
    out.push_str(currency);
    out.push_str(&group_thousands(whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Signed percentage, e.g. "+10.00%" or "-3.25%".
pub fn format_pct(value: Decimal) -> String {
    let rounded = round_to(value, 2);
    let sign = if rounded < Decimal::ZERO { "-" } else { "+" };
    format!("{}{:.2}%", sign, rounded.abs())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
