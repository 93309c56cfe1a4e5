// src/types.rs
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Instrument id -> latest (or buy) price.
pub type PriceMap = HashMap<String, Decimal>;

/// Prices captured by the one-time virtual purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuySnapshot {
    pub prices: PriceMap,
    pub taken_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRow {
    pub symbol: String,
    pub buy_price: Decimal,
    pub quantity: u64,
    pub invested: Decimal, // quantity * buy_price
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRow {
    #[serde(flatten)]
    pub allocation: AllocationRow,
    pub live_price: Decimal,
    pub current_value: Decimal,
    pub pnl_abs: Decimal,
    pub pnl_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_invested: Decimal,
    pub total_current_value: Decimal,
    pub total_pnl_abs: Decimal,
    pub mean_pnl_pct: Decimal,
}

/// Everything the display needs after one refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub taken_at: DateTime<Local>,
    pub capital: Decimal,
    pub summary: PortfolioSummary,
    pub rows: Vec<PortfolioRow>,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    Refreshing,
    Refreshed(PortfolioReport),
    Failed(String),
    Log(String),
}
