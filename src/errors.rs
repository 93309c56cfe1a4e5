// src/errors.rs
use rust_decimal::Decimal;
use thiserror::Error;

/// Failures of a single price source call.
#[derive(Error, Debug)]
pub enum PriceSourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("No price data for {0}")]
    NoData(String),
}

/// Errors surfaced by the allocation/valuation pipeline.
///
/// None of these are recovered locally: substituting a default price or skipping
/// an instrument would corrupt the P&L figures.
#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("No price available for {0}")]
    MissingPrice(String),

    #[error("Invalid price {price} for {symbol}")]
    InvalidPrice { symbol: String, price: Decimal },

    #[error("Cannot aggregate an empty portfolio")]
    EmptyPortfolio,

    #[error("Invalid capital: {0}")]
    InvalidCapital(Decimal),

    #[error("Invalid weight {weight} for {symbol}")]
    InvalidWeight { symbol: String, weight: Decimal },

    #[error("Price source failed: {0}")]
    PriceSource(#[from] PriceSourceError),
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
