// src/portfolio/session.rs
use crate::connectors::traits::PriceSource;
use crate::errors::{PortfolioError, Result};
use crate::types::{BuySnapshot, PriceMap};
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use tracing::{info, warn};

/// Per-session state. The buy snapshot is written once and never replaced;
/// only ending the session (dropping the value) discards it.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Uninitialized,
    Initialized(BuySnapshot),
}

impl SessionState {
    pub fn is_initialized(&self) -> bool {
        matches!(self, SessionState::Initialized(_))
    }

    pub fn snapshot(&self) -> Option<&BuySnapshot> {
        match self {
            SessionState::Initialized(snapshot) => Some(snapshot),
            SessionState::Uninitialized => None,
        }
    }

    /// Takes the virtual purchase on first call; later calls return the stored
    /// snapshot without touching the price source. A failed purchase leaves the
    /// session uninitialized so the next call retries.
    pub async fn initialize(
        &mut self,
        source: &dyn PriceSource,
        symbols: &[String],
    ) -> Result<&BuySnapshot> {
        if !self.is_initialized() {
            let prices = source.fetch_latest_prices(symbols).await?;
            let snapshot = capture(prices, symbols, Local::now())?;
            info!(
                "Virtual purchase of {} instruments at {}",
                snapshot.prices.len(),
                snapshot.taken_at.format("%Y-%m-%d %H:%M:%S")
            );
            *self = SessionState::Initialized(snapshot);
        }

        match self {
            SessionState::Initialized(snapshot) => Ok(snapshot),
            SessionState::Uninitialized => unreachable!("snapshot stored above"),
        }
    }
}

/// Validates a buy quote before it is frozen into the session.
fn capture(prices: PriceMap, symbols: &[String], taken_at: DateTime<Local>) -> Result<BuySnapshot> {
    for symbol in symbols {
        match prices.get(symbol) {
            None => {
                warn!("Buy quote missing {}", symbol);
                return Err(PortfolioError::MissingPrice(symbol.clone()));
            }
            Some(price) if *price <= Decimal::ZERO => {
                warn!("Buy quote for {} is not positive: {}", symbol, price);
                return Err(PortfolioError::InvalidPrice {
                    symbol: symbol.clone(),
                    price: *price,
                });
            }
            Some(_) => {}
        }
    }
    Ok(BuySnapshot { prices, taken_at })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::mock::MockPriceSource;
    use rust_decimal_macros::dec;

    fn symbols() -> Vec<String> {
        vec!["A".to_string(), "B".to_string()]
    }

    #[tokio::test]
    async fn first_access_buys_once() {
        let source = MockPriceSource::new();
        source
            .push_prices(&[("A", dec!(1000)), ("B", dec!(1999))])
            .push_prices(&[("A", dec!(1500)), ("B", dec!(2500))]);

        let mut session = SessionState::default();
        assert!(!session.is_initialized());

        let first = session.initialize(&source, &symbols()).await.unwrap().clone();
        let second = session.initialize(&source, &symbols()).await.unwrap().clone();

        assert_eq!(source.calls(), 1);
        assert_eq!(first.prices, second.prices);
        assert_eq!(first.taken_at, second.taken_at);
        assert_eq!(second.prices["A"], dec!(1000));
    }

    #[tokio::test]
    async fn failed_purchase_is_retried() {
        let source = MockPriceSource::new();
        source
            .push_failure()
            .push_prices(&[("A", dec!(10)), ("B", dec!(20))]);

        let mut session = SessionState::default();
        assert!(matches!(
            session.initialize(&source, &symbols()).await,
            Err(PortfolioError::PriceSource(_))
        ));
        assert!(!session.is_initialized());

        let snapshot = session.initialize(&source, &symbols()).await.unwrap();
        assert_eq!(snapshot.prices["B"], dec!(20));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn incomplete_quote_is_not_stored() {
        let source = MockPriceSource::new();
        source.push_prices(&[("A", dec!(10))]);

        let mut session = SessionState::default();
        assert!(matches!(
            session.initialize(&source, &symbols()).await,
            Err(PortfolioError::MissingPrice(symbol)) if symbol == "B"
        ));
        assert!(session.snapshot().is_none());
    }

    #[tokio::test]
    async fn non_positive_quote_is_not_stored() {
        let source = MockPriceSource::new();
        source.push_prices(&[("A", dec!(10)), ("B", dec!(-1))]);

        let mut session = SessionState::default();
        assert!(matches!(
            session.initialize(&source, &symbols()).await,
            Err(PortfolioError::InvalidPrice { .. })
        ));
        assert!(!session.is_initialized());
    }
}
