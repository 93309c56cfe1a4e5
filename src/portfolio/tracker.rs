// src/portfolio/tracker.rs
use crate::connectors::traits::PriceSource;
use crate::errors::Result;
use crate::portfolio::aggregate::summarize;
use crate::portfolio::allocator::allocate;
use crate::portfolio::session::SessionState;
use crate::portfolio::valuation::valuate;
use crate::types::PortfolioReport;
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Runs the refresh pipeline: buy once, then fetch live prices, allocate,
/// value and total. The session is owned by the caller and passed in.
pub struct PortfolioTracker {
    price_source: Box<dyn PriceSource>,
    weights: Vec<(String, Decimal)>,
    symbols: Vec<String>,
    capital: Decimal,
}

impl PortfolioTracker {
    pub fn new(
        price_source: Box<dyn PriceSource>,
        weights: Vec<(String, Decimal)>,
        capital: Decimal,
    ) -> Self {
        let symbols = weights.iter().map(|(symbol, _)| symbol.clone()).collect();
        Self {
            price_source,
            weights,
            symbols,
            capital,
        }
    }

    pub fn capital(&self) -> Decimal {
        self.capital
    }

    pub fn source_name(&self) -> &str {
        self.price_source.name()
    }

    pub async fn refresh(&self, session: &mut SessionState) -> Result<PortfolioReport> {
        info!("Refreshing portfolio from {}", self.source_name());
        let snapshot = session
            .initialize(self.price_source.as_ref(), &self.symbols)
            .await?;

        let live_prices = self
            .price_source
            .fetch_latest_prices(&self.symbols)
            .await?;

        let (allocations, total_invested) = allocate(&snapshot.prices, &self.weights, self.capital)?;
        let rows = valuate(&allocations, &live_prices)?;
        let summary = summarize(&rows)?;

        for row in &rows {
            debug!(
                "{}: qty {} buy {} live {} pnl {} ({}%)",
                row.allocation.symbol,
                row.allocation.quantity,
                row.allocation.buy_price,
                row.live_price,
                row.pnl_abs,
                row.pnl_pct.round_dp(2)
            );
        }
        debug_assert_eq!(total_invested, summary.total_invested);
        info!(
            "Invested {} -> current value {} (P&L {})",
            summary.total_invested, summary.total_current_value, summary.total_pnl_abs
        );

        Ok(PortfolioReport {
            taken_at: snapshot.taken_at,
            capital: self.capital,
            summary,
            rows,
        })
    }
}
