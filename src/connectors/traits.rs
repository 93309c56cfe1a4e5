use crate::errors::PriceSourceError;
use crate::types::PriceMap;
use async_trait::async_trait;

#[async_trait]
pub trait PriceSource: Send + Sync {
    fn name(&self) -> &str;

    /// Latest trade price for every requested symbol. Implementations either return
    /// one entry per symbol or fail; callers treat a missing entry as a missing price.
    async fn fetch_latest_prices(&self, symbols: &[String]) -> Result<PriceMap, PriceSourceError>;
}
