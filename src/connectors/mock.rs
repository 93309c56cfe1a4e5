// src/connectors/mock.rs
use crate::connectors::traits::PriceSource;
use crate::errors::PriceSourceError;
use crate::types::PriceMap;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Replays queued responses in order; `None` simulates an outage.
#[derive(Default)]
pub struct MockPriceSource {
    responses: Mutex<VecDeque<Option<PriceMap>>>,
    calls: AtomicUsize,
}

impl MockPriceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_prices(&self, entries: &[(&str, Decimal)]) -> &Self {
        let prices = entries
            .iter()
            .map(|(symbol, price)| (symbol.to_string(), *price))
            .collect();
        self.responses.lock().unwrap().push_back(Some(prices));
        self
    }

    pub fn push_failure(&self) -> &Self {
        self.responses.lock().unwrap().push_back(None);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceSource for MockPriceSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_latest_prices(&self, _symbols: &[String]) -> Result<PriceMap, PriceSourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.lock().unwrap().pop_front() {
            Some(Some(prices)) => Ok(prices),
            Some(None) => Err(PriceSourceError::Provider("simulated outage".to_string())),
            None => Err(PriceSourceError::NoData("no queued response".to_string())),
        }
    }
}
