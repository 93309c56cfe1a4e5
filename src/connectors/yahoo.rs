// src/connectors/yahoo.rs
use crate::config::PriceSourceConfig;
use crate::connectors::messages::ChartResponse;
use crate::connectors::traits::PriceSource;
use crate::errors::PriceSourceError;
use crate::types::PriceMap;
use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::Client;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub struct YahooClient {
    http_client: Client,
    base_url: Url,
    range: String,
    interval: String,
}

impl YahooClient {
    pub fn new(settings: &PriceSourceConfig) -> Result<Self, PriceSourceError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self {
            http_client,
            base_url: Url::parse(&settings.base_url)?,
            range: settings.range.clone(),
            interval: settings.interval.clone(),
        })
    }

    fn chart_url(&self, symbol: &str) -> Result<Url, PriceSourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                PriceSourceError::Provider(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .push(symbol);
        url.query_pairs_mut()
            .append_pair("range", &self.range)
            .append_pair("interval", &self.interval);
        Ok(url)
    }

    async fn fetch_price(&self, symbol: &str) -> Result<Decimal, PriceSourceError> {
        let url = self.chart_url(symbol)?;
        debug!("Fetching chart for {}: {}", symbol, url);

        let body = self
            .http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        let chart: ChartResponse = serde_json::from_slice(&body)?;
        let price = price_from_chart(symbol, chart)?;
        debug!("{} last traded at {}", symbol, price);
        Ok(price)
    }
}

/// Picks the latest price out of a chart payload.
pub fn price_from_chart(symbol: &str, response: ChartResponse) -> Result<Decimal, PriceSourceError> {
    if let Some(err) = response.chart.error {
        warn!("Yahoo reported {} for {}: {}", err.code, symbol, err.description);
        return Err(PriceSourceError::Provider(format!(
            "{}: {} ({})",
            symbol, err.description, err.code
        )));
    }

    let raw = response
        .chart
        .result
        .as_deref()
        .and_then(|results| results.first())
        .and_then(|result| result.last_price())
        .ok_or_else(|| PriceSourceError::NoData(symbol.to_string()))?;

    Decimal::from_f64(raw)
        .map(|price| price.normalize())
        .ok_or_else(|| PriceSourceError::Provider(format!("{}: unrepresentable price {}", symbol, raw)))
}

#[async_trait]
impl PriceSource for YahooClient {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    async fn fetch_latest_prices(&self, symbols: &[String]) -> Result<PriceMap, PriceSourceError> {
        let fetches = symbols.iter().map(|symbol| async move {
            self.fetch_price(symbol)
                .await
                .map(|price| (symbol.clone(), price))
        });

        let prices: PriceMap = try_join_all(fetches).await?.into_iter().collect();
        info!("Fetched {} prices from {}", prices.len(), self.name());
        Ok(prices)
    }
}
