// src/connectors/messages.rs
use serde::Deserialize;

/// Response of the Yahoo Finance chart endpoint:
/// GET /v8/finance/chart/<symbol>?range=1d&interval=1m
#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: ChartMeta,
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub symbol: String,
    pub currency: Option<String>,
    pub regular_market_price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteSeries>,
}

/// Intraday bars; minutes without trades come back as `null`.
#[derive(Debug, Default, Deserialize)]
pub struct QuoteSeries {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl ChartResult {
    /// Close of the most recent bar that traded, else the exchange's last price.
    pub fn last_price(&self) -> Option<f64> {
        self.indicators
            .quote
            .first()
            .and_then(|series| series.close.iter().rev().find_map(|close| *close))
            .or(self.meta.regular_market_price)
    }
}
