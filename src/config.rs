// src/config.rs

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;

pub const DEFAULT_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize, Clone)]
pub struct PriceSourceConfig {
    pub base_url: String,
    pub range: String,
    pub interval: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub directory: String,
    pub file_prefix: String,
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub capital: Decimal,
    pub currency_symbol: String,
    pub price_source: PriceSourceConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Defaults, then `Settings.toml` (optional), then `FOLIO__*` env vars.
    pub fn new() -> Result<Self, ConfigError> {
        let builder = Self::defaults()?
            .add_source(File::with_name("Settings").required(false))
            .add_source(Environment::with_prefix("FOLIO").separator("__"));

        Self::from_builder(builder)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("capital", 100_000)?
            .set_default("currency_symbol", "₹")?
            .set_default("price_source.base_url", DEFAULT_CHART_URL)?
            .set_default("price_source.range", "1d")?
            .set_default("price_source.interval", "1m")?
            .set_default("price_source.timeout_secs", 10)?
            .set_default("price_source.user_agent", DEFAULT_USER_AGENT)?
            .set_default("logging.directory", "logs")?
            .set_default("logging.file_prefix", "live_folio.log")?
            .set_default("logging.level", "info")
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capital <= Decimal::ZERO {
            return Err(ConfigError::Message(format!(
                "capital must be positive, got {}",
                self.capital
            )));
        }
        if self.price_source.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "price_source.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
