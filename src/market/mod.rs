pub mod rates;
pub mod stocks;

use serde::{Deserialize, Serialize};

pub use rates::ApiLayerRates;
pub use stocks::AlphaVantageQuotes;

/// Sentinel reported when a rate or price could not be fetched.
pub const NO_DATA: &str = "No data";

/// Currencies requested when the user settings carry no list.
pub const DEFAULT_CURRENCIES: [&str; 2] = ["USD", "EUR"];

/// A fetched market number, or the "No data" sentinel. Serializes to either
/// a JSON number or the sentinel string so the page payloads match the
/// documented shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MarketValue {
    Amount(f64),
    Missing(String),
}

impl MarketValue {
    pub fn no_data() -> Self {
        MarketValue::Missing(NO_DATA.to_string())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, MarketValue::Missing(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRate {
    pub currency: String,
    pub rate: MarketValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPrice {
    pub stock: String,
    pub price: MarketValue,
}

/// Exchange-rate collaborator: one record per requested currency, in request
/// order, with the sentinel standing in for anything unavailable.
pub trait RateProvider {
    fn exchange_rates(&self, base: &str, currencies: &[String]) -> Vec<CurrencyRate>;
}

/// Stock-quote collaborator: one record per symbol, failures independent.
pub trait QuoteProvider {
    fn stock_prices(&self, symbols: &[String]) -> Vec<StockPrice>;
}

/// Falls back to the default currency list when settings provided none.
pub fn currencies_or_default(list: Option<&[String]>) -> Vec<String> {
    match list {
        Some(currencies) if !currencies.is_empty() => currencies.to_vec(),
        _ => DEFAULT_CURRENCIES.iter().map(|c| c.to_string()).collect(),
    }
}

/// The single-entry list reported when no stock symbols were configured.
pub fn sentinel_stocks() -> Vec<StockPrice> {
    vec![StockPrice {
        stock: NO_DATA.to_string(),
        price: MarketValue::no_data(),
    }]
}
