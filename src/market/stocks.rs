use std::{collections::HashMap, time::Duration};

use reqwest::blocking::Client;
use serde::Deserialize;

use super::{MarketValue, QuoteProvider, StockPrice};

const API_URL: &str = "https://www.alphavantage.co/query";
const API_KEY_ENV: &str = "API_KEY_ALPHAVANTAGE";
const PRICE_FIELD: &str = "05. price";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Stock-quote client for the AlphaVantage `GLOBAL_QUOTE` endpoint.
///
/// Symbols are looked up one by one and fail independently: a bad response
/// for one ticker yields the sentinel for that ticker only.
pub struct AlphaVantageQuotes {
    client: Client,
    api_key: String,
}

impl AlphaVantageQuotes {
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key: api_key.into(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::var(API_KEY_ENV).unwrap_or_default())
    }

    fn quote(&self, symbol: &str) -> MarketValue {
        let url = format!(
            "{API_URL}?function=GLOBAL_QUOTE&symbol={symbol}&apikey={}",
            self.api_key
        );
        let response = match self.client.get(&url).send() {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(symbol, %err, "stock-quote request failed");
                return MarketValue::no_data();
            }
        };
        if !response.status().is_success() {
            tracing::error!(symbol, status = %response.status(), "stock-quote request rejected");
            return MarketValue::no_data();
        }
        let body: QuoteResponse = match response.json() {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(symbol, %err, "stock-quote response was not valid JSON");
                return MarketValue::no_data();
            }
        };
        match body.quote.get(PRICE_FIELD).and_then(|raw| raw.parse().ok()) {
            Some(price) => MarketValue::Amount(price),
            None => {
                tracing::warn!(symbol, "quote payload carried no price");
                MarketValue::no_data()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(rename = "Global Quote", default)]
    quote: HashMap<String, String>,
}

impl QuoteProvider for AlphaVantageQuotes {
    fn stock_prices(&self, symbols: &[String]) -> Vec<StockPrice> {
        if symbols.is_empty() {
            return super::sentinel_stocks();
        }
        symbols
            .iter()
            .map(|symbol| {
                tracing::info!(%symbol, "requesting stock quote");
                StockPrice {
                    stock: symbol.clone(),
                    price: self.quote(symbol),
                }
            })
            .collect()
    }
}
