use std::{collections::HashMap, time::Duration};

use reqwest::blocking::Client;
use serde::Deserialize;

use super::{CurrencyRate, MarketValue, RateProvider};
use crate::analysis::round2;

const API_URL: &str = "https://api.apilayer.com/exchangerates_data/latest";
const API_KEY_ENV: &str = "API_KEY_APILAYER";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Exchange-rate client for the apilayer `exchangerates_data` API.
///
/// One batched call covers every requested currency. Timeouts, transport
/// failures, and non-success statuses all degrade to the sentinel for every
/// requested currency; nothing propagates to the report layer.
pub struct ApiLayerRates {
    client: Client,
    api_key: String,
}

impl ApiLayerRates {
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
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    #[serde(default)]
    rates: HashMap<String, f64>,
}

impl RateProvider for ApiLayerRates {
    fn exchange_rates(&self, base: &str, currencies: &[String]) -> Vec<CurrencyRate> {
        let no_data = || {
            currencies
                .iter()
                .map(|currency| CurrencyRate {
                    currency: currency.clone(),
                    rate: MarketValue::no_data(),
                })
                .collect::<Vec<_>>()
        };

        let url = format!("{API_URL}?symbols={}&base={base}", currencies.join("%2C"));
        tracing::info!(%base, "requesting exchange rates");
        let response = match self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .send()
        {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(%err, "exchange-rate request failed");
                return no_data();
            }
        };
        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "exchange-rate request rejected");
            return no_data();
        }
        let body: RatesResponse = match response.json() {
            Ok(body) => body,
            Err(err) => {
                tracing::error!(%err, "exchange-rate response was not valid JSON");
                return no_data();
            }
        };

        currencies
            .iter()
            .map(|currency| {
                let rate = match body.rates.get(currency) {
                    Some(price) if *price != 0.0 => MarketValue::Amount(round2(1.0 / price)),
                    _ => MarketValue::no_data(),
                };
                CurrencyRate {
                    currency: currency.clone(),
                    rate,
                }
            })
            .collect()
    }
}
