//! Currency-pair rates from exchangerate.host

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use super::{get_json, Conversion, CurrencyConverter, PriceResolver};
use crate::classifier::split_pair;
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::model::{decimal_from_f64, AssetClass, PriceQuote};

pub struct ForexResolver {
    client: Client,
    base_url: String,
    access_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    #[serde(default)]
    rates: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    result: Option<f64>,
    #[serde(default)]
    info: ConvertInfo,
}

#[derive(Debug, Default, Deserialize)]
struct ConvertInfo {
    rate: Option<f64>,
}

impl ForexResolver {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key: None,
        }
    }

    pub fn from_config(client: Client, config: &AnalyzerConfig) -> Self {
        let mut resolver = Self::new(client, config.forex_base_url.clone());
        resolver.access_key = config.forex_access_key.clone();
        resolver
    }

    /// Normalize `usd/inr`, `USD / INR` or `USDINR` into `("USD", "INR")`
    pub fn normalize_pair(raw: &str) -> Option<(String, String)> {
        split_pair(raw)
    }

    fn params<'a>(&'a self, mut params: Vec<(&'a str, &'a str)>) -> Vec<(&'a str, &'a str)> {
        if let Some(key) = &self.access_key {
            params.push(("access_key", key.as_str()));
        }
        params
    }

    async fn rate(&self, base: &str, quote: &str) -> Result<Option<Decimal>> {
        let url = format!("{}/latest", self.base_url);
        let params = self.params(vec![("base", base), ("symbols", quote)]);
        let latest: LatestResponse = get_json(&self.client, &url, &params).await?;

        Ok(latest
            .rates
            .get(quote)
            .and_then(Value::as_f64)
            .and_then(decimal_from_f64))
    }
}

#[async_trait]
impl PriceResolver for ForexResolver {
    async fn resolve(&self, query: &str) -> Result<Option<PriceQuote>> {
        let Some((base, quote)) = Self::normalize_pair(query) else {
            return Ok(None);
        };

        let Some(rate) = self.rate(&base, &quote).await? else {
            tracing::debug!(%base, %quote, "no rate for pair");
            return Ok(None);
        };

        let pair = format!("{base}/{quote}");
        Ok(Some(PriceQuote::new(pair.clone(), pair, rate, quote, AssetClass::Forex)))
    }

    fn name(&self) -> &str {
        "exchangerate.host"
    }
}

#[async_trait]
impl CurrencyConverter for ForexResolver {
    async fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Option<Conversion>> {
        let from = from.to_ascii_uppercase();
        let to = to.to_ascii_uppercase();
        if from == to {
            return Ok(Some(Conversion { amount, rate: Decimal::ONE }));
        }

        let url = format!("{}/convert", self.base_url);
        let amount_str = amount.to_string();
        let params = self.params(vec![
            ("from", from.as_str()),
            ("to", to.as_str()),
            ("amount", amount_str.as_str()),
        ]);
        let converted: ConvertResponse = get_json(&self.client, &url, &params).await?;

        let Some(result) = converted.result.and_then(decimal_from_f64) else {
            return Ok(None);
        };
        let rate = converted
            .info
            .rate
            .and_then(decimal_from_f64)
            .unwrap_or(Decimal::ONE);

        Ok(Some(Conversion { amount: result, rate }))
    }
}
