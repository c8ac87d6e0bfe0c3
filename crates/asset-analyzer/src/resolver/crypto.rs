//! CoinGecko-backed crypto resolver.
//! Finds the best coin for a name or symbol via `/search`, then prices it in
//! USD via `/simple/price`.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{get_json, PriceResolver};
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::model::{decimal_from_f64, AssetClass, PriceQuote};

pub struct CryptoResolver {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    coins: Vec<Coin>,
}

#[derive(Debug, Deserialize)]
struct Coin {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct CoinPrice {
    usd: Option<f64>,
}

impl CryptoResolver {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(client: Client, config: &AnalyzerConfig) -> Self {
        Self::new(client, config.coingecko_base_url.clone())
    }

    async fn search(&self, query: &str) -> Result<Option<Coin>> {
        let url = format!("{}/search", self.base_url);
        let found: SearchResponse = get_json(&self.client, &url, &[("query", query)]).await?;

        // CoinGecko ranks results; the first coin is the best match
        Ok(found.coins.into_iter().find(|c| !c.id.is_empty()))
    }

    async fn price(&self, id: &str) -> Result<Option<CoinPrice>> {
        let url = format!("{}/simple/price", self.base_url);
        let mut prices: HashMap<String, CoinPrice> = get_json(
            &self.client,
            &url,
            &[("ids", id), ("vs_currencies", "usd")],
        )
        .await?;

        Ok(prices.remove(id))
    }
}

#[async_trait]
impl PriceResolver for CryptoResolver {
    async fn resolve(&self, query: &str) -> Result<Option<PriceQuote>> {
        let Some(coin) = self.search(query.trim()).await? else {
            tracing::debug!(query, "no coin matched");
            return Ok(None);
        };

        let Some(price) = self.price(&coin.id).await? else {
            return Ok(None);
        };
        let Some(usd) = price.usd.and_then(decimal_from_f64) else {
            tracing::debug!(id = %coin.id, "coin has no USD price");
            return Ok(None);
        };

        let name = if coin.name.is_empty() { coin.id.clone() } else { coin.name };
        let symbol = coin.symbol.to_uppercase();

        Ok(Some(PriceQuote::new(name, symbol, usd, "USD", AssetClass::Crypto)))
    }

    fn name(&self) -> &str {
        "coingecko"
    }
}
