//! Yahoo Finance equity/ETF resolver

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{get_json, PriceResolver};
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::model::{decimal_from_f64, AssetClass, PriceQuote};

/// Quote types preferred when picking a search hit
const PREFERRED_QUOTE_TYPES: &[&str] = &["EQUITY", "ETF"];

pub struct EquityResolver {
    client: Client,
    search_url: String,
    quote_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchHit {
    symbol: Option<String>,
    quote_type: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteEnvelope {
    quote_response: Option<QuoteResponse>,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    result: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YahooQuote {
    symbol: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    currency: Option<String>,
    exchange: Option<String>,
    quote_type: Option<String>,
    regular_market_price: Option<f64>,
    post_market_price: Option<f64>,
    regular_market_previous_close: Option<f64>,
    regular_market_change_percent: Option<f64>,
}

impl EquityResolver {
    pub fn new(client: Client, search_url: impl Into<String>, quote_url: impl Into<String>) -> Self {
        Self {
            client,
            search_url: search_url.into(),
            quote_url: quote_url.into(),
        }
    }

    pub fn from_config(client: Client, config: &AnalyzerConfig) -> Self {
        Self::new(client, config.yahoo_search_url.clone(), config.yahoo_quote_url.clone())
    }

    /// Inputs like `AAPL`, `RELIANCE.NS` or `BRK-B` can be quoted without a search
    pub fn looks_like_ticker(raw: &str) -> bool {
        !raw.is_empty()
            && raw.len() <= 10
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    }

    /// Best symbol for a free-form name: first EQUITY/ETF hit, else the first hit
    async fn search_symbol(&self, query: &str) -> Result<Option<String>> {
        let found: SearchResponse = get_json(&self.client, &self.search_url, &[("q", query)]).await?;
        let hits: Vec<SearchHit> = found
            .quotes
            .into_iter()
            .filter(|h| h.symbol.as_deref().is_some_and(|s| !s.is_empty()))
            .collect();

        let preferred = hits.iter().position(|h| {
            h.quote_type
                .as_deref()
                .is_some_and(|t| PREFERRED_QUOTE_TYPES.contains(&t.to_uppercase().as_str()))
        });

        Ok(hits
            .into_iter()
            .nth(preferred.unwrap_or(0))
            .and_then(|h| h.symbol))
    }

    async fn quote(&self, symbol: &str) -> Result<Option<PriceQuote>> {
        let envelope: QuoteEnvelope =
            get_json(&self.client, &self.quote_url, &[("symbols", symbol)]).await?;
        let Some(q) = envelope
            .quote_response
            .and_then(|r| r.result.into_iter().next())
        else {
            return Ok(None);
        };

        let Some(price) = q
            .regular_market_price
            .or(q.post_market_price)
            .or(q.regular_market_previous_close)
            .and_then(decimal_from_f64)
        else {
            tracing::debug!(symbol, "quote has no price");
            return Ok(None);
        };

        let symbol = q.symbol.unwrap_or_else(|| symbol.to_string());
        let name = q.long_name.or(q.short_name).unwrap_or_else(|| symbol.clone());
        let currency = q
            .currency
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "USD".into());
        let asset_class = match q.quote_type.as_deref() {
            Some(t) if t.eq_ignore_ascii_case("ETF") => AssetClass::Etf,
            _ => AssetClass::Stock,
        };

        Ok(Some(
            PriceQuote::new(name, symbol, price, currency, asset_class)
                .with_exchange(q.exchange)
                .with_change_percent(q.regular_market_change_percent),
        ))
    }
}

#[async_trait]
impl PriceResolver for EquityResolver {
    async fn resolve(&self, query: &str) -> Result<Option<PriceQuote>> {
        let query = query.trim();
        let is_ticker = Self::looks_like_ticker(query);
        let hit = match self.search_symbol(query).await {
            Ok(hit) => hit,
            // A ticker can still be quoted without the search endpoint
            Err(e) if is_ticker => {
                tracing::warn!(query, error = %e, "symbol search failed");
                None
            }
            Err(e) => return Err(e),
        };
        let symbol = match hit {
            Some(symbol) => symbol,
            None if is_ticker => query.to_uppercase(),
            None => return Ok(None),
        };

        tracing::debug!(query, %symbol, "quoting equity");
        self.quote(&symbol).await
    }

    fn name(&self) -> &str {
        "yahoo-finance"
    }
}
