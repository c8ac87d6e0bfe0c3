//! Static Price Sources
//!
//! For testing and demo purposes. Returns fixed quotes and rates with no network access.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{Conversion, CurrencyConverter, PriceResolver};
use crate::error::{AnalyzerError, Result};
use crate::model::{AssetClass, PriceQuote, INVALID_REQUEST};

/// Resolver backed by an in-memory table keyed by lowercase query
pub struct StaticResolver {
    name: String,
    quotes: HashMap<String, PriceQuote>,
    /// When set, every lookup fails with this upstream message
    failure: Option<String>,
    calls: AtomicUsize,
}

impl StaticResolver {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quotes: HashMap::new(),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A resolver whose upstream is always down
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(name)
        }
    }

    /// Register a quote under one or more query aliases
    pub fn with_quote(mut self, aliases: &[&str], quote: PriceQuote) -> Self {
        for alias in aliases {
            self.quotes.insert(alias.to_lowercase(), quote.clone());
        }
        self
    }

    /// Realistic fixed prices for a handful of well-known assets
    pub fn demo() -> Self {
        Self::new("static")
            .with_quote(
                &["bitcoin", "btc"],
                PriceQuote::new("Bitcoin", "BTC", dec!(67250.50), "USD", AssetClass::Crypto),
            )
            .with_quote(
                &["ethereum", "eth"],
                PriceQuote::new("Ethereum", "ETH", dec!(3450), "USD", AssetClass::Crypto),
            )
            .with_quote(
                &["usd/inr", "usdinr"],
                PriceQuote::new("USD/INR", "USD/INR", dec!(83.25), "INR", AssetClass::Forex),
            )
            .with_quote(
                &["eur/usd", "eurusd"],
                PriceQuote::new("EUR/USD", "EUR/USD", dec!(1.0842), "USD", AssetClass::Forex),
            )
            .with_quote(
                &["apple", "aapl"],
                PriceQuote::new("Apple Inc.", "AAPL", dec!(189.84), "USD", AssetClass::Stock)
                    .with_exchange(Some("NMS".into()))
                    .with_change_percent(Some(0.85)),
            )
            .with_quote(
                &["reliance", "reliance.ns"],
                PriceQuote::new(
                    "Reliance Industries Limited",
                    "RELIANCE.NS",
                    dec!(2950.40),
                    "INR",
                    AssetClass::Stock,
                )
                .with_exchange(Some("NSI".into())),
            )
            .with_quote(
                &["spy"],
                PriceQuote::new("SPDR S&P 500 ETF Trust", "SPY", dec!(512.10), "USD", AssetClass::Etf)
                    .with_change_percent(Some(-3.2)),
            )
    }

    /// Number of lookups served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceResolver for StaticResolver {
    async fn resolve(&self, query: &str) -> Result<Option<PriceQuote>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(AnalyzerError::Upstream(message.clone()));
        }
        Ok(self.quotes.get(&query.trim().to_lowercase()).cloned())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Converter with a fixed table of rates
#[derive(Default)]
pub struct StaticConverter {
    /// Keyed by `(FROM, TO)`
    rates: HashMap<(String, String), Decimal>,
}

impl StaticConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rate(mut self, from: &str, to: &str, rate: Decimal) -> Self {
        self.rates
            .insert((from.to_uppercase(), to.to_uppercase()), rate);
        self
    }
}

#[async_trait]
impl CurrencyConverter for StaticConverter {
    async fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Option<Conversion>> {
        let key = (from.to_uppercase(), to.to_uppercase());
        if key.0 == key.1 {
            return Ok(Some(Conversion { amount, rate: Decimal::ONE }));
        }
        let Some(&rate) = self.rates.get(&key) else {
            return Ok(None);
        };
        let converted = amount
            .checked_mul(rate)
            .ok_or_else(|| AnalyzerError::Validation(INVALID_REQUEST.into()))?;

        Ok(Some(Conversion { amount: converted, rate }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_resolver() {
        let resolver = StaticResolver::demo();

        let btc = resolver.resolve(" BTC ").await.unwrap().unwrap();
        assert_eq!(btc.symbol, "BTC");
        assert!(btc.price > Decimal::ZERO);
        assert_eq!(btc.asset_class, AssetClass::Crypto);
        assert_eq!(resolver.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_asset() {
        let resolver = StaticResolver::demo();
        assert!(resolver.resolve("NOTREAL").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failing_resolver() {
        let resolver = StaticResolver::failing("down", "connection refused");
        let err = resolver.resolve("btc").await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_static_converter() {
        let converter = StaticConverter::new().with_rate("inr", "usd", dec!(0.012));
        let conversion = converter.convert(dec!(1000), "INR", "USD").await.unwrap().unwrap();
        assert_eq!(conversion.amount, dec!(12));
        assert!(converter.convert(dec!(1), "GBP", "USD").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_static_converter_overflow_is_error() {
        let converter = StaticConverter::new().with_rate("USD", "INR", dec!(83.25));
        let err = converter.convert(Decimal::MAX, "USD", "INR").await.unwrap_err();
        assert!(matches!(err, AnalyzerError::Validation(_)));
    }
}
