//! Price Resolvers
//!
//! One resolver per upstream data source. Each takes the raw asset string and
//! either prices it, reports that it does not know it, or fails.

mod crypto;
mod equity;
mod forex;
mod mock;

pub use crypto::CryptoResolver;
pub use equity::EquityResolver;
pub use forex::ForexResolver;
pub use mock::{StaticConverter, StaticResolver};

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::model::PriceQuote;

/// Price source trait (Strategy pattern)
///
/// `Ok(None)` means the source has no match for the query; `Err` means the
/// source itself could not be reached or answered garbage.
#[async_trait]
pub trait PriceResolver: Send + Sync {
    async fn resolve(&self, query: &str) -> Result<Option<PriceQuote>>;

    /// Resolver name for logs
    fn name(&self) -> &str;
}

/// Result of converting an amount between currencies
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conversion {
    pub amount: Decimal,
    pub rate: Decimal,
}

#[async_trait]
pub trait CurrencyConverter: Send + Sync {
    async fn convert(&self, amount: Decimal, from: &str, to: &str) -> Result<Option<Conversion>>;
}

/// GET `url` with query params and decode the JSON body
async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T> {
    tracing::debug!(url, ?query, "upstream request");

    let body = client
        .get(url)
        .header("accept", "application/json")
        .query(query)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;

    Ok(serde_json::from_slice(&body)?)
}
