//! Domain Models
//!
//! Request, quote and response types for a single analysis.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!
//! Volatility is a ratio, not money, and stays `f64`.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{AnalyzerError, Result};

/// Message returned for any malformed analysis request
pub const INVALID_REQUEST: &str = "Provide valid 'asset' and positive 'amount'";

/// Convert an upstream float into a decimal, rejecting NaN and infinities
pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if value.is_finite() {
        Decimal::from_f64(value)
    } else {
        None
    }
}

/// Broad asset class an identifier belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Forex,
    Crypto,
    Stock,
    Etf,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forex => "forex",
            Self::Crypto => "crypto",
            Self::Stock => "stock",
            Self::Etf => "etf",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A live price for a resolved asset
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Display name (e.g., "Bitcoin", "Apple Inc.", "USD/INR")
    pub name: String,

    /// Ticker, coin symbol or currency pair
    pub symbol: String,

    /// Last price in `currency`
    pub price: Decimal,

    /// ISO currency the price is quoted in
    pub currency: String,

    /// Asset class as reported by the provider
    pub asset_class: AssetClass,

    /// Listing exchange, equities only
    pub exchange: Option<String>,

    /// Day's absolute percent change as a ratio (0.05 = 5%)
    pub volatility: Option<f64>,
}

impl PriceQuote {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        price: Decimal,
        currency: impl Into<String>,
        asset_class: AssetClass,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            price,
            currency: currency.into(),
            asset_class,
            exchange: None,
            volatility: None,
        }
    }

    pub fn with_exchange(mut self, exchange: Option<String>) -> Self {
        self.exchange = exchange;
        self
    }

    /// Attach a volatility proxy derived from a percent change (e.g. `-3.5` → `0.035`)
    pub fn with_change_percent(mut self, change_percent: Option<f64>) -> Self {
        self.volatility = change_percent
            .filter(|p| p.is_finite())
            .map(|p| p.abs() / 100.0);
        self
    }
}

/// A validated analysis request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Free-form asset identifier, trimmed and non-empty
    pub asset: String,

    /// Amount to invest, strictly positive
    pub amount: Decimal,

    /// Currency the amount is denominated in, if the caller said so
    pub amount_currency: Option<String>,
}

impl AnalysisRequest {
    pub fn new(asset: impl Into<String>, amount: Decimal) -> Result<Self> {
        let asset = asset.into().trim().to_string();
        if asset.is_empty() || amount <= Decimal::ZERO {
            return Err(AnalyzerError::Validation(INVALID_REQUEST.into()));
        }
        Ok(Self {
            asset,
            amount,
            amount_currency: None,
        })
    }

    pub fn with_amount_currency(mut self, currency: impl Into<String>) -> Self {
        let currency = currency.into().trim().to_uppercase();
        self.amount_currency = (!currency.is_empty()).then_some(currency);
        self
    }

    /// Build a request from a loosely-typed JSON body.
    ///
    /// Accepts `asset` or `query` for the identifier and `amount` or `value`
    /// for the amount; the amount may be a number or a numeric string.
    pub fn from_value(body: &Value) -> Result<Self> {
        let invalid = || AnalyzerError::Validation(INVALID_REQUEST.into());

        let asset = body
            .get("asset")
            .filter(|v| !v.is_null())
            .or_else(|| body.get("query"))
            .and_then(Value::as_str)
            .ok_or_else(invalid)?;

        let amount = body
            .get("amount")
            .filter(|v| !v.is_null())
            .or_else(|| body.get("value"))
            .and_then(parse_amount)
            .ok_or_else(invalid)?;

        let request = Self::new(asset, amount)?;

        Ok(match body.get("amount_currency").and_then(Value::as_str) {
            Some(currency) => request.with_amount_currency(currency),
            None => request,
        })
    }
}

fn parse_amount(value: &Value) -> Option<Decimal> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    decimal_from_f64(raw)
}

/// Risk label derived from volatility
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static risk/return labels for an asset
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RiskAssessment {
    pub risk: RiskLevel,

    /// Expected return as a ratio (0.08 = 8%)
    pub expected_return: Decimal,

    pub holding_period: &'static str,
}

/// Response body of `POST /api/analyze`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub asset: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    #[serde(rename = "type")]
    pub asset_class: AssetClass,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange: Option<String>,

    pub currency: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub current_price: Decimal,

    pub volatility: f64,

    /// Percent string, e.g. "8.00%"
    pub expected_return: String,

    pub risk: RiskLevel,

    pub holding_period: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub estimated_value: Decimal,

    pub summary: String,

    pub disclaimer: String,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub amount_in_asset_currency: Option<Decimal>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub conversion_rate: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_error: Option<String>,
}
