//! Asset Classifier
//!
//! Static substring heuristics that map a free-form identifier to an
//! [`AssetClass`]. Rules are checked in order; the first match wins.

use crate::model::AssetClass;

/// Lowercase crypto names and symbols; any substring hit classifies as crypto
pub const CRYPTO_TOKENS: &[&str] = &[
    "btc", "bitcoin", "eth", "ethereum", "bnb", "doge", "dogecoin", "sol", "solana", "ada",
    "matic", "ltc", "avax",
];

/// ISO-4217 codes recognised in compact pairs such as `USDINR`
const CURRENCY_CODES: &[&str] = &[
    "AED", "AUD", "BRL", "CAD", "CHF", "CNY", "CZK", "DKK", "EUR", "GBP", "HKD", "HUF", "IDR",
    "ILS", "INR", "JPY", "KRW", "MXN", "MYR", "NOK", "NZD", "PHP", "PKR", "PLN", "RUB", "SAR",
    "SEK", "SGD", "THB", "TRY", "TWD", "USD", "ZAR",
];

/// Classify an asset identifier.
///
/// 1. contains `/` → forex
/// 2. six letters made of two known currency codes → forex
/// 3. contains a crypto token → crypto
/// 4. anything else → stock
pub fn classify(raw: &str) -> AssetClass {
    if raw.contains('/') || is_compact_pair(raw) {
        return AssetClass::Forex;
    }

    let lower = raw.to_lowercase();
    if CRYPTO_TOKENS.iter().any(|token| lower.contains(token)) {
        return AssetClass::Crypto;
    }

    AssetClass::Stock
}

/// Split `usd/inr`, `USD / INR` or `USDINR` into two uppercase three-letter codes.
///
/// Purely syntactic: any three ASCII letters count as a code.
pub fn split_pair(raw: &str) -> Option<(String, String)> {
    let compact = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();

    let (base, quote) = match compact.split_once('/') {
        Some(halves) => halves,
        None if compact.len() == 6 => compact.split_at_checked(3)?,
        None => return None,
    };

    let is_code = |code: &str| code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic());
    (is_code(base) && is_code(quote)).then(|| (base.to_string(), quote.to_string()))
}

/// Split `USDINR`, `usd inr` and similar into `("USD", "INR")` when both halves are known codes
pub fn split_compact_pair(raw: &str) -> Option<(String, String)> {
    if raw.contains('/') {
        return None;
    }
    split_pair(raw).filter(|(base, quote)| is_currency_code(base) && is_currency_code(quote))
}

fn is_compact_pair(raw: &str) -> bool {
    split_compact_pair(raw).is_some()
}

fn is_currency_code(code: &str) -> bool {
    CURRENCY_CODES.contains(&code)
}
