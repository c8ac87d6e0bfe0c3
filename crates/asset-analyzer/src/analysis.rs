//! Analysis Pipeline
//!
//! classify → resolver chain → risk labels → response

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::classifier::classify;
use crate::config::AnalyzerConfig;
use crate::error::{AnalyzerError, Result};
use crate::model::{AnalysisRequest, AnalysisResponse, AssetClass, PriceQuote, INVALID_REQUEST};
use crate::resolver::{
    CryptoResolver, CurrencyConverter, EquityResolver, ForexResolver, PriceResolver,
};
use crate::risk;

pub const DISCLAIMER: &str = "Informational only. Not financial advice.";

/// Long-form disclaimer served by `GET /api/disclaimer`
pub const DISCLAIMER_TEXT: &str =
    "This tool provides informational analysis only. It is not financial advice.";

const CONVERSION_FAILED: &str = "Conversion failed";

/// Stateless analyzer; cheap to share behind `Arc`
pub struct Analyzer {
    forex: Arc<dyn PriceResolver>,
    crypto: Arc<dyn PriceResolver>,
    equity: Arc<dyn PriceResolver>,
    converter: Arc<dyn CurrencyConverter>,
}

impl Analyzer {
    pub fn new(
        forex: Arc<dyn PriceResolver>,
        crypto: Arc<dyn PriceResolver>,
        equity: Arc<dyn PriceResolver>,
        converter: Arc<dyn CurrencyConverter>,
    ) -> Self {
        Self {
            forex,
            crypto,
            equity,
            converter,
        }
    }

    /// Live analyzer backed by Yahoo Finance, CoinGecko and exchangerate.host
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        let client = config.http_client()?;
        let forex = Arc::new(ForexResolver::from_config(client.clone(), config));

        Ok(Self::new(
            forex.clone(),
            Arc::new(CryptoResolver::from_config(client.clone(), config)),
            Arc::new(EquityResolver::from_config(client, config)),
            forex,
        ))
    }

    /// Resolvers tried for a class, in order
    fn chain(&self, class: AssetClass) -> Vec<&dyn PriceResolver> {
        match class {
            AssetClass::Forex => vec![self.forex.as_ref()],
            // "sol", "ada", "eth" also hit company names, so equities get a second chance
            AssetClass::Crypto => vec![self.crypto.as_ref(), self.equity.as_ref()],
            AssetClass::Stock | AssetClass::Etf => vec![self.equity.as_ref()],
        }
    }

    /// Price an asset by walking its resolver chain
    pub async fn resolve(&self, asset: &str) -> Result<PriceQuote> {
        let class = classify(asset);
        info!(asset, %class, "classified asset");

        let mut last_error = None;
        for resolver in self.chain(class) {
            match resolver.resolve(asset).await {
                Ok(Some(quote)) => {
                    info!(asset, resolver = resolver.name(), symbol = %quote.symbol, "asset priced");
                    return Ok(quote);
                }
                Ok(None) => debug!(asset, resolver = resolver.name(), "no match"),
                Err(e) => {
                    warn!(asset, resolver = resolver.name(), error = %e, "resolver failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(AnalyzerError::not_found))
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        let quote = self.resolve(&request.asset).await?;

        let volatility = quote
            .volatility
            .unwrap_or_else(|| risk::default_volatility(quote.asset_class));
        let assessment = risk::assess(quote.asset_class, volatility);
        let expected_return = risk::format_percent(assessment.expected_return);
        let estimated_value = risk::estimated_value(request.amount, assessment.expected_return)
            .ok_or_else(|| AnalyzerError::Validation(INVALID_REQUEST.into()))?;

        let summary = format!(
            "{} detected as {} with {} risk and expected return of {}.",
            quote.name, quote.asset_class, assessment.risk, expected_return
        );

        let mut response = AnalysisResponse {
            symbol: (quote.symbol != quote.name).then(|| quote.symbol.clone()),
            asset: quote.name,
            asset_class: quote.asset_class,
            exchange: quote.exchange,
            currency: quote.currency,
            current_price: quote.price,
            volatility: round_ratio(volatility),
            expected_return,
            risk: assessment.risk,
            holding_period: assessment.holding_period.to_string(),
            estimated_value,
            summary,
            disclaimer: DISCLAIMER.into(),
            amount_in_asset_currency: None,
            conversion_rate: None,
            conversion_error: None,
        };

        if let Some(from) = &request.amount_currency {
            if !from.eq_ignore_ascii_case(&response.currency) {
                self.attach_conversion(&mut response, request, from).await;
            }
        }

        Ok(response)
    }

    /// Express the invested amount in the asset's currency; failures are reported inline
    async fn attach_conversion(
        &self,
        response: &mut AnalysisResponse,
        request: &AnalysisRequest,
        from: &str,
    ) {
        match self
            .converter
            .convert(request.amount, from, &response.currency)
            .await
        {
            Ok(Some(conversion)) => {
                response.amount_in_asset_currency = Some(conversion.amount.round_dp(4));
                response.conversion_rate = Some(conversion.rate);
            }
            Ok(None) => {
                warn!(from, to = %response.currency, "no conversion rate");
                response.conversion_error = Some(CONVERSION_FAILED.into());
            }
            Err(e) => {
                warn!(from, to = %response.currency, error = %e, "conversion failed");
                response.conversion_error = Some(CONVERSION_FAILED.into());
            }
        }
    }
}

fn round_ratio(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::RiskLevel;
    use crate::resolver::{StaticConverter, StaticResolver};
    use rust_decimal_macros::dec;

    struct Fixture {
        forex: Arc<StaticResolver>,
        crypto: Arc<StaticResolver>,
        equity: Arc<StaticResolver>,
        analyzer: Analyzer,
    }

    fn fixture(forex: StaticResolver, crypto: StaticResolver, equity: StaticResolver) -> Fixture {
        let forex = Arc::new(forex);
        let crypto = Arc::new(crypto);
        let equity = Arc::new(equity);
        let converter = StaticConverter::new().with_rate("INR", "USD", dec!(0.012));
        let analyzer = Analyzer::new(
            forex.clone(),
            crypto.clone(),
            equity.clone(),
            Arc::new(converter),
        );
        Fixture {
            forex,
            crypto,
            equity,
            analyzer,
        }
    }

    fn demo() -> Fixture {
        fixture(StaticResolver::demo(), StaticResolver::demo(), StaticResolver::demo())
    }

    #[tokio::test]
    async fn test_forex_example() {
        let f = demo();
        let request = AnalysisRequest::new("USD/INR", dec!(100)).unwrap();
        let response = f.analyzer.analyze(&request).await.unwrap();

        assert_eq!(response.asset_class, AssetClass::Forex);
        assert_eq!(response.asset, "USD/INR");
        assert_eq!(response.symbol, None);
        assert_eq!(response.currency, "INR");
        assert_eq!(response.expected_return, "2.00%");
        assert_eq!(response.estimated_value, dec!(102));
        assert_eq!(response.risk, RiskLevel::Medium);
        assert_eq!(response.holding_period, "6-12 months");
        assert_eq!(f.forex.calls(), 1);
        assert_eq!(f.crypto.calls() + f.equity.calls(), 0);
    }

    #[tokio::test]
    async fn test_crypto_example() {
        let f = demo();
        let request = AnalysisRequest::new("bitcoin", dec!(1000)).unwrap();
        let response = f.analyzer.analyze(&request).await.unwrap();

        assert_eq!(response.asset_class, AssetClass::Crypto);
        assert_eq!(response.asset, "Bitcoin");
        assert_eq!(response.symbol.as_deref(), Some("BTC"));
        assert_eq!(response.expected_return, "8.00%");
        assert_eq!(response.estimated_value, dec!(1080));
        assert_eq!(response.current_price, dec!(67250.50));
        assert_eq!(
            response.summary,
            "Bitcoin detected as crypto with High risk and expected return of 8.00%."
        );
        assert_eq!(response.risk, RiskLevel::High);
        assert_eq!(response.holding_period, "Short-term");
        assert!((response.volatility - 0.08).abs() < 1e-12);
        assert_eq!(response.disclaimer, DISCLAIMER);
        assert_eq!(f.equity.calls(), 0);
    }

    #[tokio::test]
    async fn test_stock_uses_default_volatility_when_missing() {
        let f = demo();
        let request = AnalysisRequest::new("reliance", dec!(500)).unwrap();
        let response = f.analyzer.analyze(&request).await.unwrap();

        assert_eq!(response.asset_class, AssetClass::Stock);
        assert_eq!(response.exchange.as_deref(), Some("NSI"));
        assert!((response.volatility - 0.015).abs() < 1e-12);
        assert_eq!(response.risk, RiskLevel::Low);
        assert_eq!(response.holding_period, "12+ months");
        assert_eq!(response.expected_return, "5.00%");
        assert_eq!(response.estimated_value, dec!(525));
        assert_eq!(f.crypto.calls(), 0);
    }

    #[tokio::test]
    async fn test_etf_labels() {
        let f = demo();
        let response = f
            .analyzer
            .analyze(&AnalysisRequest::new("SPY", dec!(200)).unwrap())
            .await
            .unwrap();

        assert_eq!(response.asset_class, AssetClass::Etf);
        assert_eq!(response.risk, RiskLevel::Medium);
        assert_eq!(response.estimated_value, dec!(210));
    }

    #[tokio::test]
    async fn test_overflowing_amount_is_validation_error() {
        let f = demo();
        let request = AnalysisRequest::new("bitcoin", dec!(75000000000000000000000000000)).unwrap();
        let err = f.analyzer.analyze(&request).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_asset_is_not_found() {
        let f = demo();
        let err = f
            .analyzer
            .analyze(&AnalysisRequest::new("Definitely Not Listed", dec!(10)).unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Asset not found");
    }

    #[tokio::test]
    async fn test_crypto_falls_back_to_equity() {
        let solar = PriceQuote::new("SolarEdge Technologies", "SEDG", dec!(21.5), "USD", AssetClass::Stock);
        let f = fixture(
            StaticResolver::new("forex"),
            StaticResolver::new("crypto"),
            StaticResolver::new("equity").with_quote(&["solaredge"], solar),
        );

        let quote = f.analyzer.resolve("solaredge").await.unwrap();
        assert_eq!(quote.symbol, "SEDG");
        assert_eq!(f.crypto.calls(), 1);
        assert_eq!(f.equity.calls(), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_surfaces_when_nothing_priced() {
        let f = fixture(
            StaticResolver::new("forex"),
            StaticResolver::failing("crypto", "timed out"),
            StaticResolver::new("equity"),
        );

        let err = f.analyzer.resolve("ethereum").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.to_string().contains("timed out"));
        assert_eq!(f.equity.calls(), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_skipped_when_fallback_prices() {
        let f = fixture(
            StaticResolver::new("forex"),
            StaticResolver::failing("crypto", "timed out"),
            StaticResolver::demo(),
        );

        let quote = f.analyzer.resolve("eth").await.unwrap();
        assert_eq!(quote.symbol, "ETH");
    }

    #[tokio::test]
    async fn test_amount_currency_conversion() {
        let f = demo();
        let request = AnalysisRequest::new("AAPL", dec!(10000))
            .unwrap()
            .with_amount_currency("inr");
        let response = f.analyzer.analyze(&request).await.unwrap();

        assert_eq!(response.amount_in_asset_currency, Some(dec!(120)));
        assert_eq!(response.conversion_rate, Some(dec!(0.012)));
        assert_eq!(response.conversion_error, None);
    }

    #[tokio::test]
    async fn test_conversion_failure_is_inline() {
        let f = demo();
        let request = AnalysisRequest::new("AAPL", dec!(100))
            .unwrap()
            .with_amount_currency("GBP");
        let response = f.analyzer.analyze(&request).await.unwrap();

        assert_eq!(response.amount_in_asset_currency, None);
        assert_eq!(response.conversion_error.as_deref(), Some("Conversion failed"));
    }

    #[tokio::test]
    async fn test_same_currency_skips_conversion() {
        let f = demo();
        let request = AnalysisRequest::new("AAPL", dec!(100))
            .unwrap()
            .with_amount_currency("usd");
        let response = f.analyzer.analyze(&request).await.unwrap();

        assert_eq!(response.amount_in_asset_currency, None);
        assert_eq!(response.conversion_error, None);
    }
}
