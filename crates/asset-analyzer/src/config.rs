//! Price provider configuration

use std::time::Duration;

use reqwest::Client;

use crate::error::{AnalyzerError, Result};

/// Upstream endpoints and HTTP client settings
#[derive(Clone, Debug)]
pub struct AnalyzerConfig {
    /// Yahoo Finance symbol search endpoint
    pub yahoo_search_url: String,

    /// Yahoo Finance quote endpoint
    pub yahoo_quote_url: String,

    /// CoinGecko API base (without trailing slash)
    pub coingecko_base_url: String,

    /// exchangerate.host API base (without trailing slash)
    pub forex_base_url: String,

    /// exchangerate.host access key, sent as `access_key` when set
    pub forex_access_key: Option<String>,

    /// Per-call timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent sent upstream; Yahoo rejects requests without one
    pub user_agent: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            yahoo_search_url: "https://query2.finance.yahoo.com/v1/finance/search".into(),
            yahoo_quote_url: "https://query1.finance.yahoo.com/v7/finance/quote".into(),
            coingecko_base_url: "https://api.coingecko.com/api/v3".into(),
            forex_base_url: "https://api.exchangerate.host".into(),
            forex_access_key: None,
            timeout_secs: 10,
            user_agent: concat!("asset-analyzer/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str, default: String| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(default)
        };

        Self {
            yahoo_search_url: var("YAHOO_SEARCH_URL", defaults.yahoo_search_url),
            yahoo_quote_url: var("YAHOO_QUOTE_URL", defaults.yahoo_quote_url),
            coingecko_base_url: var("COINGECKO_BASE_URL", defaults.coingecko_base_url),
            forex_base_url: var("FOREX_BASE_URL", defaults.forex_base_url),
            forex_access_key: std::env::var("FOREX_ACCESS_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            timeout_secs: std::env::var("ANALYZER_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            user_agent: var("ANALYZER_USER_AGENT", defaults.user_agent),
        }
    }

    /// Point every provider at one base URL (used against a local mock server)
    pub fn with_base_url(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            yahoo_search_url: format!("{base}/v1/finance/search"),
            yahoo_quote_url: format!("{base}/v7/finance/quote"),
            coingecko_base_url: format!("{base}/api/v3"),
            forex_base_url: base.to_string(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Shared HTTP client for all providers
    pub fn http_client(&self) -> Result<Client> {
        Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(self.timeout())
            .build()
            .map_err(|e| AnalyzerError::Config(format!("HTTP client: {e}")))
    }
}
