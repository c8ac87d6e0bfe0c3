//! # asset-analyzer
//!
//! Classifies a free-form asset identifier, prices it from a live data source
//! and attaches a static risk/return estimate.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐   ┌────────────┐   ┌──────────────────────────┐   ┌─────────┐
//! │  "BTC"   │──▶│ classifier │──▶│ resolver chain           │──▶│ labeler │
//! │  "AAPL"  │   │ forex      │   │ forex  → [exchangerate]  │   │ risk    │
//! │ "USD/INR"│   │ crypto     │   │ crypto → [coingecko,     │   │ return  │
//! └──────────┘   │ stock      │   │           yahoo]         │   │ holding │
//!                └────────────┘   │ stock  → [yahoo]         │   └─────────┘
//!                                 └──────────────────────────┘
//! ```
//!
//! ## Labels
//!
//! | Class  | Expected return | Default volatility |
//! |--------|-----------------|--------------------|
//! | crypto | 8%              | 0.08 (High)        |
//! | forex  | 2%              | 0.02 (Medium)      |
//! | stock  | 5%              | 0.015 (Low)        |
//!
//! Crypto and forex always use the default. For equities, Yahoo's day percent
//! change replaces it when reported.

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod error;
pub mod model;
pub mod resolver;
pub mod risk;

pub use analysis::{Analyzer, DISCLAIMER, DISCLAIMER_TEXT};
pub use classifier::classify;
pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, ErrorKind, Result};
pub use model::{AnalysisRequest, AnalysisResponse, AssetClass, PriceQuote, RiskLevel};
pub use resolver::{CurrencyConverter, PriceResolver};
