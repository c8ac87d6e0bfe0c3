//! Asset Analyzer HTTP Server
//!
//! Axum-based server exposing the single-shot asset analysis endpoint.

mod handlers;
mod state;

use axum::{
    http::Method,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use asset_analyzer::{Analyzer, AnalyzerConfig};

use crate::handlers::{analyze, disclaimer, ping, preflight_no_content};
use crate::state::AppState;

/// Routes, CORS and request tracing around the given state
pub(crate) fn build_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/ping", get(ping))
        .route("/api/disclaimer", get(disclaimer))
        .route("/api/analyze", post(analyze))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(middleware::from_fn(preflight_no_content))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AnalyzerConfig::from_env();
    tracing::info!("Price sources:");
    tracing::info!("  equities: {}", config.yahoo_quote_url);
    tracing::info!("  crypto:   {}", config.coingecko_base_url);
    tracing::info!("  forex:    {}", config.forex_base_url);
    tracing::info!("  timeout:  {}s per call", config.timeout_secs);

    let state = AppState::new(Analyzer::from_config(&config)?);
    let app = build_router(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("asset-analyzer server running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /api/ping       - Liveness check");
    tracing::info!("  GET  /api/disclaimer - Disclaimer text");
    tracing::info!("  POST /api/analyze    - Analyze an asset");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
