//! DocCheck Server
//!
//! HTTP front end for contradiction analysis. Accepts multi-file uploads on
//! `POST /analyze`, runs them through the [`Analyzer`] and relays the
//! model's JSON report.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use doccheck_extractor::Analyzer;
use doccheck_llm::{GeminiProvider, LlmError, LlmProvider};
use handlers::{create_router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Model client could not be configured
    #[error("Error configuring Gemini API: {0}")]
    Llm(#[from] LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build application state backed by the Gemini API
pub fn build_state(config: &ServerConfig, api_key: &str) -> Result<AppState, ServerError> {
    let provider = GeminiProvider::new(config.gemini_config(api_key))?;
    Ok(build_state_with_provider(config, Arc::new(provider)))
}

/// Build application state around any model provider
pub fn build_state_with_provider(config: &ServerConfig, provider: Arc<dyn LlmProvider>) -> AppState {
    let analyzer = Analyzer::new(provider, config.analysis_config());
    AppState::new(analyzer).with_max_upload_bytes(config.max_upload_bytes)
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the process exits.
pub async fn start_server(config: ServerConfig, state: AppState) -> Result<(), ServerError> {
    info!("Starting DocCheck server");
    info!("Bind address: {}", config.bind_addr());
    info!(
        "Model: {} ({})",
        state.analyzer.provider().model(),
        state.analyzer.provider().name()
    );
    info!("Output policy: {:?}", config.output_policy);
    info!("Upload limit: {} bytes", config.max_upload_bytes);

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
