//! DocCheck Server CLI
//!
//! Starts the HTTP server for document contradiction analysis.

use clap::Parser;
use doccheck_server::{
    build_state,
    config::{api_key_from_env, ServerConfig},
    start_server, ServerError,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// DocCheck - find contradictions between documents
#[derive(Debug, Parser)]
#[command(name = "doccheck-server", version, about)]
struct Args {
    /// Load configuration from TOML file
    #[arg(long, env = "DOCCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Override the bind address
    #[arg(long, env = "DOCCHECK_HOST")]
    host: Option<String>,

    /// Override the bind port
    #[arg(long, env = "DOCCHECK_PORT")]
    port: Option<u16>,

    /// Override the Gemini model
    #[arg(long, env = "DOCCHECK_MODEL")]
    model: Option<String>,
}

#[tokio::main]
async fn main() {
    // Load .env before anything reads the environment
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run(Args::parse()).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), ServerError> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };

    if let Some(host) = args.host {
        config.bind_address = host;
    }
    if let Some(port) = args.port {
        config.bind_port = port;
    }
    if let Some(model) = args.model {
        config.gemini.model = model;
    }
    config.validate()?;

    // Refuse to start without a usable model client
    let api_key = api_key_from_env()?;
    let state = build_state(&config, &api_key)?;

    start_server(config, state).await
}
