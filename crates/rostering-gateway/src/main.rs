//! Rostering Copilot Gateway Server

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rostering_gateway::config::{Args, Config};
use rostering_gateway::gateway::{CompletionSettings, Gateway};
use rostering_gateway::roster::load_roster_context;
use rostering_gateway::{http, AppState, OpenAiClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rostering_gateway=info,tower_http=info")),
        )
        .with_target(true)
        .init();

    // Load config
    let config = Config::from(Args::parse());
    let http_addr: SocketAddr = config.bind_addr.parse()?;

    // Roster context is read once; absence only degrades the prompt
    let roster = Arc::new(load_roster_context(&config.roster_path));

    let provider = Arc::new(OpenAiClient::new(&config.api_base, config.api_key_env.clone()));
    let gateway = Gateway::new(provider, roster).with_settings(CompletionSettings {
        model: config.model.clone(),
        temperature: config.temperature,
        preview_rows: config.preview_rows,
    });

    let state = AppState::new(gateway);
    let router = http::create_router(state);

    info!(
        http_addr = %http_addr,
        api_base = %config.api_base,
        model = %config.model,
        "Starting rostering copilot gateway"
    );

    let listener = TcpListener::bind(http_addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
