//! Fourstack - Unified CLI
//!
//! Board-game dispatcher for a livestream community bot.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use fourstack::{AppState, BotConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Http { port, host, config } => run_http_server(host, port, config).await,
    }
}

/// Run the HTTP dispatcher server
async fn run_http_server(host: String, port: u16, config_path: PathBuf) -> Result<()> {
    use axum::{body::Body, http::Request};
    use tower::ServiceBuilder;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting fourstack dispatcher");

    let config = if config_path.exists() {
        BotConfig::from_file(&config_path)?
    } else {
        info!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        BotConfig::default()
    };

    let relay = config.relay_client()?;
    match &relay {
        Some(_) => info!("Overlay relay enabled"),
        None => info!("No overlay relay configured"),
    }

    let state = AppState::new(relay);
    let app = fourstack::router(state).layer(ServiceBuilder::new().map_request(
        |req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        },
    ));

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    info!(%host, port, "Dispatcher ready");
    axum::serve(listener, app).await?;

    Ok(())
}
