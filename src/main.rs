//! HTTP server for the Attendance Reconciliation Engine.

use std::path::PathBuf;

use anyhow::Context;
use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Debug, Parser)]
#[command(name = "attendance-engine", version, about)]
struct Cli {
    /// Directory containing engine.yaml and holidays.yaml
    #[arg(long, default_value = "./config/default")]
    config: PathBuf,

    /// Address to listen on, overriding server.bind from engine.yaml
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = ConfigLoader::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    let bind = cli
        .bind
        .unwrap_or_else(|| config.bind_address().to_string());

    info!(
        config = %cli.config.display(),
        standard_hours = %config.shift_config().standard_hours(),
        holidays = config.holidays().len(),
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding {bind}"))?;

    info!(address = %bind, "Listening");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}
