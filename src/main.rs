//! Moltnet Relay
//!
//! Serves the chat relay and the Moltbook read-only proxy.

use anyhow::Result;
use clap::Parser;
use moltnet_relay::{
    config::{Environment, Settings},
    server::App,
    services::Upstream,
};

/// Moltnet Relay
///
/// Keeps upstream API keys on the server and relays browser requests.
#[derive(Parser, Debug)]
#[command(name = "moltnet-relay")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on (overrides PORT env var)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (overrides HOST env var)
    #[arg(long)]
    host: Option<String>,

    /// Log level: trace, debug, info, warn, error (overrides LOG_LEVEL env var)
    #[arg(long)]
    log_level: Option<String>,

    /// Environment: dev, staging, prod (overrides ENVIRONMENT env var)
    #[arg(short, long)]
    env: Option<Environment>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration first (before logging, so we can use log_level)
    let mut settings = Settings::load()?;

    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(env) = args.env {
        settings.environment = env;
    }

    init_tracing(&settings.log_level);

    tracing::info!(
        app_name = %settings.app_name,
        version = %settings.app_version,
        environment = %settings.environment,
        host = %settings.host,
        port = %settings.port,
        "Starting application"
    );

    for warning in settings.warnings() {
        tracing::warn!("{}", warning);
    }

    let app = App::new(settings);

    tracing::info!(
        gemini = app.state().is_configured(Upstream::Gemini),
        moltbook = app.state().is_configured(Upstream::Moltbook),
        "Upstream availability"
    );

    app.run_with_graceful_shutdown().await?;

    tracing::info!("Application shutdown complete");

    Ok(())
}

/// JSON logs to stdout; `RUST_LOG` wins over the configured level
fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .init();
}
