use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use spacedeck::api::{HttpApi, ResourceApi};
use spacedeck::app::run_tui;
use spacedeck::config;

#[derive(Parser)]
#[command(name = "spacedeck")]
#[command(version = "0.1.0")]
#[command(about = "TUI admin console for spaces and sessions")]
struct Cli {
    /// Base URL of the backend API
    #[arg(long, env = "SPACEDECK_BASE_URL")]
    base_url: Option<String>,

    /// Bearer token for the backend API
    #[arg(long, env = "SPACEDECK_TOKEN")]
    token: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

/// Logs go nowhere by default so they cannot corrupt the terminal UI; set
/// SPACEDECK_LOG_STDERR=1 (with a redirect) to see them.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let to_stderr = std::env::var("SPACEDECK_LOG_STDERR").map(|v| v == "1").unwrap_or(false);
    if to_stderr {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::sink)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let mut config = config::load()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(token) = cli.token {
        config.api_token = Some(token);
    }
    if let Some(timeout_secs) = cli.timeout_secs {
        config.request_timeout_secs = timeout_secs;
    }

    let api: Arc<dyn ResourceApi> = Arc::new(HttpApi::new(&config)?);
    run_tui(api).await?;

    Ok(())
}
