use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use clap::Parser;
use secrecy::ExposeSecret;

use aria_context::channels::web::auth::generate_auth_token;
use aria_context::channels::web::server::{GatewayState, start_server};
use aria_context::config::Config;
use aria_context::context::{InMemorySummaryStore, SummaryStore, spawn_idle_sweeper};
use aria_context::logging::{self, LogFormat};
use aria_context::settings::Settings;

/// Rolling session context gateway for the A.R.I.A. assistant.
#[derive(Debug, Parser)]
#[command(name = "aria-context", version, about)]
struct Cli {
    /// Settings file (TOML). Defaults to the user config directory.
    #[arg(long, env = "ARIA_CONTEXT_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind, overriding settings and GATEWAY_HOST.
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to bind, overriding settings and GATEWAY_PORT.
    #[arg(long)]
    port: Option<u16>,

    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "LOG_FORMAT")]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init(cli.log_format);

    let settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    let mut config = Config::resolve(&settings).context("invalid configuration")?;
    if let Some(host) = cli.host {
        config.gateway.host = host;
    }
    if let Some(port) = cli.port {
        config.gateway.port = port;
    }

    let store: Arc<dyn SummaryStore> =
        Arc::new(InMemorySummaryStore::new(config.context.max_chars));
    tracing::info!(
        max_chars = config.context.max_chars,
        "Session context store ready (in-memory, not persisted)"
    );

    let sweeper = config.context.session_ttl.map(|ttl| {
        tracing::info!(
            ttl_secs = ttl.as_secs(),
            interval_secs = config.context.sweep_interval.as_secs(),
            "Idle session eviction enabled"
        );
        spawn_idle_sweeper(Arc::clone(&store), ttl, config.context.sweep_interval)
    });

    let auth_token = match &config.gateway.auth_token {
        Some(token) => token.expose_secret().to_string(),
        None => {
            let token = generate_auth_token();
            println!("Generated gateway token (set GATEWAY_AUTH_TOKEN to pin one): {token}");
            token
        }
    };

    let state = Arc::new(GatewayState::new(store));
    let bound = start_server(config.gateway.addr(), Arc::clone(&state), auth_token).await?;
    tracing::info!("Context gateway listening on http://{}", bound);

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    state.shutdown().await;
    if let Some(handle) = sweeper {
        handle.abort();
    }
    tracing::info!("Shutdown complete");
    Ok(())
}
