//! Decrypto game server.
//!
//! Each game runs in its own session actor, created the first time a player
//! references its game id over the websocket.

use std::{net::SocketAddr, path::PathBuf};

use anyhow::Error;
use dc_server::{api, config::ServerConfig, logging, metrics};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Run a Decrypto game server

USAGE:
  dc_server [OPTIONS]

OPTIONS:
  --bind          IP:PORT  Server socket bind address  [default: env SERVER_BIND or 127.0.0.1:8081]
  --metrics-bind  IP:PORT  Prometheus exporter address [default: env METRICS_BIND, disabled if unset]
  --keywords      PATH     Newline-delimited keyword list [default: env KEYWORDS_FILE or built-in list]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  SERVER_BIND              Server bind address (e.g., 0.0.0.0:8081)
  METRICS_BIND             Prometheus exporter address
  KEYWORDS_FILE            Keyword list path
  SESSION_INBOX_CAPACITY   Queued actions per game [default: 100]
  CHANNEL_CAPACITY         Queued outbound messages per connection [default: 32]
  RUST_LOG                 Log filter [default: info]
";

struct Args {
    bind: Option<SocketAddr>,
    metrics_bind: Option<SocketAddr>,
    keywords: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs.opt_value_from_str("--bind")?,
        metrics_bind: pargs.opt_value_from_str("--metrics-bind")?,
        keywords: pargs.opt_value_from_str("--keywords")?,
    };

    let config = ServerConfig::from_env(args.bind, args.metrics_bind, args.keywords)?;
    config.validate()?;

    logging::init();
    info!("Starting Decrypto server at {}", config.bind);
    info!("Loaded {} keywords", config.keywords.len());

    if let Some(metrics_bind) = config.metrics_bind {
        metrics::init_metrics(metrics_bind).map_err(anyhow::Error::msg)?;
        info!("Prometheus metrics at http://{metrics_bind}/metrics");
    }

    let state = api::AppState::new(&config)?;
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at ws://{}/ws. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
}
