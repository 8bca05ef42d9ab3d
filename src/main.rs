//! rest-dispatch server.
//!
//! Serves the built-in `/ping` resource through the capability dispatcher.
//!
//! ```text
//!     Client Request
//!     ──────────────▶ axum Router ──▶ RestHandler ──▶ Resource capability
//!                     (middleware)    (pipeline)       (GET/POST/...)
//!     ◀────────────── Reply (status, headers, cookie, ETag, JSON body)
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use rest_dispatch::config::{load_config, ServiceConfig};
use rest_dispatch::lifecycle::{signals, Shutdown};
use rest_dispatch::observability::{logging, metrics};
use rest_dispatch::{HttpServer, Ping, RestHandler, Route};

#[derive(Parser)]
#[command(name = "rest-dispatch")]
#[command(about = "Capability-based REST dispatcher", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("rest-dispatch v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        allow_any_origin = config.dispatch.allow_any_origin,
        strict_slash = config.dispatch.strict_slash,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let mut handler = RestHandler::with_config(config.dispatch.clone());
    handler.register_route(Route::new(Ping, "/ping"));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    let server = HttpServer::new(config, handler)?;
    tokio::spawn(signals::shutdown_on_signal(shutdown.clone()));

    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
