//! Locale Gateway
//!
//! HTTP front door for the multi-locale, multi-audience site.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────────┐
//!                  │                  LOCALE GATEWAY                  │
//!                  │                                                  │
//!   Client Request │  ┌──────────┐   ┌────────────┐   ┌────────────┐  │
//!   ───────────────┼─▶│   http   │──▶│ framework  │──▶│  routing   │  │
//!                  │  │  server  │   │   scope    │   │ normalizer │  │
//!                  │  └──────────┘   └────────────┘   └─────┬──────┘  │
//!                  │                                        │         │
//!   3xx Location   │                       Redirect ◀───────┤         │
//!   ◀──────────────┼────────────────────────────────────────┘ Pass    │
//!                  │                                          ▼       │
//!   Client Response│                                   ┌──────────┐   │
//!   ◀──────────────┼───────────────────────────────────│ forward  │◀──┼──── Renderer
//!                  │                                   └──────────┘   │
//!                  │  ┌────────────────────────────────────────────┐  │
//!                  │  │ config │ observability │ lifecycle         │  │
//!                  │  └────────────────────────────────────────────┘  │
//!                  └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use locale_gateway::config::loader::load_or_default;
use locale_gateway::config::ObservabilityConfig;
use locale_gateway::observability::{logging, metrics};
use locale_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "locale-gateway")]
#[command(about = "Locale/audience path normalizing gateway", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configuration errors are fatal before anything else starts. They are
    // logged with the default subscriber since the configured one is unknown.
    let config = match load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            logging::init_tracing(&ObservabilityConfig::default());
            logging::report_config_error(&e);
            return ExitCode::FAILURE;
        }
    };

    logging::init_tracing(&config.observability);

    match run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: locale_gateway::GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("locale-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        locales = ?config.locales.locales,
        audiences = ?config.locales.audiences,
        redirect_status = config.redirect.status,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?);
    }

    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let _signals = shutdown.trigger_on_signal();
    server.run(listener, shutdown.subscribe()).await?;

    Ok(())
}
