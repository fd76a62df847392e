//! URL shortener server.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌────────────────────────────────────────────────┐
//!                  │                  URLSHORT                      │
//!                  │                                                │
//!  Client Request  │  ┌─────────┐    ┌──────────────────────────┐   │
//!  ────────────────┼─▶│  http   │───▶│      handler chain       │   │
//!                  │  │ server  │    │  json → yaml → sqlite    │   │
//!                  │  └─────────┘    │          → greeting      │   │
//!  301 / 200       │       ▲         └────────────┬─────────────┘   │
//!  ◀───────────────┼───────┴──────────────────────┘                 │
//!                  │                                                │
//!                  │  startup: config → route sources → chain       │
//!                  └────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::net::TcpListener;

use urlshort::config::{self, ShortenerConfig, SourceConfig};
use urlshort::lifecycle::{self, signals};
use urlshort::observability::{logging, metrics};
use urlshort::routes::SourceFormat;
use urlshort::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "urlshort")]
#[command(about = "Redirect short paths to full URLs", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to a YAML route file
    #[arg(long)]
    yaml: Option<PathBuf>,

    /// Path to a JSON route file
    #[arg(long)]
    json: Option<PathBuf>,

    /// SQLite database holding the `urls` table
    #[arg(long)]
    db: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:8080
    #[arg(long)]
    bind: Option<String>,
}

impl Cli {
    /// Apply command-line overrides on top of the file configuration.
    fn apply(self, config: &mut ShortenerConfig) {
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(db) = self.db {
            config.database.path = db;
        }
        if let Some(yaml) = self.yaml {
            config.sources.push(SourceConfig::new(yaml, Some(SourceFormat::Yaml)));
        }
        if let Some(json) = self.json {
            config.sources.push(SourceConfig::new(json, Some(SourceFormat::Json)));
        }
    }
}

fn load(cli: Cli) -> Result<ShortenerConfig, config::ConfigError> {
    let path = cli.config.clone();
    config::load_config(path.as_deref(), |config| cli.apply(config))
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("urlshort: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config.logging) {
        eprintln!("urlshort: failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal error, not serving");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ShortenerConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        database = %config.database.path.display(),
        sources = config.sources.len(),
        redirect_status = u16::from(config.redirect.status),
        "Configuration loaded"
    );

    // Sources must load before anything binds.
    let chain = lifecycle::build_chain(&config)?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    HttpServer::new(chain, &config.timeouts)
        .run(listener, signals::wait_for_termination())
        .await?;
    Ok(())
}
