//! Antarctic Explorer Server
//!
//! Run with: cargo run -- [--config <path>] [--host <host>] [--port <port>]
//!
//! # Configuration
//!
//! Settings come from a TOML file (`--config`, or the first of
//! `~/.config/antarctic-explorer/config.toml`,
//! `/etc/antarctic-explorer/config.toml`, `./config.toml`), then
//! `ANTARCTIC_*` environment variables, then command-line flags.
//! `RUST_LOG` overrides the configured log level.

use anyhow::Context;
use antarctic_explorer::api::{serve, AppState};
use antarctic_explorer::config::{generate_default_config, Config, LoggingConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "antarctic-explorer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Live dashboard of simulated Antarctic temperature readings")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard server (default)
    Serve,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { output }) = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => std::fs::write(path, content)
                .with_context(|| format!("writing config to {:?}", path))?,
            None => print!("{}", content),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {:?}", path))?,
        None => Config::load_default(),
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    config.validate()?;

    init_logging(&config.logging);

    tracing::info!("Starting Antarctic Explorer v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        update_interval_secs = config.dashboard.update_interval_secs,
        history_size = config.dashboard.history_size,
        sensor_min = config.sensor.min,
        sensor_max = config.sensor.max,
        "Dashboard settings"
    );

    let server = config.server.clone();
    serve(AppState::new(config), &server).await?;

    tracing::info!("Antarctic Explorer stopped");
    Ok(())
}

/// Initialize tracing from the logging config; `RUST_LOG` takes precedence
fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("antarctic_explorer={},tower_http=info", logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
