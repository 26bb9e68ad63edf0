use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use mueller_server::config::{load_config, ServerConfig};
use mueller_server::lifecycle::{signals, startup, Shutdown, StartupError};
use mueller_server::observability::logging;

#[derive(Parser)]
#[command(name = "mueller-server")]
#[command(about = "Plain-text request server with wiring-checked routes", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the port of the configured bind address.
    #[arg(short, long)]
    port: Option<u16>,

    /// Also register a deliberately miswired route (startup will abort).
    #[arg(long)]
    include_broken_route: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => ServerConfig::default(),
    };
    if let Some(port) = cli.port {
        config.listener.bind_address = with_port(&config.listener.bind_address, port);
    }

    logging::init(&config.observability.log_level);
    tracing::info!("mueller-server v{} starting", env!("CARGO_PKG_VERSION"));

    let shutdown = Shutdown::new();
    signals::spawn_ctrl_c(shutdown.clone());

    match startup::run(&config, cli.include_broken_route, shutdown.subscribe()).await {
        Ok(()) => {}
        Err(e @ StartupError::Registration(_)) => {
            tracing::error!(error = %e, "Refusing to start with miswired routes");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            tracing::error!(error = %e, "Server failed");
            return ExitCode::FAILURE;
        }
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}

/// Replace the port in a `host:port` address.
fn with_port(bind_address: &str, port: u16) -> String {
    let host = bind_address
        .rsplit_once(':')
        .map_or(bind_address, |(host, _)| host);
    format!("{host}:{port}")
}
