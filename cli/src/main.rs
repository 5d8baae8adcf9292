//! Parking service - CLI server
//!
//! Headless reservation / check-in backend suitable for deployment
//! as a systemd service, Docker container, or standalone process.
//!
//! ```sh
//! # Run with default config (~/.config/parking-service/config.toml)
//! parking-service
//!
//! # Custom config path
//! parking-service --config /etc/parking-service/config.toml
//!
//! # Override the API port
//! parking-service --api-port 8080
//!
//! # Validate config without starting
//! parking-service --check
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use parking_service::config::AppConfig;
use parking_service::server::{init_tracing, ServerHandle, ServerOptions};

/// Parking service - reservations, check-ins and slot availability over HTTP.
#[derive(Parser, Debug)]
#[command(
    name = "parking-service",
    version,
    about = "Parking lot reservation and check-in backend",
    long_about = "Parking service - REST API for slot reservations, \
                  check-ins / check-outs and overstay fines.\n\n\
                  Default config: ~/.config/parking-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "PARKING_CONFIG")]
    config: Option<PathBuf>,

    /// Override the REST API listen port.
    #[arg(long)]
    api_port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli
        .config
        .unwrap_or_else(parking_service::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let mut cfg = AppConfig::default();
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            init_tracing(&cfg);
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            cfg
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(port) = cli.api_port {
        info!("CLI override: api_port = {}", port);
        config.server.api_port = port;
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   API address : {}:{}", config.server.api_host, config.server.api_port);
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!(
            "   Fine policy : {} free minutes, {} per started hour",
            config.parking.free_minutes, config.parking.fine_rate_per_hour
        );
        return Ok(());
    }

    // ── Start server ───────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
    })
    .await?;

    handle.install_signal_handler();

    info!("Press Ctrl+C to shutdown gracefully.");

    handle.shutdown_signal().wait().await;
    handle.wait().await;

    Ok(())
}
