//! Parking service operator console
//!
//! Interactive terminal for a single parking facility: allocates spots to
//! entering vehicles and bills them on exit.
//!
//! ```sh
//! # Run with default config (~/.config/parking-service/config.toml)
//! parking-service
//!
//! # Custom config path
//! parking-service --config /etc/parking-service/config.toml
//!
//! # Try it out without touching the database
//! parking-service --in-memory
//!
//! # Validate config without starting
//! parking-service --check
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use parkit::application::InputSource;
use parkit::config::AppConfig;
use parkit::interfaces::{ConsoleInput, InteractiveShell};
use parkit::runtime::{init_tracing, ParkingRuntime, RuntimeOptions};

/// Parking lot operator console.
#[derive(Parser, Debug)]
#[command(
    name = "parking-service",
    version,
    about = "Parking lot spot allocation and ticketing console",
    long_about = "Interactive console for a single parking facility: allocates \
                  spots to entering vehicles and computes the fare on exit.\n\n\
                  Default config: ~/.config/parking-service/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "PARKING_CONFIG")]
    config: Option<PathBuf>,

    /// Override the database connection URL.
    #[arg(long)]
    database_url: Option<String>,

    /// Keep all data in memory; nothing is persisted.
    #[arg(long)]
    in_memory: bool,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting.
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
    let config_path = cli.config.unwrap_or_else(parkit::default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(mut cfg) => {
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            // Init tracing first so subsequent logs are formatted properly
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            // Fallback tracing init, stderr keeps stdout for the console
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new(
                    cli.log_level.as_deref().unwrap_or("info"),
                ))
                .with_writer(std::io::stderr)
                .init();
            error!("Failed to load config from {}: {}", config_path.display(), e);
            error!("Using default configuration.");
            let mut cfg = AppConfig::default();
            if let Some(ref level) = cli.log_level {
                cfg.logging.level = level.clone();
            }
            cfg
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        info!("CLI override: log_level = {}", level);
    }
    if let Some(url) = cli.database_url {
        info!("CLI override: database_url = {}", url);
        config.database.url = Some(url);
    }

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        config.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Database    : {}", config.database.connection_url());
        println!(
            "   Spots       : {} car, {} bike",
            config.lot.car_spots, config.lot.bike_spots
        );
        println!(
            "   Grace period: {} min",
            config.fares.grace_period_minutes
        );
        for (class, rate) in &config.fares.hourly_rates {
            println!(
                "   {:<12}: {} {}/h",
                class.as_str(),
                rate,
                config.fares.currency
            );
        }
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    // ── Start runtime ──────────────────────────────────────────
    let currency = config.fares.currency.clone();
    let runtime = ParkingRuntime::start(RuntimeOptions {
        config,
        auto_migrate: !cli.no_migrate,
        in_memory: cli.in_memory,
    })
    .await?;

    let input: Arc<dyn InputSource> = Arc::new(ConsoleInput::stdio());
    let service = runtime.service(input.clone());
    let mut shell = InteractiveShell::new(service, input, std::io::stdout(), currency);

    let result = shell.run().await;
    runtime.shutdown().await;
    result?;

    Ok(())
}
