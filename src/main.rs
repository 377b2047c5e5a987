//! Family members API entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use family_api::api::{create_router_with, AppState, RouterOptions};
use family_api::config::Config;
use family_api::error::AppError;
use family_api::family::FamilyStore;
use family_api::metrics;
use family_api::utils::shutdown_signal;

/// In-memory family members REST API.
#[derive(Parser, Debug)]
#[command(name = "family-api")]
#[command(about = "REST API over an in-memory family members list")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration first so RUST_LOG and VERBOSE shape the log filter
    let loaded = Config::load();
    let directives = match &loaded {
        Ok(config) => config.log_filter(args.verbose),
        Err(_) => Config::default().log_filter(args.verbose),
    };

    // Initialize logging
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = validated(loaded)?;

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::Serve { port }) => cmd_serve(config, port.or(args.port)).await,
        None => cmd_serve(config, args.port).await,
    }
}

/// Validate loaded configuration, logging failures.
fn validated(loaded: Result<Config, envy::Error>) -> Result<Config, AppError> {
    let config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        AppError::InvalidConfig(e)
    })?;

    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config(config: Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("FAMILY API - CONFIGURATION CHECK");
    println!("======================================================================");

    println!("Configuration Summary:");
    println!("  Bind Address: {}:{}", config.host, config.port);
    println!("  Family Name: {}", config.family_name);
    println!("  Seed Members: {}", config.seed_members);
    println!("  CORS: {}", if config.cors_permissive { "Permissive" } else { "Disabled" });
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    println!("  Log Filter: {}", config.log_filter(false));
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(mut config: Config, port_override: Option<u16>) -> anyhow::Result<()> {
    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }

    // Install the recorder first so the initial family size is captured
    let metrics_handle = if config.metrics_enabled {
        let handle = metrics::install_exporter().map_err(AppError::from)?;
        metrics::init_metrics();
        metrics::spawn_upkeep(handle.clone(), metrics::UPKEEP_INTERVAL);
        Some(handle)
    } else {
        None
    };

    let store = if config.seed_members {
        FamilyStore::with_seed_members(config.family_name.clone())
    } else {
        FamilyStore::new(config.family_name.clone())
    };
    info!(
        family = %store.last_name(),
        members = store.len(),
        "Family store ready"
    );

    let mut app_state = AppState::new(store);
    if let Some(handle) = metrics_handle {
        app_state = app_state.with_metrics(handle);
    }

    let router = create_router_with(
        app_state,
        RouterOptions {
            cors_permissive: config.cors_permissive,
        },
    );

    let addr = config.bind_addr().map_err(AppError::InvalidConfig)?;
    let listener = TcpListener::bind(addr).await.map_err(AppError::from)?;
    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::from)?;

    info!("Server stopped");
    Ok(())
}
