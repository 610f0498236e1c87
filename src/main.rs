//! Coupon engine entry point.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use coupon_engine::api::{create_router, AppState};
use coupon_engine::catalog::catalog;
use coupon_engine::config::Config;
use coupon_engine::error::AppError;
use coupon_engine::metrics;
use coupon_engine::store::MemoryStore;
use coupon_engine::utils::{read_snapshot, seed_store, shutdown_signal};

/// Sports coupon resolution engine.
#[derive(Parser, Debug)]
#[command(name = "coupon-engine")]
#[command(about = "Resolve football bets and coupons against live match state")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// JSON snapshot to preload (overrides SEED_FILE).
        #[arg(long)]
        seed: Option<PathBuf>,
    },

    /// Check configuration validity.
    CheckConfig,

    /// Print bet types and their selectable values.
    Catalog,

    /// Evaluate the coupons in a JSON snapshot and print them ranked.
    Evaluate {
        /// Snapshot file with `matches` and `coupons`.
        snapshot: PathBuf,

        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Configuration drives logging; fall back to defaults so check-config can report errors
    let config = Config::load().map_err(AppError::from);
    let defaults = Config::default();
    let log_config = config.as_ref().unwrap_or(&defaults);

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("coupon_engine=debug,info")
    } else {
        EnvFilter::try_new(log_config.log_filter()).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if log_config.log_json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    // Handle subcommands
    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(config),
        Some(Command::Catalog) => cmd_catalog(),
        Some(Command::Evaluate { snapshot, json }) => cmd_evaluate(snapshot, json),
        Some(Command::Serve { port, seed }) => cmd_serve(config?, port, seed).await,
        None => cmd_serve(config?, None, None).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(config: Result<Config, AppError>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("COUPON ENGINE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match config {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen Address: {}", config.bind_addr());
    println!("  Log Filter: {}", config.log_filter());
    println!("  Log Format: {}", if config.log_json { "JSON" } else { "Text" });
    println!("  Metrics: {}", if config.metrics_enabled { "Enabled" } else { "Disabled" });
    match &config.seed_file {
        Some(path) => println!("  Seed File: {}", path.display()),
        None => println!("  Seed File: (none)"),
    }
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Print the bet-type catalog.
fn cmd_catalog() -> anyhow::Result<()> {
    for entry in catalog().entries() {
        println!("{:<16} {}", entry.bet_type.code(), entry.label);
        for option in entry.options {
            println!("    {:<8} {}", option.value, option.text);
        }
    }
    Ok(())
}

/// Evaluate a snapshot file and print coupons ranked with per-leg outcomes.
fn cmd_evaluate(path: PathBuf, json: bool) -> anyhow::Result<()> {
    let snapshot = read_snapshot(&path).with_context(|| format!("reading {}", path.display()))?;

    let details: Vec<_> = {
        let _timer = metrics::timer_evaluation();
        snapshot
            .ranked_coupons()
            .iter()
            .filter_map(|ranked| snapshot.detail(&ranked.coupon.id))
            .collect()
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    for detail in &details {
        println!(
            "{} [{}] {}/{}",
            detail.name,
            detail.tally.status.to_string().to_uppercase(),
            detail.tally.won_count,
            detail.tally.total_count
        );
        for leg in &detail.legs {
            let fixture = match &leg.fixture {
                Some(m) => format!("{} - {} {}", m.home_team, m.away_team, m.scoreline()),
                None => "(match deleted)".to_string(),
            };
            println!("    {:<8} {:<40} {}", leg.outcome.to_string(), leg.label, fixture);
        }
    }

    Ok(())
}

/// Run the HTTP API until a shutdown signal arrives.
async fn cmd_serve(mut config: Config, port: Option<u16>, seed: Option<PathBuf>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.port = port;
    }
    if seed.is_some() {
        config.seed_file = seed;
    }
    config.validate().map_err(AppError::InvalidConfig)?;

    let store = Arc::new(MemoryStore::new());
    let mut app_state = AppState::new(store.clone());

    if config.metrics_enabled {
        let handle = metrics::install_prometheus().context("installing Prometheus recorder")?;
        app_state = app_state.with_metrics(handle);
    } else {
        warn!("Metrics disabled");
    }

    // Start HTTP server
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);

    if let Some(path) = &config.seed_file {
        seed_store(&store, path)?;
    }
    app_state.set_ready(true);
    info!(matches = store.match_count(), coupons = store.coupon_count(), "Ready");

    axum::serve(listener, create_router(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
