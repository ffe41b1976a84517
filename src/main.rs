//! Quote-Relay main entry point
//!
//! This is the command-line interface that serves the scrape-control proxy.

use anyhow::Context;
use clap::Parser;
use quote_relay::config::{load_config_with_hash, load_default_config, validate, Config, RunMode};
use quote_relay::proxy::ProxyServer;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Quote-Relay: proxy for a quote-scraping backend
///
/// Relays start/status/stop requests to the scraping backend. In
/// development mode backend outages are answered with canned payloads.
#[derive(Parser, Debug)]
#[command(name = "quote-relay")]
#[command(version)]
#[command(about = "Proxy for a quote-scraping backend", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults plus environment if omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind to
    #[arg(short, long)]
    bind: Option<String>,

    /// Run mode: development or production
    #[arg(long, value_parser = parse_mode)]
    mode: Option<RunMode>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate configuration, print it and exit
    #[arg(long)]
    check_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            load_default_config().context("invalid default configuration")?
        }
    };

    apply_cli_overrides(&mut config, &cli);
    validate(&config).context("invalid configuration after command-line overrides")?;

    if cli.check_config {
        print_config(&config);
        return Ok(());
    }

    let server = ProxyServer::new(&config)?;
    server.run().await.context("proxy server failed")?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quote_relay=info,warn"),
            1 => EnvFilter::new("quote_relay=debug,info"),
            2 => EnvFilter::new("quote_relay=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

fn parse_mode(s: &str) -> Result<RunMode, String> {
    RunMode::parse(s)
        .ok_or_else(|| format!("unknown mode '{}', expected development or production", s))
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(bind) = &cli.bind {
        config.server.bind_address = bind.clone();
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
}

/// Handles --check-config: shows the effective configuration
fn print_config(config: &Config) {
    println!("=== Quote-Relay Configuration ===\n");
    println!("Mode: {}", config.mode);
    println!("Simulate session calls: {}", config.simulation_mode().is_enabled());

    println!("\nBackend:");
    println!("  Base URL: {}", config.backend.base_url);
    println!("  Websocket URL: {}", config.backend.ws_url);
    println!("  Request timeout: {}s", config.backend.request_timeout_secs);

    println!("\nServer:");
    println!("  Listen: {}:{}", config.server.bind_address, config.server.port);

    println!("\n✓ Configuration is valid");
}
