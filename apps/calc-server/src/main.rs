use anyhow::{Context, Result};
use axum::Router;
use calckit::{AppConfig, CliArgs};
use calculator::CalculatorModule;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use std::path::PathBuf;

/// Calculator Server - square root, factorial, logarithm and power over HTTP
#[derive(Parser)]
#[command(name = "calc-server")]
#[command(about = "Calculator Server - square root, factorial, logarithm and power over HTTP")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (JSON) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        port: cli.port,
        verbose: cli.verbose,
    };

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (CALC__*) -> 4) CLI overrides
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    calckit::logging::init_logging(&config.logging)?;

    if cli.print_config {
        println!("{}", config.to_pretty_json()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    calckit::server::parse_bind_address(&config.server.bind_addr)?;
    build_app(config)?;
    println!("Configuration is valid");
    println!("{}", config.to_pretty_json()?);
    Ok(())
}

/// Module routes, health endpoints and the shared middleware stack.
fn build_app(config: &AppConfig) -> Result<Router> {
    let module = CalculatorModule::from_app_config(config)?;
    let router = module.router()?;
    let router = calckit::web::with_health_routes(router);
    Ok(calckit::api::apply_middleware_stack(router, &config.server))
}

async fn run_server(config: AppConfig) -> Result<()> {
    let addr = calckit::server::parse_bind_address(&config.server.bind_addr)?;
    let app = build_app(&config).context("failed to assemble HTTP application")?;

    tracing::info!(%addr, "Calculator Server starting");

    let cancel = CancellationToken::new();
    calckit::server::cancel_on_signal(cancel.clone());
    calckit::server::serve(addr, app, cancel).await?;

    tracing::info!("Calculator Server stopped");
    Ok(())
}
