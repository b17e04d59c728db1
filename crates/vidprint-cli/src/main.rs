//! Video fingerprinting command-line tool.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{CmdIndex, CmdMatch, CmdShots, CmdShow};
use config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "vidprint")]
#[command(version)]
#[command(about = "Video fingerprinting and matching by color-distribution statistics")]
struct Cli {
    /// Root directory of stored fingerprints
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Root directory of result tables
    #[arg(long, global = true)]
    results_dir: Option<PathBuf>,

    /// Debug-level logging and region preview output
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fingerprint every video in a footage directory
    Index(CmdIndex),
    /// Compare a query video against the indexed corpus
    Match(CmdMatch),
    /// Detect shot boundaries in a video
    Shots(CmdShots),
    /// Print stored fingerprint summaries
    Show(CmdShow),
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = AppConfig::from_env().with_overrides(
        cli.data_dir.clone(),
        cli.results_dir.clone(),
        cli.debug,
    );
    info!(
        data_dir = %config.data_dir.display(),
        results_dir = %config.results_dir.display(),
        "starting vidprint"
    );

    let result = match &cli.command {
        Command::Index(cmd) => cmd.run(&config).await,
        Command::Match(cmd) => cmd.run(&config).await,
        Command::Shots(cmd) => cmd.run(&config).await,
        Command::Show(cmd) => cmd.run(&config).await,
    };

    if let Err(e) = result {
        error!("Command failed: {:#}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing with colored output for dev, JSON for production.
fn init_tracing(debug: bool) {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let level = if debug { "debug" } else { "info" };
    let mut env_filter = EnvFilter::from_default_env();
    for target in [
        "vidprint_cli",
        "vidprint_models",
        "vidprint_media",
        "vidprint_store",
        "vidprint_match",
    ] {
        env_filter = env_filter.add_directive(format!("{}={}", target, level).parse().unwrap());
    }

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}
