// SPDX-FileCopyrightText: 2026 Buzzlens Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Buzzlens - viral-potential article analyzer.
//!
//! This is the binary entry point for the Buzzlens CLI.

mod stats;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use buzzlens_cost::Period;

/// Buzzlens - viral-potential article analyzer.
#[derive(Parser, Debug)]
#[command(name = "buzzlens", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Show usage and cost statistics from the ledger.
    Stats {
        /// Time window: all, today, week, or month.
        #[arg(long, default_value = "all", value_parser = parse_period)]
        period: Period,
        /// Output structured JSON for scripting.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

fn parse_period(value: &str) -> Result<Period, String> {
    value
        .parse()
        .map_err(|_| format!("expected one of: all, today, week, month (got `{value}`)"))
}

/// Initialize logging to stderr, honoring `RUST_LOG` over the config level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match buzzlens_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            buzzlens_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    match cli.command {
        Some(Commands::Stats { period, json, plain }) => {
            if let Err(e) = stats::run_stats(&config, period, json, plain).await {
                eprintln!("buzzlens: {e}");
                std::process::exit(1);
            }
        }
        None => {
            println!("buzzlens: use --help for available commands");
        }
    }
}
