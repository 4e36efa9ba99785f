// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! evbus - event bus CLI

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, demo, matches};
use evbus_core::BusConfig;
use output::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "evbus",
    version,
    about = "evbus - In-process event bus: pattern checks, configuration and reference scenarios"
)]
struct Cli {
    /// Bus configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level, ignoring RUST_LOG and the configured level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check event names against a subscription pattern
    Match(matches::MatchArgs),
    /// Print the effective configuration
    Config,
    /// Run a reference dispatch scenario
    Demo(demo::DemoArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let bus_config = config::load(cli.config.as_deref())?;
    setup_logging(&bus_config, cli.verbose);

    match cli.command {
        Commands::Match(args) => {
            let results = matches::check(&args)?;
            output::print_list(&results, cli.format)?;
            if !results.iter().all(|r| r.matched) {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Config => {
            print!("{}", config::render(&bus_config, cli.format)?);
        }

        Commands::Demo(args) => {
            tracing::debug!(scenario = ?args.scenario, "running demo");
            for line in demo::run(args.scenario, &bus_config).await? {
                println!("{line}");
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn setup_logging(config: &BusConfig, verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
