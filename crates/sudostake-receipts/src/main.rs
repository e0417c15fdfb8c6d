//! SudoStake Outcomes CLI
//!
//! Command-line interface for transaction outcome operations:
//! - Verify: Check an outcome document's structure
//! - Inspect: Display status, gas and events
//! - Logs / Events: List what the transaction emitted
//! - Diff: Compare two outcome documents
//!
//! Configuration comes from the environment (or a `.env` file):
//! `NEAR_NETWORK` enables explorer links, `SUDOSTAKE_OUTPUT` picks the
//! default output format and `RUST_LOG` filters diagnostics on stderr.
//! `--network` and `--output` take precedence over the environment.

use clap::{Parser, Subcommand};
use serde::Serialize;
use sudostake_receipts::config::{OutputFormat, ToolkitConfig};
use sudostake_receipts::{
    diff_outcome_files, inspect_outcome, load_outcome_file, verify_outcome_file,
};
use sudostake_types::{EventLog, Network};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod display;

#[derive(Parser)]
#[command(name = "sudostake-outcomes")]
#[command(about = "SudoStake transaction outcome verification and inspection tool")]
#[command(version)]
struct Cli {
    /// Print machine-readable JSON instead of text (same as `--output json`)
    #[arg(long, global = true, conflicts_with = "output")]
    json: bool,

    /// Output format (overrides SUDOSTAKE_OUTPUT)
    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormat>,

    /// Network used for explorer links (overrides NEAR_NETWORK)
    #[arg(long, global = true)]
    network: Option<Network>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify an outcome's structure
    Verify {
        /// Path to the outcome JSON file
        file: String,
    },
    /// Inspect an outcome's contents
    Inspect {
        /// Path to the outcome JSON file
        file: String,
    },
    /// List every log line in emission order
    Logs {
        /// Path to the outcome JSON file
        file: String,
    },
    /// List structured EVENT_JSON events
    Events {
        /// Path to the outcome JSON file
        file: String,

        /// Only show events with this name
        #[arg(long)]
        name: Option<String>,
    },
    /// Compare two outcomes
    Diff {
        /// Path to the first outcome JSON file
        a: String,
        /// Path to the second outcome JSON file
        b: String,
    },
}

fn init_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ToolkitConfig::from_env_with_network(cli.network)?;
    init_tracing(&config.log_filter);

    let output = if cli.json {
        OutputFormat::Json
    } else {
        cli.output.unwrap_or(config.output)
    };
    let network = config.network;
    tracing::debug!(?output, ?network, "starting");

    match cli.command {
        Commands::Verify { file } => {
            let report = verify_outcome_file(&file)?;
            match output {
                OutputFormat::Json => print_json(&report)?,
                OutputFormat::Text => display::verification(&report),
            }
            if !report.valid {
                std::process::exit(1);
            }
        }
        Commands::Inspect { file } => {
            let outcome = load_outcome_file(&file)?;
            let inspection = inspect_outcome(&outcome, network);
            match output {
                OutputFormat::Json => print_json(&inspection)?,
                OutputFormat::Text => display::inspection(&inspection),
            }
        }
        Commands::Logs { file } => {
            let outcome = load_outcome_file(&file)?;
            let logs = outcome.logs();
            match output {
                OutputFormat::Json => print_json(&logs)?,
                OutputFormat::Text => display::logs(&logs),
            }
        }
        Commands::Events { file, name } => {
            let outcome = load_outcome_file(&file)?;
            let events: Vec<EventLog> = outcome
                .events()
                .into_iter()
                .filter(|e| name.as_deref().map_or(true, |n| e.event == n))
                .collect();
            match output {
                OutputFormat::Json => print_json(&events)?,
                OutputFormat::Text => display::events(&events),
            }
        }
        Commands::Diff { a, b } => {
            let diff = diff_outcome_files(&a, &b)?;
            match output {
                OutputFormat::Json => print_json(&diff)?,
                OutputFormat::Text => display::diff(&diff),
            }
        }
    }

    Ok(())
}
