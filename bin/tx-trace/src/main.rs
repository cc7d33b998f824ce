//! Tx Trace CLI
//!
//! Replays recorded EVM execution streams through the trace aggregator and
//! writes function, event and transfer traces to a JSON-lines store.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{debug, error};
use std::path::PathBuf;

use tx_trace_studio::commands::{
    display_schema, display_version, execute_replay, validate_args, validate_trace_file,
    ReplayArgs,
};

/// Tx Trace - call, event and token-transfer tracing for EVM transactions
#[derive(Parser, Debug)]
#[command(name = "tx-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a recorded execution stream and store its traces
    Replay {
        /// Recorded execution stream (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// JSON-lines trace store (placed in artifacts/ by default)
        #[arg(short, long, default_value = "artifacts/traces.jsonl")]
        output: PathBuf,

        /// Trace configuration file (TOML)
        #[arg(short, long, env = "TX_TRACE_CONFIG")]
        config: Option<PathBuf>,

        /// Maximum call depth before frames are dropped
        #[arg(long)]
        max_depth: Option<usize>,

        /// Do not store the function trace
        #[arg(long)]
        no_function_trace: bool,

        /// Drop classification columns from event and transfer traces
        #[arg(long)]
        no_tags: bool,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a JSON-lines trace store
    Validate {
        /// Path to trace store file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

/// Place a bare file name under artifacts/
fn store_path(output: PathBuf) -> PathBuf {
    if output.parent().map(|p| p.as_os_str().is_empty()).unwrap_or(true) {
        let redirected = PathBuf::from("artifacts").join(&output);
        debug!(
            "No directory given for {}, using {}",
            output.display(),
            redirected.display()
        );
        return redirected;
    }
    output
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Replay {
            input,
            output,
            config,
            max_depth,
            no_function_trace,
            no_tags,
            summary,
        } => {
            let args = ReplayArgs {
                input,
                output: store_path(output),
                config,
                max_depth,
                no_function_trace,
                no_tags,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            let result = execute_replay(args)?;
            if result.stored() < result.transactions() {
                let failed = result.transactions() - result.stored();
                error!("{} records were traced but not stored", failed);
                anyhow::bail!(
                    "{} of {} records could not be stored",
                    failed,
                    result.transactions()
                );
            }
        }

        Commands::Validate { file } => {
            validate_trace_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
