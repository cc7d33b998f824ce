//! Replay command implementation.
//!
//! The replay command:
//! 1. Resolves the trace configuration (file, then CLI overrides)
//! 2. Loads the recorded execution stream
//! 3. Drives a tracer through every transaction
//! 4. Appends finalized records to the JSON-lines store

use crate::commands::models::ReplayArgs;
use crate::render::render_terminal_summary;
use crate::replay::{load_recording, replay_recording, ReplaySummary};
use crate::store::JsonLinesStore;
use crate::tracer::Tracer;
use crate::utils::config::{load_config, TraceConfig, MAX_DEPTH_LIMIT};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the replay command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Config file read/parse errors
/// * Recording read/parse errors
/// * Store file cannot be opened
pub fn execute_replay(args: ReplayArgs) -> Result<ReplaySummary> {
    let start_time = Instant::now();

    let config = resolve_config(&args)?;
    debug!("Effective config: {:?}", config);

    info!("Loading recording: {}", args.input.display());
    let recording = load_recording(&args.input)
        .with_context(|| format!("Failed to load recording {}", args.input.display()))?;

    let store = JsonLinesStore::open(&args.output)
        .with_context(|| format!("Failed to open trace store {}", args.output.display()))?;

    let mut tracer = Tracer::new(&config, store);
    let summary = replay_recording(&recording, &mut tracer);

    info!(
        "✓ {} records written to: {}",
        tracer.store().written(),
        args.output.display()
    );

    if args.print_summary {
        println!("{}", render_terminal_summary(&summary));
    }

    info!(
        "Replay completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(summary)
}

/// Config file (or defaults) with CLI overrides applied
fn resolve_config(args: &ReplayArgs) -> Result<TraceConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => TraceConfig::default(),
    };

    if let Some(max_depth) = args.max_depth {
        config.session.max_depth = max_depth;
    }
    if args.no_function_trace {
        config.output.function_trace = false;
    }
    if args.no_tags {
        config.output.classification_tags = false;
    }

    config.validate().context("Invalid trace configuration")?;
    Ok(config)
}

/// Validate replay arguments
///
/// **Public** - can be called before execute_replay for early validation
pub fn validate_args(args: &ReplayArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input recording path cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input recording not found: {}", args.input.display());
    }

    if args.output.as_os_str().is_empty() {
        anyhow::bail!("Output store path cannot be empty");
    }

    if args.output.is_dir() {
        anyhow::bail!("Output store path is a directory: {}", args.output.display());
    }

    if args.max_depth == Some(0) {
        anyhow::bail!("max_depth must be greater than 0");
    }

    if args.max_depth.is_some_and(|d| d > MAX_DEPTH_LIMIT) {
        anyhow::bail!("max_depth must be at most {}", MAX_DEPTH_LIMIT);
    }

    if let Some(config) = &args.config {
        if !config.is_file() {
            anyhow::bail!("Config file not found: {}", config.display());
        }
    }

    Ok(())
}
