use crate::reader::{build_call_tree, ParsedTrace};
use crate::store::read_records;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::{Context, Result};
use log::warn;
use std::path::Path;

/// Validate a JSON-lines trace store
///
/// Every record must deserialize and every trace blob must parse.
pub fn validate_trace_file(file_path: impl AsRef<Path>) -> Result<()> {
    let file_path = file_path.as_ref();
    println!("Validating trace store: {}", file_path.display());

    let records = read_records(file_path)?;

    let mut calls = 0;
    let mut events = 0;
    let mut transfers = 0;
    let mut incomplete = 0;

    for record in &records {
        if record.version != SCHEMA_VERSION {
            warn!(
                "Record {} has schema version {} (current {})",
                record.key(),
                record.version,
                SCHEMA_VERSION
            );
        }

        let parsed = ParsedTrace::from_record(record)
            .with_context(|| format!("Invalid trace text in record {}", record.key()))?;

        calls += build_call_tree(&parsed.calls)
            .iter()
            .map(|root| root.size())
            .sum::<usize>();
        events += parsed.events.len();
        transfers += parsed.transfers.len();
        if !record.complete {
            incomplete += 1;
        }
    }

    println!("✓ Valid trace store");
    println!("  Records: {}", records.len());
    println!("  Incomplete: {}", incomplete);
    println!("  Calls: {}", calls);
    println!("  Events: {}", events);
    println!("  Transfers: {}", transfers);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Tx Trace Studio Record Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Record Structure (one JSON object per line):");
        println!("  version: string        - Schema version (e.g., '1.0.0')");
        println!("  block: number          - Block number");
        println!("  tx: string             - Transaction hash");
        println!("  from: string           - Sender address");
        println!("  to: string?            - Recipient (null for contract creation)");
        println!("  value: string          - Value in wei (decimal)");
        println!("  gasprice: string       - Gas price in wei (decimal)");
        println!("  gasused: number        - Gas used");
        println!("  functrace: string      - Function trace (empty when disabled)");
        println!("  eventtrace: string     - Event trace");
        println!("  transferlogs: string   - Transfer trace");
        println!("  complete: bool         - False if frames were dropped at the depth bound");
        println!("  recorded_at: string    - RFC 3339 timestamp");
        println!();
        println!("Trace text is a header row plus comma-separated rows; lists render as [a b c].");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Tx Trace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Record Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Aggregates EVM execution callbacks into function, event and transfer traces.");
}
