//! Rendering of structured trace records.
//!
//! The aggregator only ever deals in `CallRecord`/`EventRecord`/
//! `TransferRecord`; a `TraceRenderer` decides how they look on disk.
//! The default is the comma-delimited text layout read by the analysis
//! tooling.

pub mod summary;
pub mod text;

// Re-export main types and functions
pub use summary::render_terminal_summary;
pub use text::{format_path, format_topics, TextRenderer};

use crate::model::{CallRecord, EventRecord, TransferRecord};

/// Turns finalized records into the three trace blobs
pub trait TraceRenderer {
    /// Function trace, in merged (pre-order) call order
    fn render_calls(&self, calls: &[CallRecord]) -> String;

    /// Event trace, in emission order
    fn render_events(&self, events: &[EventRecord]) -> String;

    /// Transfer trace, in emission order
    fn render_transfers(&self, transfers: &[TransferRecord]) -> String;
}
