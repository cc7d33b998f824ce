//! Recorded execution streams.
//!
//! A recording is the callback sequence the execution engine produced for a
//! batch of transactions, captured as JSON:
//!
//! ```json
//! {
//!   "transactions": [{
//!     "metadata": { "block": 1, "tx": "0x..", "from": "0x..", "to": "0x.." },
//!     "steps": [
//!       { "kind": "call", "index": 0, "call_type": "call", "depth": 0, "from": "0x..", "to": "0x.." },
//!       { "kind": "log", "address": "0x..", "topics": ["0x.."], "data": "0x2a", "depth": 0 },
//!       { "kind": "value_transfer", "from": "0x..", "to": "0x..", "value": "1000", "depth": 0 }
//!     ]
//!   }]
//! }
//! ```

use crate::model::primitives::decimal;
use crate::model::{Address, CallFrame, LogEvent, TxMetadata};
use crate::utils::error::ReplayError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A batch of recorded transactions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    #[serde(default)]
    pub transactions: Vec<RecordedTransaction>,
}

/// One transaction's callbacks plus its end-of-transaction metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedTransaction {
    pub metadata: TxMetadata,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One callback from the execution engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Call(CallFrame),
    Log(LogEvent),
    ValueTransfer {
        from: Address,
        to: Address,
        /// Decimal wei
        #[serde(with = "decimal")]
        value: u128,
        depth: usize,
    },
}

/// Load a recording from a JSON file
///
/// # Errors
/// * `ReplayError::Io` - File cannot be opened
/// * `ReplayError::Json` - Content is not a valid recording
pub fn load_recording(path: impl AsRef<Path>) -> Result<Recording, ReplayError> {
    let path = path.as_ref();

    debug!("Reading recording from: {}", path.display());

    let file = File::open(path)?;
    let recording: Recording = serde_json::from_reader(BufReader::new(file))?;

    debug!("Recording loaded: {} transactions", recording.transactions.len());

    Ok(recording)
}
