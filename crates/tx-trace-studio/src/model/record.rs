//! Finalized per-transaction output and the record handed to a trace store.
//!
//! Field names on the wire (`block`, `tx`, `gasprice`, `transferlogs`, ...)
//! are the ones downstream analysis tooling reads.

use super::primitives::{Address, H256};
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Transaction metadata supplied by the engine at end of transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxMetadata {
    #[serde(rename = "block")]
    pub block_number: u64,

    #[serde(rename = "tx")]
    pub tx_hash: H256,

    pub from: Address,

    /// `None` for contract creation
    #[serde(default)]
    pub to: Option<Address>,

    /// Decimal wei
    #[serde(default = "zero")]
    pub value: String,

    /// Decimal wei
    #[serde(rename = "gasprice", default = "zero")]
    pub gas_price: String,

    #[serde(rename = "gasused", default)]
    pub gas_used: u64,
}

fn zero() -> String {
    "0".to_string()
}

/// The three text traces of one transaction, as produced by `finalize`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalizedTrace {
    /// Empty when the output schema disables the function trace
    pub functrace: String,
    pub eventtrace: String,
    pub transfertrace: String,

    /// False when a frame or event was dropped for exceeding the depth bound
    pub complete: bool,
}

/// One persisted transaction trace, keyed by transaction hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Schema version for compatibility checking
    pub version: String,

    #[serde(flatten)]
    pub metadata: TxMetadata,

    pub functrace: String,
    pub eventtrace: String,

    #[serde(rename = "transferlogs")]
    pub transfertrace: String,

    pub complete: bool,

    /// RFC 3339 timestamp when the record was built
    pub recorded_at: String,
}

impl TraceRecord {
    /// Combine metadata with finalized traces
    pub fn new(metadata: TxMetadata, trace: FinalizedTrace) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            metadata,
            functrace: trace.functrace,
            eventtrace: trace.eventtrace,
            transfertrace: trace.transfertrace,
            complete: trace.complete,
            recorded_at: Utc::now().to_rfc3339(),
        }
    }

    /// Store key
    pub fn key(&self) -> String {
        self.metadata.tx_hash.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_names() {
        let metadata = TxMetadata {
            block_number: 17,
            tx_hash: H256([0xab; 32]),
            from: Address([0x01; 20]),
            to: None,
            value: "5".to_string(),
            gas_price: "100".to_string(),
            gas_used: 21000,
        };
        let record = TraceRecord::new(metadata, FinalizedTrace::default());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["block"], 17);
        assert_eq!(json["gasprice"], "100");
        assert_eq!(json["gasused"], 21000);
        assert!(json.get("transferlogs").is_some());
        assert_eq!(json["tx"], format!("0x{}", "ab".repeat(32)));
    }
}
