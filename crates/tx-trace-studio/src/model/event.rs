//! Log events, their classification and normalized token transfers.

use super::primitives::{hex_bytes, Address, H256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A log as emitted by the execution engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub address: Address,
    #[serde(default)]
    pub topics: Vec<H256>,
    #[serde(default, with = "hex_bytes")]
    pub data: Vec<u8>,
    /// Call depth of the frame that emitted the log
    #[serde(default)]
    pub depth: usize,
}

/// Recognized transfer/approval semantics of a log (or a native value move)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTag {
    Erc20Transfer,
    Erc20Approval,
    Erc721Transfer,
    Erc721Approval,
    Erc721ApprovalForAll,
    /// Plain value transfer between accounts, never produced by the classifier
    Native,
    Unclassified,
}

impl EventTag {
    /// Token standard column (`ERC20`, `ERC721`, `NATIVE`, or empty)
    pub fn standard(&self) -> &'static str {
        match self {
            Self::Erc20Transfer | Self::Erc20Approval => "ERC20",
            Self::Erc721Transfer | Self::Erc721Approval | Self::Erc721ApprovalForAll => "ERC721",
            Self::Native => "NATIVE",
            Self::Unclassified => "",
        }
    }

    /// Event function column (`Transfer`, `Approval`, `ApprovalForAll`, or empty)
    pub fn function(&self) -> &'static str {
        match self {
            Self::Erc20Transfer | Self::Erc721Transfer | Self::Native => "Transfer",
            Self::Erc20Approval | Self::Erc721Approval => "Approval",
            Self::Erc721ApprovalForAll => "ApprovalForAll",
            Self::Unclassified => "",
        }
    }

    /// Whether the tag describes an actual movement of value
    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::Erc20Transfer | Self::Erc721Transfer | Self::Native)
    }

    /// Inverse of the `(standard, function)` columns
    pub fn from_columns(standard: &str, function: &str) -> Option<Self> {
        match (standard, function) {
            ("ERC20", "Transfer") => Some(Self::Erc20Transfer),
            ("ERC20", "Approval") => Some(Self::Erc20Approval),
            ("ERC721", "Transfer") => Some(Self::Erc721Transfer),
            ("ERC721", "Approval") => Some(Self::Erc721Approval),
            ("ERC721", "ApprovalForAll") => Some(Self::Erc721ApprovalForAll),
            ("NATIVE", _) => Some(Self::Native),
            ("", "") => Some(Self::Unclassified),
            _ => None,
        }
    }
}

impl fmt::Display for EventTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unclassified => f.write_str("unclassified"),
            tag => write!(f, "{} {}", tag.standard(), tag.function()),
        }
    }
}

/// A log after it has been stamped and classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub address: Address,
    pub topics: Vec<H256>,
    pub data: Vec<u8>,
    pub depth: usize,
    pub trace_index: u64,
    pub tag: EventTag,
}

/// Token movement extracted from a log, before it is placed in the call tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTransfer {
    /// Raw `from` topic (32 bytes)
    pub from: H256,
    /// Raw `to` topic (32 bytes)
    pub to: H256,
    pub token: Address,
    /// Lowercase hex without `0x`
    pub value: String,
}

/// Normalized token movement as written to the transfer trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    pub from: String,
    pub to: String,
    pub token: Address,
    /// Lowercase hex without `0x`
    pub value: String,
    pub depth: usize,
    pub trace_path: Vec<u32>,
    pub tag: EventTag,
    pub trace_index: u64,
}
