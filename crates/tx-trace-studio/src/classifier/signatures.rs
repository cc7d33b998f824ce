//! Keccak-256 topic signatures of the token events we recognize.
//!
//! Computed once per process and shared read-only by every session.

use crate::model::H256;
use crate::utils::config::{APPROVAL_EVENT, APPROVAL_FOR_ALL_EVENT, TRANSFER_EVENT};
use once_cell::sync::Lazy;
use sha3::{Digest, Keccak256};

/// Process-wide signature table
pub static SIGNATURES: Lazy<EventSignatures> = Lazy::new(EventSignatures::compute);

/// Topic-0 values of the recognized events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSignatures {
    pub transfer: H256,
    pub approval: H256,
    pub approval_for_all: H256,
}

impl EventSignatures {
    fn compute() -> Self {
        Self {
            transfer: event_signature(TRANSFER_EVENT),
            approval: event_signature(APPROVAL_EVENT),
            approval_for_all: event_signature(APPROVAL_FOR_ALL_EVENT),
        }
    }
}

/// Keccak-256 of arbitrary bytes
pub fn keccak256(data: impl AsRef<[u8]>) -> H256 {
    H256(Keccak256::digest(data.as_ref()).into())
}

/// Topic-0 for a canonical event signature such as `Transfer(address,address,uint256)`
pub fn event_signature(signature: &str) -> H256 {
    keccak256(signature.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_signatures() {
        assert_eq!(
            SIGNATURES.transfer.to_string(),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
        assert_eq!(
            SIGNATURES.approval.to_string(),
            "0x8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925"
        );
        assert_eq!(
            SIGNATURES.approval_for_all.to_string(),
            "0x17307eab39ab6107e8899845ad3d59bd9653f200f220920489ca2b5937696c31"
        );
    }

    #[test]
    fn test_keccak_empty() {
        assert_eq!(
            keccak256(b"").to_string(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }
}
