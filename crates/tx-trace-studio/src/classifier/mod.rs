//! Token event classification from raw log topics.
//!
//! A log is recognized purely by its topic arity and topic 0:
//!
//! | topics | topic 0          | tag                    |
//! |--------|------------------|------------------------|
//! | 3      | `Transfer`       | ERC20 Transfer         |
//! | 3      | `Approval`       | ERC20 Approval         |
//! | 4      | `Transfer`       | ERC721 Transfer        |
//! | 4      | `Approval`       | ERC721 Approval        |
//! | 4      | `ApprovalForAll` | ERC721 ApprovalForAll  |
//!
//! Everything else is `Unclassified`, which is a normal outcome.

pub mod signatures;

pub use signatures::{event_signature, keccak256, EventSignatures, SIGNATURES};

use crate::model::{Address, EventTag, TokenTransfer, H256};

/// Result of classifying one log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub tag: EventTag,

    /// Present only for transfer tags
    pub transfer: Option<TokenTransfer>,
}

/// Classify a log and extract the token movement it describes, if any
///
/// # Arguments
/// * `address` - Emitting contract (becomes the token address)
/// * `topics` - Log topics, signature first
/// * `data` - Raw log data
pub fn classify(address: &Address, topics: &[H256], data: &[u8]) -> Classification {
    let tag = classify_tag(topics);

    let transfer = match tag {
        EventTag::Erc20Transfer => Some(TokenTransfer {
            from: topics[1],
            to: topics[2],
            token: *address,
            value: hex::encode(data),
        }),
        // Token id lives in topic 3 under the standard layout; some contracts put it in data
        EventTag::Erc721Transfer => Some(TokenTransfer {
            from: topics[1],
            to: topics[2],
            token: *address,
            value: if data.is_empty() {
                hex::encode(topics[3].as_bytes())
            } else {
                hex::encode(data)
            },
        }),
        _ => None,
    };

    Classification { tag, transfer }
}

/// Tag of a log from its topics alone
pub fn classify_tag(topics: &[H256]) -> EventTag {
    let sigs = &*SIGNATURES;
    let Some(signature) = topics.first() else {
        return EventTag::Unclassified;
    };

    match topics.len() {
        3 if *signature == sigs.transfer => EventTag::Erc20Transfer,
        3 if *signature == sigs.approval => EventTag::Erc20Approval,
        4 if *signature == sigs.transfer => EventTag::Erc721Transfer,
        4 if *signature == sigs.approval => EventTag::Erc721Approval,
        4 if *signature == sigs.approval_for_all => EventTag::Erc721ApprovalForAll,
        _ => EventTag::Unclassified,
    }
}
