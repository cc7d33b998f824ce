//! Reading finalized traces back for analysis.
//!
//! Parses the text blobs of a stored [`TraceRecord`] into typed rows,
//! rebuilds the call tree and answers token-transfer and function-call queries.

pub mod rows;
pub mod tree;

// Re-export main functions
pub use rows::{parse_event_trace, parse_function_trace, parse_transfer_trace, EventRow, TransferRow};
pub use tree::{build_call_tree, CallNode};

use crate::model::{Address, CallRecord, TraceRecord, H256};
use crate::utils::error::ReaderError;

/// All three traces of one record, parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTrace {
    pub calls: Vec<CallRecord>,
    pub events: Vec<EventRow>,
    pub transfers: Vec<TransferRow>,
}

impl ParsedTrace {
    /// Parse the blobs of a stored record
    pub fn from_record(record: &TraceRecord) -> Result<Self, ReaderError> {
        Ok(Self {
            calls: parse_function_trace(&record.functrace)?,
            events: parse_event_trace(&record.eventtrace)?,
            transfers: parse_transfer_trace(&record.transfertrace)?,
        })
    }

    /// Whether `token` moved from `from` to `to` for at most `max_amount`
    pub fn contains_token_transfer(
        &self,
        from: &Address,
        to: &Address,
        token: &Address,
        max_amount: u128,
    ) -> bool {
        contains_token_transfer(&self.transfers, from, to, token, max_amount)
    }

    /// Whether `address` was called with the 4-byte function `selector`
    pub fn contains_function(&self, address: &Address, selector: [u8; 4]) -> bool {
        contains_function(&self.calls, address, selector)
    }
}

/// Whether any call targets `address` with input starting with `selector`
///
/// Calls with less than four bytes of input never match.
pub fn contains_function(calls: &[CallRecord], address: &Address, selector: [u8; 4]) -> bool {
    calls
        .iter()
        .any(|call| call.frame.to == *address && call.frame.input.get(..4) == Some(&selector[..]))
}

/// Whether any transfer row moves `token` from `from` to `to` for at most `max_amount`
///
/// Party columns match whether they hold a 32-byte topic or a plain
/// address. Values too large for `u128` never match.
pub fn contains_token_transfer(
    transfers: &[TransferRow],
    from: &Address,
    to: &Address,
    token: &Address,
    max_amount: u128,
) -> bool {
    transfers.iter().any(|row| {
        row.token == *token
            && party_matches(&row.from, from)
            && party_matches(&row.to, to)
            && parse_amount(&row.value).is_some_and(|v| v <= max_amount)
    })
}

/// Compare a transfer party column against an address
fn party_matches(raw: &str, address: &Address) -> bool {
    if let Ok(topic) = raw.parse::<H256>() {
        return topic.to_address() == *address;
    }
    raw.parse::<Address>().is_ok_and(|a| a == *address)
}

/// Hex amount (no prefix) as an integer, if it fits
fn parse_amount(hex: &str) -> Option<u128> {
    let digits = hex.trim_start_matches('0');
    if digits.is_empty() {
        return Some(0);
    }
    u128::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(from: String, to: String, value: &str) -> TransferRow {
        TransferRow {
            from,
            to,
            token: Address([0xee; 20]),
            value: value.to_string(),
            depth: 0,
            trace_index: 0,
            trace_path: vec![],
            tag: None,
        }
    }

    #[test]
    fn test_amount_parsing() {
        assert_eq!(parse_amount(""), Some(0));
        assert_eq!(parse_amount("0000"), Some(0));
        assert_eq!(parse_amount("2a"), Some(42));
        assert_eq!(parse_amount(&"ff".repeat(32)), None);
    }

    #[test]
    fn test_topic_and_address_parties() {
        let alice = Address([0x0a; 20]);
        let bob = Address([0x0b; 20]);
        let mut topic = [0u8; 32];
        topic[12..].copy_from_slice(&alice.0);

        let rows = vec![row(H256(topic).to_string(), bob.to_string(), "64")];
        let token = Address([0xee; 20]);

        assert!(contains_token_transfer(&rows, &alice, &bob, &token, 100));
        assert!(!contains_token_transfer(&rows, &alice, &bob, &token, 99));
        assert!(!contains_token_transfer(&rows, &bob, &alice, &token, 100));
        assert!(!contains_token_transfer(&rows, &alice, &bob, &Address::zero(), 100));
    }

    #[test]
    fn test_function_selector_match() {
        use crate::model::{CallFrame, CallType};

        let token = Address([0xee; 20]);
        let call = |to: Address, input: Vec<u8>| {
            let mut frame = CallFrame::new(0, CallType::Call, 0, Address([0x01; 20]), to);
            frame.input = input;
            CallRecord {
                frame,
                call_stack: vec![],
                trace_path: vec![],
            }
        };
        let calls = vec![
            call(token, vec![0xa9, 0x05, 0x9c, 0xbb, 0x00, 0x01]),
            call(Address([0x02; 20]), vec![0x09, 0x5e, 0xa7, 0xb3]),
            call(token, vec![0x23, 0xb8]),
        ];

        assert!(contains_function(&calls, &token, [0xa9, 0x05, 0x9c, 0xbb]));
        // Selector called, but on another contract
        assert!(!contains_function(&calls, &token, [0x09, 0x5e, 0xa7, 0xb3]));
        // Short input is not a selector
        assert!(!contains_function(&calls, &token, [0x23, 0xb8, 0x72, 0xdd]));
        assert!(!contains_function(&[], &token, [0xa9, 0x05, 0x9c, 0xbb]));
    }
}
