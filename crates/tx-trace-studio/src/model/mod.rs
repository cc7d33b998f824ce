//! Structured records flowing through the aggregator.
//!
//! Everything here is plain data; turning it into text is the job of
//! [`crate::render`].

pub mod event;
pub mod frame;
pub mod primitives;
pub mod record;

// Re-export main types
pub use event::{EventRecord, EventTag, LogEvent, TokenTransfer, TransferRecord};
pub use frame::{CallFrame, CallRecord, CallType};
pub use primitives::{Address, HexParseError, H256};
pub use record::{FinalizedTrace, TraceRecord, TxMetadata};
