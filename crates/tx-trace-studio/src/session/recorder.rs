//! Event and transfer sinks of a session.
//!
//! Every log lands in the event sink; classified transfers and native value
//! moves additionally land in the transfer sink, stamped with the call path
//! of the frame that produced them.

use crate::aggregator::DepthTable;
use crate::classifier::classify;
use crate::model::{Address, EventRecord, EventTag, LogEvent, TransferRecord};
use log::trace;

/// Append-only event and transfer sinks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recorder {
    events: Vec<EventRecord>,
    transfers: Vec<TransferRecord>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and record one log, returning its tag
    pub fn record_event(&mut self, log: LogEvent, table: &DepthTable, trace_index: u64) -> EventTag {
        let classification = classify(&log.address, &log.topics, &log.data);
        let tag = classification.tag;

        if let Some(transfer) = classification.transfer {
            trace!(
                "{} of {} at depth {} (trace index {})",
                tag,
                transfer.token,
                log.depth,
                trace_index
            );
            self.transfers.push(TransferRecord {
                from: transfer.from.to_string(),
                to: transfer.to.to_string(),
                token: transfer.token,
                value: transfer.value,
                depth: log.depth,
                trace_path: table.path_at(log.depth),
                tag,
                trace_index,
            });
        }

        self.events.push(EventRecord {
            address: log.address,
            topics: log.topics,
            data: log.data,
            depth: log.depth,
            trace_index,
            tag,
        });

        tag
    }

    /// Record a plain value transfer (zero address stands in for the token)
    pub fn record_value_transfer(
        &mut self,
        from: Address,
        to: Address,
        value: u128,
        depth: usize,
        table: &DepthTable,
        trace_index: u64,
    ) {
        self.transfers.push(TransferRecord {
            from: from.to_string(),
            to: to.to_string(),
            token: Address::zero(),
            value: format!("{:x}", value),
            depth,
            trace_path: table.path_at(depth),
            tag: EventTag::Native,
            trace_index,
        });
    }

    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    pub fn transfers(&self) -> &[TransferRecord] {
        &self.transfers
    }

    pub fn reset(&mut self) {
        self.events.clear();
        self.transfers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::SIGNATURES;
    use crate::model::H256;

    #[test]
    fn test_transfer_stamped_with_open_path() {
        let mut table = DepthTable::new();
        table.open_frame(0);
        table.open_frame(1);
        table.open_frame(1);

        let mut recorder = Recorder::new();
        let log = LogEvent {
            address: Address([0xaa; 20]),
            topics: vec![SIGNATURES.transfer, H256([1; 32]), H256([2; 32])],
            data: vec![0x01, 0x00],
            depth: 1,
        };

        let tag = recorder.record_event(log, &table, 5);

        assert_eq!(tag, EventTag::Erc20Transfer);
        assert_eq!(recorder.events().len(), 1);
        let transfer = &recorder.transfers()[0];
        assert_eq!(transfer.trace_path, vec![1]);
        assert_eq!(transfer.value, "0100");
        assert_eq!(transfer.trace_index, 5);
    }

    #[test]
    fn test_unclassified_event_only() {
        let table = DepthTable::new();
        let mut recorder = Recorder::new();
        let log = LogEvent {
            address: Address([0xaa; 20]),
            topics: vec![H256([9; 32])],
            data: vec![],
            depth: 0,
        };

        assert_eq!(recorder.record_event(log, &table, 0), EventTag::Unclassified);
        assert_eq!(recorder.events().len(), 1);
        assert!(recorder.transfers().is_empty());
    }

    #[test]
    fn test_native_value_in_hex() {
        let table = DepthTable::new();
        let mut recorder = Recorder::new();
        recorder.record_value_transfer(Address([1; 20]), Address([2; 20]), 1_000_000, 0, &table, 0);

        let transfer = &recorder.transfers()[0];
        assert_eq!(transfer.value, "f4240");
        assert_eq!(transfer.tag, EventTag::Native);
        assert!(transfer.token.is_zero());
        assert!(transfer.trace_path.is_empty());
    }
}
