//! Observer adapter driven by the execution engine.
//!
//! Wraps one [`TraceSession`] and one [`TraceStore`]. The engine calls the
//! `on_*` hooks in execution order; `on_tx_end` finalizes the session and
//! hands the record to the store.

use crate::model::{Address, CallFrame, EventTag, LogEvent, TraceRecord, TxMetadata};
use crate::session::TraceSession;
use crate::store::TraceStore;
use crate::utils::config::TraceConfig;
use crate::utils::error::TraceError;
use log::{debug, error, warn};

/// Counters over the lifetime of a tracer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TracerStats {
    /// Transactions finalized
    pub transactions: u64,
    /// Records the store accepted
    pub stored: u64,
    pub store_failures: u64,
    /// Records finalized with dropped frames or events
    pub incomplete: u64,
}

/// Execution observer feeding a session and a store
pub struct Tracer<S: TraceStore> {
    session: TraceSession,
    store: S,
    stats: TracerStats,
}

impl<S: TraceStore> Tracer<S> {
    pub fn new(config: &TraceConfig, store: S) -> Self {
        Self {
            session: TraceSession::new(config),
            store,
            stats: TracerStats::default(),
        }
    }

    /// Begin a new transaction
    pub fn on_tx_start(&mut self) {
        self.session.reset();
    }

    /// Call-enter notification
    pub fn on_call(&mut self, frame: CallFrame) -> Result<(), TraceError> {
        self.session.accept_call(frame)
    }

    /// Log emission
    pub fn on_log(&mut self, log: LogEvent) -> Result<EventTag, TraceError> {
        self.session.accept_event(log)
    }

    /// Plain value transfer between accounts
    pub fn on_value_transfer(
        &mut self,
        from: Address,
        to: Address,
        value: u128,
        depth: usize,
    ) -> Result<(), TraceError> {
        self.session.accept_value_transfer(from, to, value, depth)
    }

    /// End of transaction: finalize and persist
    ///
    /// # Returns
    /// The record handed to the store
    ///
    /// # Errors
    /// * `TraceError::SessionClosed` - no transaction in progress
    /// * `TraceError::StoreWriteFailed` - store rejected the record (logged, not retried)
    pub fn on_tx_end(&mut self, metadata: TxMetadata) -> Result<TraceRecord, TraceError> {
        let trace = self.session.finalize()?;
        self.stats.transactions += 1;

        if !trace.complete {
            self.stats.incomplete += 1;
            warn!("Trace for {} is incomplete", metadata.tx_hash);
        }

        let record = TraceRecord::new(metadata, trace);

        match self.store.put(&record) {
            Ok(()) => {
                self.stats.stored += 1;
                debug!("Trace for {} handed to store", record.key());
                Ok(record)
            }
            Err(source) => {
                self.stats.store_failures += 1;
                error!("Failed to store trace for {}: {}", record.key(), source);
                Err(TraceError::StoreWriteFailed {
                    tx_hash: record.key(),
                    source,
                })
            }
        }
    }

    pub fn session(&self) -> &TraceSession {
        &self.session
    }

    pub fn stats(&self) -> TracerStats {
        self.stats
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CallType, H256};
    use crate::store::MemoryStore;
    use crate::utils::error::StoreError;

    struct FailingStore;

    impl TraceStore for FailingStore {
        fn put(&mut self, _record: &TraceRecord) -> Result<(), StoreError> {
            Err(StoreError::InvalidPath("read-only".to_string()))
        }
    }

    fn metadata(byte: u8) -> TxMetadata {
        TxMetadata {
            block_number: 10,
            tx_hash: H256([byte; 32]),
            from: Address([0x01; 20]),
            to: Some(Address([0x02; 20])),
            value: "0".to_string(),
            gas_price: "1".to_string(),
            gas_used: 21000,
        }
    }

    #[test]
    fn test_records_reach_store() {
        let mut tracer = Tracer::new(&TraceConfig::default(), MemoryStore::new());

        tracer.on_tx_start();
        tracer
            .on_call(CallFrame::new(0, CallType::Call, 0, Address([1; 20]), Address([2; 20])))
            .unwrap();
        let record = tracer.on_tx_end(metadata(0xaa)).unwrap();

        assert_eq!(tracer.store().len(), 1);
        assert!(tracer.store().get(&record.key()).is_some());
        assert_eq!(tracer.stats().stored, 1);
    }

    #[test]
    fn test_store_failure_is_reported() {
        let mut tracer = Tracer::new(&TraceConfig::default(), FailingStore);

        tracer.on_tx_start();
        let result = tracer.on_tx_end(metadata(0xbb));

        match result {
            Err(TraceError::StoreWriteFailed { tx_hash, .. }) => {
                assert_eq!(tx_hash, H256([0xbb; 32]).to_string())
            }
            other => panic!("expected store failure, got {:?}", other),
        }
        assert_eq!(tracer.stats().store_failures, 1);

        // Next transaction is unaffected
        tracer.on_tx_start();
        assert!(tracer
            .on_call(CallFrame::new(0, CallType::Call, 0, Address::zero(), Address::zero()))
            .is_ok());
    }

    #[test]
    fn test_end_without_start() {
        let mut tracer = Tracer::new(&TraceConfig::default(), MemoryStore::new());
        assert!(matches!(
            tracer.on_tx_end(metadata(1)),
            Err(TraceError::SessionClosed)
        ));
    }
}
