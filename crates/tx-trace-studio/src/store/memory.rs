//! In-memory trace store.

use super::TraceStore;
use crate::model::TraceRecord;
use crate::utils::error::StoreError;
use std::collections::BTreeMap;

/// Keeps records in a map keyed by transaction hash
///
/// A second record for the same hash replaces the first.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<String, TraceRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tx_hash: &str) -> Option<&TraceRecord> {
        self.records.get(tx_hash)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> impl Iterator<Item = &TraceRecord> {
        self.records.values()
    }
}

impl TraceStore for MemoryStore {
    fn put(&mut self, record: &TraceRecord) -> Result<(), StoreError> {
        self.records.insert(record.key(), record.clone());
        Ok(())
    }
}
