//! Persistence handoff for finalized trace records.
//!
//! The aggregator only needs a collaborator that durably accepts one record
//! keyed by transaction hash. Two implementations ship here:
//! - JSON lines on disk (one record per line, appended)
//! - in-memory map (tests, dry runs)

pub mod jsonl;
pub mod memory;

// Re-export main types
pub use jsonl::{read_records, JsonLinesStore};
pub use memory::MemoryStore;

use crate::model::TraceRecord;
use crate::utils::error::StoreError;
use std::path::Path;

/// Destination for finalized trace records
pub trait TraceStore {
    /// Durably accept one record
    ///
    /// Failures are reported to the caller, which logs them; records are not retried.
    fn put(&mut self, record: &TraceRecord) -> Result<(), StoreError>;
}

impl<S: TraceStore + ?Sized> TraceStore for Box<S> {
    fn put(&mut self, record: &TraceRecord) -> Result<(), StoreError> {
        (**self).put(record)
    }
}

/// Common path validation for store files
pub fn validate_path(path: &Path) -> Result<(), StoreError> {
    if path.as_os_str().is_empty() {
        return Err(StoreError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(StoreError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_path() {
        let dir = tempdir().unwrap();

        assert!(validate_path(Path::new("")).is_err());
        assert!(validate_path(dir.path()).is_err());
        assert!(validate_path(&dir.path().join("traces.jsonl")).is_ok());
    }
}
