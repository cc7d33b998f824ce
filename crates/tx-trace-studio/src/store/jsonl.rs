//! JSON-lines trace store.
//!
//! Each record is serialized compactly onto its own line and appended, so a
//! crash mid-run loses at most the record being written.

use super::TraceStore;
use crate::model::TraceRecord;
use crate::utils::error::StoreError;
use log::{debug, info};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends records to a `.jsonl` file
#[derive(Debug)]
pub struct JsonLinesStore {
    path: PathBuf,
    writer: BufWriter<File>,
    written: usize,
}

impl JsonLinesStore {
    /// Open (or create) a store file for appending
    ///
    /// **Public** - main entry point for file output
    ///
    /// # Errors
    /// * `StoreError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
    /// * `StoreError::WriteFailed` - File cannot be opened
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();

        info!("Opening trace store: {}", path.display());

        super::validate_path(path)?;

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating parent directories: {}", parent.display());
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::InvalidPath(format!(
                        "Cannot create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records written through this handle
    pub fn written(&self) -> usize {
        self.written
    }
}

impl TraceStore for JsonLinesStore {
    fn put(&mut self, record: &TraceRecord) -> Result<(), StoreError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        self.written += 1;
        debug!("Stored trace for {}", record.key());
        Ok(())
    }
}

/// Read every record from a JSON-lines store file
///
/// Blank lines are skipped.
///
/// # Errors
/// * `StoreError::ReadFailed` - File cannot be opened or read
/// * `StoreError::MalformedRecord` - A line is not a valid record
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<TraceRecord>, StoreError> {
    let path = path.as_ref();

    debug!("Reading trace records from: {}", path.display());

    let file = File::open(path).map_err(StoreError::ReadFailed)?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(StoreError::ReadFailed)?;
        if line.trim().is_empty() {
            continue;
        }

        let record: TraceRecord =
            serde_json::from_str(&line).map_err(|e| StoreError::MalformedRecord {
                line: i + 1,
                reason: e.to_string(),
            })?;
        records.push(record);
    }

    debug!("Loaded {} trace records", records.len());

    Ok(records)
}
