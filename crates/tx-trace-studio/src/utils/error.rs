//! Error types for the entire library.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in the commands
//! and the CLI binary.

use thiserror::Error;

/// Errors raised by a trace session while aggregating a transaction
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Call depth {depth} exceeds the maximum depth of {max}")]
    DepthExceeded { depth: usize, max: usize },

    #[error("Trace session is not active (reset it before accepting calls)")]
    SessionClosed,

    #[error("Trace store rejected record for transaction {tx_hash}: {source}")]
    StoreWriteFailed {
        tx_hash: String,
        #[source]
        source: StoreError,
    },
}

/// Errors that can occur while persisting or loading trace records
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to write trace store: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to read trace store: {0}")]
    ReadFailed(std::io::Error),

    #[error("Failed to serialize trace record: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("Invalid store path: {0}")]
    InvalidPath(String),
}

/// Errors that can occur while loading a trace configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors that can occur while parsing finalized trace text back into rows
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReaderError {
    #[error("Unexpected header: expected '{expected}', found '{found}'")]
    UnexpectedHeader { expected: String, found: String },

    #[error("Malformed row {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
}

/// Errors that can occur while loading an execution recording
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Failed to read recording: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid recording JSON: {0}")]
    Json(#[from] serde_json::Error),
}
