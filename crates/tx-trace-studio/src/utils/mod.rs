//! Configuration and error types shared across the library.

pub mod config;
pub mod error;

// Re-export commonly used error types for convenience
pub use error::{ConfigError, ReaderError, ReplayError, StoreError, TraceError};
