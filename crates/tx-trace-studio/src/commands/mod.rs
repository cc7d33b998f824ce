//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the library components and report with `anyhow`.

pub mod models;
pub mod replay;
pub mod utils;

// Re-export main command functions
pub use models::ReplayArgs;
pub use replay::{execute_replay, validate_args};
pub use utils::{display_schema, display_version, validate_trace_file};
