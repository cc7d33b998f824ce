//! Aggregation of call-enter notifications into a nested function trace.
//!
//! This module provides:
//! - Depth counter table (stable call-site addresses)
//! - Depth buffer pool (records waiting for their ancestors to close)
//! - Merge engine (the single-pass unwind/fold)

pub mod buffer_pool;
pub mod depth_table;
pub mod merge;

// Re-export main types
pub use buffer_pool::BufferPool;
pub use depth_table::DepthTable;
pub use merge::MergeEngine;
