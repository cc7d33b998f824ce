//! Stream call-enter notifications into a correctly nested call trace.
//!
//! Call-enter notifications of one transaction are well nested: all children
//! of a depth-d frame arrive at depth d+1 before any sibling or ancestor at
//! depth <= d. A shallower frame therefore proves that every deeper open
//! frame is finished, and their buffers can be folded into their parents.
//!
//! # Algorithm
//! For a frame at depth `d`:
//! 1. Reject `d >= max_depth`
//! 2. Unwind: while `current > d`, append `slot(current)` to `slot(current - 1)`
//! 3. If `d == 0`, commit `slot(0)` (the previous top-level call) to output
//! 4. Open the frame in the depth table and capture its paths
//! 5. Append the record to `slot(d)` and set `current = d`

use super::buffer_pool::BufferPool;
use super::depth_table::DepthTable;
use crate::model::{CallFrame, CallRecord};
use crate::utils::error::TraceError;
use log::{debug, trace};

/// Single-pass fold of depth-tagged call frames
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeEngine {
    pool: BufferPool<CallRecord>,
    table: DepthTable,
    current_depth: usize,
    max_depth: usize,

    /// Fully merged top-level calls, in execution order
    committed: Vec<CallRecord>,
}

impl MergeEngine {
    pub fn new(max_depth: usize) -> Self {
        Self {
            pool: BufferPool::new(),
            table: DepthTable::new(),
            current_depth: 0,
            max_depth,
            committed: Vec::new(),
        }
    }

    /// Place a frame in the call tree
    ///
    /// # Errors
    /// * `TraceError::DepthExceeded` - frame depth is at or beyond the bound;
    ///   the engine state is left untouched
    pub fn accept(&mut self, frame: CallFrame) -> Result<(), TraceError> {
        let depth = frame.depth;
        if depth >= self.max_depth {
            return Err(TraceError::DepthExceeded {
                depth,
                max: self.max_depth,
            });
        }

        self.unwind_to(depth);

        if depth == 0 {
            self.pool.drain_into(0, &mut self.committed);
        }

        let site = self.table.open_frame(depth);
        let record = CallRecord {
            call_stack: self.table.call_stack_at(depth),
            trace_path: self.table.path_at(depth),
            frame,
        };
        trace!(
            "Opened frame #{} at depth {} (site {})",
            record.frame.index,
            depth,
            site
        );

        self.pool.slot(depth).push(record);
        self.current_depth = depth;

        Ok(())
    }

    /// Fold every open frame deeper than `depth` into its parent
    fn unwind_to(&mut self, depth: usize) {
        while self.current_depth > depth {
            self.pool
                .append_child_into(self.current_depth - 1, self.current_depth);
            self.current_depth -= 1;
        }
    }

    /// Close every open frame and return the complete function trace
    ///
    /// The engine is left at depth 0 with nothing buffered.
    pub fn finish(&mut self) -> Vec<CallRecord> {
        self.unwind_to(0);
        self.pool.drain_into(0, &mut self.committed);
        debug!(
            "Merged {} call records (max depth reached: {:?})",
            self.committed.len(),
            self.table.max_depth_reached()
        );
        std::mem::take(&mut self.committed)
    }

    /// Depth of the most recently accepted frame
    pub fn current_depth(&self) -> usize {
        self.current_depth
    }

    /// Configured depth bound
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Counter table, for stamping events with their call path
    pub fn table(&self) -> &DepthTable {
        &self.table
    }

    /// Records buffered at `depth` but not yet merged upward
    pub fn pending(&self, depth: usize) -> &[CallRecord] {
        self.pool.peek(depth)
    }

    /// True when no buffer deeper than the current frame holds records
    pub fn is_flushed_below_current(&self) -> bool {
        self.pool.is_empty_below(self.current_depth)
    }

    /// Forget everything from the previous transaction
    pub fn reset(&mut self) {
        self.pool.reset();
        self.table.reset();
        self.committed.clear();
        self.current_depth = 0;
    }
}
