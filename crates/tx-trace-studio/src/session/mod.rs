//! Lifecycle of one transaction's trace.
//!
//! ```text
//!   new ──> Idle ──reset──> Active ──finalize──> Finalized
//!                             ^  accept_*            │
//!                             └───────reset──────────┘
//! ```
//!
//! A session is single-writer: the execution engine feeds it calls and logs
//! in the order they happen. Sessions share no mutable state, so independent
//! transactions can be traced on separate sessions concurrently.

pub mod recorder;

pub use recorder::Recorder;

use crate::aggregator::MergeEngine;
use crate::model::{Address, CallFrame, EventRecord, EventTag, FinalizedTrace, LogEvent, TransferRecord};
use crate::render::{TextRenderer, TraceRenderer};
use crate::utils::config::{OutputSchema, TraceConfig};
use crate::utils::error::TraceError;
use log::{debug, warn};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active,
    Finalized,
}

/// Aggregator state for one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceSession {
    state: SessionState,
    schema: OutputSchema,
    engine: MergeEngine,
    recorder: Recorder,

    /// Accepted calls and events so far; stamped onto events and transfers
    trace_index: u64,

    /// Set once anything was dropped for exceeding the depth bound
    incomplete: bool,
}

impl TraceSession {
    /// Create an idle session; call [`reset`](Self::reset) before feeding it
    pub fn new(config: &TraceConfig) -> Self {
        Self {
            state: SessionState::Idle,
            schema: config.output,
            engine: MergeEngine::new(config.session.max_depth),
            recorder: Recorder::new(),
            trace_index: 0,
            incomplete: false,
        }
    }

    /// Start a new transaction, discarding anything left from the previous one
    ///
    /// Only the depth levels actually used are cleared.
    pub fn reset(&mut self) {
        if let Some(depth) = self.engine.table().max_depth_reached() {
            debug!("Resetting trace session (levels 0..={} used)", depth);
        }
        self.engine.reset();
        self.recorder.reset();
        self.trace_index = 0;
        self.incomplete = false;
        self.state = SessionState::Active;
    }

    /// Accept one call-enter notification
    ///
    /// # Errors
    /// * `TraceError::SessionClosed` - session is not active
    /// * `TraceError::DepthExceeded` - frame dropped, trace marked incomplete;
    ///   the session keeps accepting frames within bounds
    pub fn accept_call(&mut self, frame: CallFrame) -> Result<(), TraceError> {
        self.ensure_active()?;

        match self.engine.accept(frame) {
            Ok(()) => {
                self.trace_index += 1;
                Ok(())
            }
            Err(e) => {
                self.mark_incomplete(&e);
                Err(e)
            }
        }
    }

    /// Accept one emitted log and return its classification
    ///
    /// # Errors
    /// * `TraceError::SessionClosed` - session is not active
    /// * `TraceError::DepthExceeded` - log dropped, trace marked incomplete
    pub fn accept_event(&mut self, log: LogEvent) -> Result<EventTag, TraceError> {
        self.ensure_active()?;
        self.check_depth(log.depth)?;

        let tag = self
            .recorder
            .record_event(log, self.engine.table(), self.trace_index);
        self.trace_index += 1;

        Ok(tag)
    }

    /// Record a plain value transfer made by the frame open at `depth`
    ///
    /// Value transfers are stamped with the current trace index but do not advance it.
    pub fn accept_value_transfer(
        &mut self,
        from: Address,
        to: Address,
        value: u128,
        depth: usize,
    ) -> Result<(), TraceError> {
        self.ensure_active()?;
        self.check_depth(depth)?;

        self.recorder.record_value_transfer(
            from,
            to,
            value,
            depth,
            self.engine.table(),
            self.trace_index,
        );
        Ok(())
    }

    /// Close every open frame and render the three traces with the configured schema
    pub fn finalize(&mut self) -> Result<FinalizedTrace, TraceError> {
        let renderer = TextRenderer::new(self.schema);
        self.finalize_with(&renderer)
    }

    /// Close every open frame and render the three traces with `renderer`
    ///
    /// # Errors
    /// * `TraceError::SessionClosed` - session is not active
    pub fn finalize_with(&mut self, renderer: &dyn TraceRenderer) -> Result<FinalizedTrace, TraceError> {
        self.ensure_active()?;

        let calls = self.engine.finish();
        self.state = SessionState::Finalized;

        debug!(
            "Finalized trace: {} calls, {} events, {} transfers{}",
            calls.len(),
            self.recorder.events().len(),
            self.recorder.transfers().len(),
            if self.incomplete { " (incomplete)" } else { "" }
        );

        Ok(FinalizedTrace {
            functrace: renderer.render_calls(&calls),
            eventtrace: renderer.render_events(self.recorder.events()),
            transfertrace: renderer.render_transfers(self.recorder.transfers()),
            complete: !self.incomplete,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn trace_index(&self) -> u64 {
        self.trace_index
    }

    /// Depth of the most recently accepted frame
    pub fn current_depth(&self) -> usize {
        self.engine.current_depth()
    }

    /// Deepest level used in this transaction, if any frame was accepted
    pub fn max_depth_reached(&self) -> Option<usize> {
        self.engine.table().max_depth_reached()
    }

    pub fn is_complete(&self) -> bool {
        !self.incomplete
    }

    pub fn events(&self) -> &[EventRecord] {
        self.recorder.events()
    }

    pub fn transfers(&self) -> &[TransferRecord] {
        self.recorder.transfers()
    }

    fn ensure_active(&self) -> Result<(), TraceError> {
        if self.state == SessionState::Active {
            Ok(())
        } else {
            Err(TraceError::SessionClosed)
        }
    }

    fn check_depth(&mut self, depth: usize) -> Result<(), TraceError> {
        let max = self.engine.max_depth();
        if depth < max {
            return Ok(());
        }

        let err = TraceError::DepthExceeded { depth, max };
        self.mark_incomplete(&err);
        Err(err)
    }

    fn mark_incomplete(&mut self, err: &TraceError) {
        if !self.incomplete {
            warn!("{}; trace for this transaction will be incomplete", err);
        }
        self.incomplete = true;
    }
}

impl Default for TraceSession {
    fn default() -> Self {
        Self::new(&TraceConfig::default())
    }
}
