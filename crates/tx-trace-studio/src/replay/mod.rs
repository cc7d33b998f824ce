//! Replays recorded execution streams through a [`Tracer`].
//!
//! This stands in for the execution engine: every recorded step becomes the
//! matching observer callback, in order.

pub mod recording;

pub use recording::{load_recording, RecordedTransaction, Recording, Step};

use crate::model::EventTag;
use crate::store::TraceStore;
use crate::tracer::Tracer;
use crate::utils::error::TraceError;
use log::{info, warn};

/// Outcome of one replayed transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    pub tx_hash: String,
    pub calls: usize,
    pub events: usize,
    pub transfers: usize,
    /// Steps rejected for exceeding the depth bound
    pub dropped: usize,
    pub complete: bool,
    pub stored: bool,
}

/// Totals over a whole replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub outcomes: Vec<TxOutcome>,
    pub erc20_transfers: usize,
    pub erc721_transfers: usize,
    pub approvals: usize,
    pub native_transfers: usize,
    pub unclassified: usize,
}

impl ReplaySummary {
    pub fn transactions(&self) -> usize {
        self.outcomes.len()
    }

    pub fn stored(&self) -> usize {
        self.outcomes.iter().filter(|o| o.stored).count()
    }

    pub fn incomplete(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.complete).count()
    }

    fn count_tag(&mut self, tag: EventTag) {
        match tag {
            EventTag::Erc20Transfer => self.erc20_transfers += 1,
            EventTag::Erc721Transfer => self.erc721_transfers += 1,
            EventTag::Erc20Approval | EventTag::Erc721Approval | EventTag::Erc721ApprovalForAll => {
                self.approvals += 1
            }
            EventTag::Native => self.native_transfers += 1,
            EventTag::Unclassified => self.unclassified += 1,
        }
    }
}

/// Feed every transaction of a recording through `tracer`
///
/// Depth-bound rejections and store failures are logged and counted; the
/// replay always runs to the end.
pub fn replay_recording<S: TraceStore>(recording: &Recording, tracer: &mut Tracer<S>) -> ReplaySummary {
    let mut summary = ReplaySummary::default();

    for tx in &recording.transactions {
        let outcome = replay_transaction(tx, tracer, &mut summary);
        summary.outcomes.push(outcome);
    }

    info!(
        "Replayed {} transactions ({} stored, {} incomplete)",
        summary.transactions(),
        summary.stored(),
        summary.incomplete()
    );

    summary
}

fn replay_transaction<S: TraceStore>(
    tx: &RecordedTransaction,
    tracer: &mut Tracer<S>,
    summary: &mut ReplaySummary,
) -> TxOutcome {
    let tx_hash = tx.metadata.tx_hash.to_string();
    let mut outcome = TxOutcome {
        tx_hash: tx_hash.clone(),
        calls: 0,
        events: 0,
        transfers: 0,
        dropped: 0,
        complete: true,
        stored: false,
    };

    tracer.on_tx_start();

    for step in &tx.steps {
        let result = match step {
            Step::Call(frame) => tracer.on_call(frame.clone()).map(|()| outcome.calls += 1),
            Step::Log(log) => tracer.on_log(log.clone()).map(|tag| {
                outcome.events += 1;
                summary.count_tag(tag);
            }),
            Step::ValueTransfer {
                from,
                to,
                value,
                depth,
            } => tracer
                .on_value_transfer(*from, *to, *value, *depth)
                .map(|()| summary.count_tag(EventTag::Native)),
        };

        if let Err(e) = result {
            match e {
                TraceError::DepthExceeded { .. } => outcome.dropped += 1,
                other => warn!("Step rejected in {}: {}", tx_hash, other),
            }
        }
    }

    outcome.transfers = tracer.session().transfers().len();

    match tracer.on_tx_end(tx.metadata.clone()) {
        Ok(record) => {
            outcome.complete = record.complete;
            outcome.stored = true;
        }
        Err(TraceError::StoreWriteFailed { .. }) => {
            // Already logged by the tracer
            outcome.complete = tracer.session().is_complete();
        }
        Err(e) => {
            warn!("Could not finalize {}: {}", tx_hash, e);
            outcome.complete = false;
        }
    }

    outcome
}
