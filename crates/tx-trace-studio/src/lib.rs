//! Tx Trace Studio library
//!
//! Streaming aggregation of EVM execution callbacks into three text
//! traces per transaction: nested function calls, emitted events and
//! normalized token transfers.
//!
//! The execution engine drives a [`tracer::Tracer`] (or a bare
//! [`session::TraceSession`]) with call-enter and log notifications in
//! the order they happen. At transaction end the session is finalized
//! and the record is handed to a [`store::TraceStore`].

pub mod aggregator;
pub mod classifier;
pub mod commands;
pub mod model;
pub mod reader;
pub mod render;
pub mod replay;
pub mod session;
pub mod store;
pub mod tracer;
pub mod utils;
