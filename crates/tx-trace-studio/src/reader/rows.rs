//! Row parsers for the three text traces.
//!
//! Each parser checks the header row, then splits every following row on
//! commas. Tagged and untagged layouts are told apart by the header.

use crate::model::primitives::{decimal, decode_hex};
use crate::model::{Address, CallFrame, CallRecord, CallType, EventTag, H256};
use crate::utils::config::{
    EVENT_TRACE_HEADER, EVENT_TRACE_HEADER_UNTAGGED, FUNCTION_TRACE_HEADER, TRANSFER_TRACE_HEADER,
    TRANSFER_TRACE_HEADER_UNTAGGED,
};
use crate::utils::error::ReaderError;
use std::str::FromStr;

/// One row of the event trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub address: Address,
    pub topics: Vec<H256>,
    pub data: Vec<u8>,
    /// `None` for untagged traces
    pub tag: Option<EventTag>,
}

/// One row of the transfer trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRow {
    /// 32-byte topic for token transfers, 20-byte address for native ones
    pub from: String,
    pub to: String,
    pub token: Address,
    /// Lowercase hex without `0x`
    pub value: String,
    pub depth: usize,
    pub trace_index: u64,
    pub trace_path: Vec<u32>,
    /// `None` for untagged traces
    pub tag: Option<EventTag>,
}

/// Parse a function trace back into placed call records
///
/// An empty blob (function trace disabled) yields no rows.
pub fn parse_function_trace(text: &str) -> Result<Vec<CallRecord>, ReaderError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut rows = Vec::new();
    for (line, cols) in body(text, &[FUNCTION_TRACE_HEADER])?.1 {
        let cols = expect_columns(line, cols, 11)?;

        let mut frame = CallFrame::new(
            parse(line, "index", cols[0])?,
            parse_call_type(line, cols[1])?,
            parse(line, "depth", cols[2])?,
            parse(line, "from", cols[3])?,
            parse(line, "to", cols[4])?,
        );
        frame.value = decimal::parse(cols[5])
            .map_err(|e| malformed(line, format!("bad value: {}", e)))?;
        frame.gas = parse(line, "gas", cols[6])?;
        frame.input = parse_bytes(line, "input", cols[7])?;
        frame.output = parse_bytes(line, "output", cols[8])?;

        rows.push(CallRecord {
            frame,
            call_stack: parse_list(line, "callstack", cols[9])?,
            trace_path: parse_list(line, "tracepath", cols[10])?,
        });
    }
    Ok(rows)
}

/// Parse an event trace (tagged or untagged)
pub fn parse_event_trace(text: &str) -> Result<Vec<EventRow>, ReaderError> {
    let (header, lines) = body(text, &[EVENT_TRACE_HEADER, EVENT_TRACE_HEADER_UNTAGGED])?;
    let tagged = header == EVENT_TRACE_HEADER;

    let mut rows = Vec::new();
    for (line, cols) in lines {
        let cols = expect_columns(line, cols, if tagged { 5 } else { 3 })?;

        let topics = parse_list::<H256>(line, "topics", cols[1])?;
        rows.push(EventRow {
            address: parse(line, "address", cols[0])?,
            topics,
            data: parse_bytes(line, "data", cols[2])?,
            tag: if tagged {
                Some(parse_tag(line, cols[3], cols[4])?)
            } else {
                None
            },
        });
    }
    Ok(rows)
}

/// Parse a transfer trace (tagged or untagged)
pub fn parse_transfer_trace(text: &str) -> Result<Vec<TransferRow>, ReaderError> {
    let (header, lines) = body(text, &[TRANSFER_TRACE_HEADER, TRANSFER_TRACE_HEADER_UNTAGGED])?;
    let tagged = header == TRANSFER_TRACE_HEADER;

    let mut rows = Vec::new();
    for (line, cols) in lines {
        let cols = expect_columns(line, cols, if tagged { 8 } else { 7 })?;

        let value = cols[3].strip_prefix("0x").unwrap_or(cols[3]);
        rows.push(TransferRow {
            from: cols[0].to_string(),
            to: cols[1].to_string(),
            token: parse(line, "tokenAddr", cols[2])?,
            value: value.to_string(),
            depth: parse(line, "calldepth", cols[4])?,
            trace_index: parse(line, "traceindex", cols[5])?,
            trace_path: parse_list(line, "tracepath", cols[6])?,
            // Transfer rows only carry the standard column
            tag: if tagged {
                Some(parse_tag(line, cols[7], "Transfer")?)
            } else {
                None
            },
        });
    }
    Ok(rows)
}

type Lines<'a> = Vec<(usize, Vec<&'a str>)>;

/// Split off and check the header, returning it with the numbered body rows
fn body<'a>(text: &'a str, accepted: &[&'static str]) -> Result<(&'static str, Lines<'a>), ReaderError> {
    let mut lines = text.split('\n');
    let found = lines.next().unwrap_or("").trim_end_matches('\r');

    let header = accepted
        .iter()
        .copied()
        .find(|h| *h == found)
        .ok_or_else(|| ReaderError::UnexpectedHeader {
            expected: accepted.join(" | "),
            found: found.to_string(),
        })?;

    let rows: Lines<'a> = lines
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end_matches('\r')))
        .filter(|(_, l)| !l.is_empty())
        .map(|(i, l)| (i, l.split(',').collect()))
        .collect();

    Ok((header, rows))
}

fn expect_columns(line: usize, cols: Vec<&str>, expected: usize) -> Result<Vec<&str>, ReaderError> {
    if cols.len() != expected {
        return Err(malformed(
            line,
            format!("expected {} columns, found {}", expected, cols.len()),
        ));
    }
    Ok(cols)
}

fn malformed(line: usize, reason: impl Into<String>) -> ReaderError {
    ReaderError::MalformedRow {
        line,
        reason: reason.into(),
    }
}

fn parse<T>(line: usize, column: &str, raw: &str) -> Result<T, ReaderError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| malformed(line, format!("bad {} '{}': {}", column, raw, e)))
}

fn parse_call_type(line: usize, raw: &str) -> Result<CallType, ReaderError> {
    raw.parse()
        .map_err(|e: String| malformed(line, format!("bad calltype: {}", e)))
}

fn parse_bytes(line: usize, column: &str, raw: &str) -> Result<Vec<u8>, ReaderError> {
    decode_hex(raw).map_err(|e| malformed(line, format!("bad {}: {}", column, e)))
}

/// `[a b c]` into its elements
fn parse_list<T>(line: usize, column: &str, raw: &str) -> Result<Vec<T>, ReaderError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let inner = raw
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| malformed(line, format!("bad {} '{}': not a [..] list", column, raw)))?;

    inner
        .split_whitespace()
        .map(|item| parse(line, column, item))
        .collect()
}

fn parse_tag(line: usize, standard: &str, function: &str) -> Result<EventTag, ReaderError> {
    EventTag::from_columns(standard, function).ok_or_else(|| {
        malformed(
            line,
            format!("unknown classification '{}','{}'", standard, function),
        )
    })
}
