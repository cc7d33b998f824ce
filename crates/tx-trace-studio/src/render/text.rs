//! Comma-delimited text rendering of the three traces.
//!
//! Row layouts (header first, no trailing newline):
//! - function: `index,calltype,depth,from,to,value,gas,input,output,callstack,tracepath`
//! - event:    `address,topics,data,type,function`
//! - transfer: `from,to,tokenAddr,value,calldepth,traceindex,tracepath,type`
//!
//! Sequences render as `[a b c]` so they never collide with the delimiter.

use super::TraceRenderer;
use crate::model::{CallRecord, EventRecord, TransferRecord, H256};
use crate::utils::config::{
    OutputSchema, EVENT_TRACE_HEADER, EVENT_TRACE_HEADER_UNTAGGED, FUNCTION_TRACE_HEADER,
    TRANSFER_TRACE_HEADER, TRANSFER_TRACE_HEADER_UNTAGGED,
};
use std::fmt::Write;

/// Renders traces as header + one comma-delimited row per record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextRenderer {
    schema: OutputSchema,
}

impl TextRenderer {
    pub fn new(schema: OutputSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> OutputSchema {
        self.schema
    }
}

impl TraceRenderer for TextRenderer {
    fn render_calls(&self, calls: &[CallRecord]) -> String {
        if !self.schema.function_trace {
            return String::new();
        }

        let mut out = String::from(FUNCTION_TRACE_HEADER);
        for record in calls {
            let frame = &record.frame;
            // Writing into a String cannot fail
            let _ = write!(
                out,
                "\n{},{},{},{},{},{},{},0x{},0x{},{},{}",
                frame.index,
                frame.call_type,
                frame.depth,
                frame.from,
                frame.to,
                frame.value,
                frame.gas,
                hex::encode(&frame.input),
                hex::encode(&frame.output),
                format_path(&record.call_stack),
                format_path(&record.trace_path),
            );
        }
        out
    }

    fn render_events(&self, events: &[EventRecord]) -> String {
        let header = if self.schema.classification_tags {
            EVENT_TRACE_HEADER
        } else {
            EVENT_TRACE_HEADER_UNTAGGED
        };

        let mut out = String::from(header);
        for event in events {
            let _ = write!(
                out,
                "\n{},{},0x{}",
                event.address,
                format_topics(&event.topics),
                hex::encode(&event.data),
            );
            if self.schema.classification_tags {
                let _ = write!(out, ",{},{}", event.tag.standard(), event.tag.function());
            }
        }
        out
    }

    fn render_transfers(&self, transfers: &[TransferRecord]) -> String {
        let header = if self.schema.classification_tags {
            TRANSFER_TRACE_HEADER
        } else {
            TRANSFER_TRACE_HEADER_UNTAGGED
        };

        let mut out = String::from(header);
        for transfer in transfers {
            let _ = write!(
                out,
                "\n{},{},{},0x{},{},{},{}",
                transfer.from,
                transfer.to,
                transfer.token,
                transfer.value,
                transfer.depth,
                transfer.trace_index,
                format_path(&transfer.trace_path),
            );
            if self.schema.classification_tags {
                let _ = write!(out, ",{}", transfer.tag.standard());
            }
        }
        out
    }
}

/// Render a call path as `[a b c]`
pub fn format_path(path: &[u32]) -> String {
    let parts: Vec<String> = path.iter().map(u32::to_string).collect();
    format!("[{}]", parts.join(" "))
}

/// Render topics as `[0x.. 0x..]`
pub fn format_topics(topics: &[H256]) -> String {
    let parts: Vec<String> = topics.iter().map(H256::to_string).collect();
    format!("[{}]", parts.join(" "))
}
