//! SSE (Server-Sent Events) stream decoding
//!
//! Decodes the `query_sse` response format from the Augur backend. The wire
//! format is line-oriented:
//! - `event: <name>` - names the record that follows
//! - `data: <json>` - record payload; completes the record
//! - `data: [DONE]` / empty payload - no-op sentinels
//! - anything else - ignored
//!
//! # Module structure
//! - `events` - Typed event definitions (StreamEvent, ThreadInfo, AnswerMetadata)
//! - `framer` - Byte-chunk to line framing (LineFramer)
//! - `parser` - Record grammar (SseParser, parse_line)
//! - `decode` - Payload field extraction (internal)

mod decode;
mod events;
mod framer;
mod parser;

// Re-export public types
pub use events::{AnswerMetadata, StreamEvent, ThreadInfo};
pub use framer::LineFramer;
pub use parser::{parse_line, SseLine, SseParser};
