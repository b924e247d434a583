//! Callback dispatch for streaming query responses.
//!
//! QueryHandler is the consumer-facing surface of a streaming request: one
//! implementation receives every decoded event plus exactly one terminal
//! callback per request. RunningAnswer owns the per-request accumulation
//! that turns answer snapshots into the final completion payload.

use crate::error::AugurError;
use crate::sse::{AnswerMetadata, StreamEvent, ThreadInfo};

/// Callbacks fired while a streaming query runs.
///
/// Every method has a no-op default, so implementors only override what
/// they render. Per request, `on_complete` and `on_error` are mutually
/// exclusive and fire exactly once; `on_chunk` fires zero or more times
/// before the terminal callback.
pub trait QueryHandler: Send {
    /// Thread correlation info arrived.
    fn on_thread_id(&mut self, _info: &ThreadInfo) {}

    /// The backend routed the question to a pipeline.
    fn on_route(&mut self, _route: &str, _node: &str) {}

    /// A new answer snapshot arrived. `text` replaces any previous snapshot.
    fn on_chunk(&mut self, _text: &str) {}

    /// A progress signal arrived from a backend node.
    fn on_status(&mut self, _key: &str, _value: f64, _node: &str) {}

    /// The stream ended cleanly. `answer` is the last snapshot, empty when
    /// the backend produced none.
    fn on_complete(&mut self, _answer: &str, _metadata: &AnswerMetadata) {}

    /// The request failed at the transport level.
    fn on_error(&mut self, _error: &AugurError) {}
}

/// Final result of a completed streaming query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    /// Last answer snapshot seen on the stream
    pub answer: String,
    /// Metadata merged across answer events
    pub metadata: AnswerMetadata,
}

/// Per-request accumulator for answer text and metadata.
#[derive(Debug, Default)]
pub struct RunningAnswer {
    last_text: String,
    metadata: AnswerMetadata,
}

impl RunningAnswer {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatch one event to the handler, folding answer state in.
    ///
    /// Answer text is last-write-wins: each non-empty snapshot replaces the
    /// previous one. Metadata merges per key, so a later answer event
    /// without `chart_type` leaves an earlier chart type standing.
    pub fn apply(&mut self, event: &StreamEvent, handler: &mut dyn QueryHandler) {
        match event {
            StreamEvent::ThreadId(info) => handler.on_thread_id(info),
            StreamEvent::Route { route, node } => handler.on_route(route, node),
            StreamEvent::Status { key, value, node } => handler.on_status(key, *value, node),
            StreamEvent::Answer {
                text,
                chart_type,
                suggestions,
                ..
            } => {
                if !text.is_empty() {
                    self.last_text = text.clone();
                    handler.on_chunk(text);
                }
                if let Some(chart_type) = chart_type {
                    self.metadata.chart_type = Some(chart_type.clone());
                }
                if let Some(suggestions) = suggestions {
                    self.metadata.suggestions = Some(suggestions.clone());
                }
            }
            StreamEvent::Malformed => {}
        }
    }

    /// Fire `on_complete` and hand the accumulated state back.
    pub fn finish(self, handler: &mut dyn QueryHandler) -> QueryOutcome {
        handler.on_complete(&self.last_text, &self.metadata);
        QueryOutcome {
            answer: self.last_text,
            metadata: self.metadata,
        }
    }
}
