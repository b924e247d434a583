//! Typed events from the Augur query stream
//!
//! Contains the StreamEvent enum with the event variants the backend emits
//! over `query_sse`, plus the payload structs shared with the rest of the
//! crate.

/// Thread correlation info carried by a `thread_id` event.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadInfo {
    /// Backend-assigned conversation thread ID
    pub thread_id: String,
    /// Backend-issued memory key, when one is included
    pub memory_key: Option<String>,
}

/// Presentation metadata merged across `answer` events.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnswerMetadata {
    /// Suggested chart type for rendering the answer (e.g. "bar")
    pub chart_type: Option<String>,
    /// Follow-up question suggestions
    pub suggestions: Option<Vec<String>>,
}

/// Typed events decoded from the query stream
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Thread correlation info for this conversation
    ThreadId(ThreadInfo),
    /// Routing decision made by the backend pipeline
    Route { route: String, node: String },
    /// Answer snapshot - each one replaces the previous text entirely
    Answer {
        text: String,
        node: String,
        chart_type: Option<String>,
        suggestions: Option<Vec<String>>,
    },
    /// Progress signal from a backend node
    Status { key: String, value: f64, node: String },
    /// Record that failed to decode - dropped before reaching consumers
    Malformed,
}

impl StreamEvent {
    /// Returns the wire event name as a string for debugging purposes.
    pub fn event_kind(&self) -> &'static str {
        match self {
            StreamEvent::ThreadId(_) => "thread_id",
            StreamEvent::Route { .. } => "route",
            StreamEvent::Answer { .. } => "answer",
            StreamEvent::Status { .. } => "status",
            StreamEvent::Malformed => "malformed",
        }
    }
}
