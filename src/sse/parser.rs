//! Record grammar for the query stream
//!
//! Contains the stateful SseParser that pairs `event:` lines with the
//! `data:` payload that follows, plus the line classifier.

use serde_json::Value;

use crate::sse::decode::decode_record;
use crate::sse::events::StreamEvent;

/// Sentinel payload the backend sends for no-op records.
const DONE_SENTINEL: &str = "[DONE]";

/// Represents a classified stream line
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Event name declaration (e.g. "event: answer")
    Event(String),
    /// Data payload (e.g. "data: {\"answer\": \"hi\"}")
    Data(String),
    /// Blank line
    Empty,
    /// Comment line or unrecognized format - ignored
    Comment(String),
}

/// Classify a single line of the stream.
///
/// The line is trimmed before matching, so records padded by proxies still
/// classify correctly.
pub fn parse_line(line: &str) -> SseLine {
    let line = line.trim();

    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    // Unknown line format - treat as comment
    SseLine::Comment(line.to_string())
}

/// Stateful parser that pairs event names with data payloads
///
/// The Augur protocol diverges from standard SSE dispatch: a record is
/// complete at its `data:` line rather than at the following blank line,
/// and the pending event name is consumed by exactly one payload.
#[derive(Debug, Default)]
pub struct SseParser {
    /// Event name waiting for its data line
    pending_event: Option<String>,
}

impl SseParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a line to the parser, potentially returning a decoded event.
    ///
    /// Returns `None` for lines that carry no record: event-name lines,
    /// blanks, comments, and the `[DONE]`/empty-payload sentinels. A `data:`
    /// line always consumes the pending event name, sentinel or not, so a
    /// stale name can never attach to a later payload.
    pub fn feed_line(&mut self, line: &str) -> Option<StreamEvent> {
        match parse_line(line) {
            SseLine::Event(name) => {
                self.pending_event = Some(name);
                None
            }
            SseLine::Data(payload) => {
                let event = self.pending_event.take();

                if payload.is_empty() || payload == DONE_SENTINEL {
                    return None;
                }

                match serde_json::from_str::<Value>(&payload) {
                    Ok(Value::Object(fields)) => Some(decode_record(event.as_deref(), &fields)),
                    // A record payload has to be a JSON object
                    Ok(_) | Err(_) => Some(StreamEvent::Malformed),
                }
            }
            SseLine::Empty | SseLine::Comment(_) => None,
        }
    }

    /// Reset the parser state.
    pub fn reset(&mut self) {
        self.pending_event = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sse::events::ThreadInfo;

    // Tests for parse_line

    #[test]
    fn test_parse_empty_line() {
        assert_eq!(parse_line(""), SseLine::Empty);
        assert_eq!(parse_line("   "), SseLine::Empty);
    }

    #[test]
    fn test_parse_comment_line() {
        assert_eq!(
            parse_line(": keep-alive"),
            SseLine::Comment("keep-alive".to_string())
        );
        assert_eq!(parse_line(":no space"), SseLine::Comment("no space".to_string()));
    }

    #[test]
    fn test_parse_event_line() {
        assert_eq!(
            parse_line("event: answer"),
            SseLine::Event("answer".to_string())
        );
        assert_eq!(
            parse_line("event:answer"),
            SseLine::Event("answer".to_string())
        );
        assert_eq!(
            parse_line("event:   thread_id  "),
            SseLine::Event("thread_id".to_string())
        );
    }

    #[test]
    fn test_parse_data_line() {
        assert_eq!(
            parse_line("data: {\"answer\": \"hi\"}"),
            SseLine::Data("{\"answer\": \"hi\"}".to_string())
        );
        assert_eq!(parse_line("data:{\"x\":1}"), SseLine::Data("{\"x\":1}".to_string()));
    }

    #[test]
    fn test_parse_line_trims_padding() {
        assert_eq!(
            parse_line("  event: answer  "),
            SseLine::Event("answer".to_string())
        );
    }

    #[test]
    fn test_parse_unknown_line() {
        // Unknown lines are treated as comments
        assert_eq!(
            parse_line("retry: 3000"),
            SseLine::Comment("retry: 3000".to_string())
        );
    }

    // Tests for SseParser

    #[test]
    fn test_parser_event_then_data() {
        let mut parser = SseParser::new();

        assert!(parser.feed_line("event: answer").is_none());
        let event = parser.feed_line(r#"data: {"answer": "Hello"}"#);

        assert_eq!(
            event,
            Some(StreamEvent::Answer {
                text: "Hello".to_string(),
                node: "".to_string(),
                chart_type: None,
                suggestions: None,
            })
        );
    }

    #[test]
    fn test_parser_data_without_event_is_malformed() {
        let mut parser = SseParser::new();
        let event = parser.feed_line(r#"data: {"answer": "orphan"}"#);
        assert_eq!(event, Some(StreamEvent::Malformed));
    }

    #[test]
    fn test_parser_done_sentinel_ignored() {
        let mut parser = SseParser::new();
        parser.feed_line("event: answer");
        assert!(parser.feed_line("data: [DONE]").is_none());
    }

    #[test]
    fn test_parser_empty_payload_ignored() {
        let mut parser = SseParser::new();
        parser.feed_line("event: answer");
        assert!(parser.feed_line("data:").is_none());
        assert!(parser.feed_line("data:   ").is_none());
    }

    #[test]
    fn test_parser_sentinel_still_consumes_event_name() {
        let mut parser = SseParser::new();

        parser.feed_line("event: answer");
        assert!(parser.feed_line("data: [DONE]").is_none());

        // The name was consumed by the sentinel, so this payload is orphaned
        let event = parser.feed_line(r#"data: {"answer": "late"}"#);
        assert_eq!(event, Some(StreamEvent::Malformed));
    }

    #[test]
    fn test_parser_event_name_consumed_once() {
        let mut parser = SseParser::new();

        parser.feed_line("event: answer");
        let first = parser.feed_line(r#"data: {"answer": "one"}"#);
        assert!(matches!(first, Some(StreamEvent::Answer { .. })));

        let second = parser.feed_line(r#"data: {"answer": "two"}"#);
        assert_eq!(second, Some(StreamEvent::Malformed));
    }

    #[test]
    fn test_parser_latest_event_name_wins() {
        let mut parser = SseParser::new();

        parser.feed_line("event: route");
        parser.feed_line("event: answer");
        let event = parser.feed_line(r#"data: {"answer": "hi"}"#);

        assert!(matches!(event, Some(StreamEvent::Answer { .. })));
    }

    #[test]
    fn test_parser_blank_lines_leave_pending_name() {
        let mut parser = SseParser::new();

        parser.feed_line("event: answer");
        assert!(parser.feed_line("").is_none());
        let event = parser.feed_line(r#"data: {"answer": "hi"}"#);

        assert!(matches!(event, Some(StreamEvent::Answer { .. })));
    }

    #[test]
    fn test_parser_comments_ignored() {
        let mut parser = SseParser::new();

        assert!(parser.feed_line(": keep-alive").is_none());
        parser.feed_line("event: answer");
        assert!(parser.feed_line(": another comment").is_none());
        let event = parser.feed_line(r#"data: {"answer": "hi"}"#);

        assert!(matches!(event, Some(StreamEvent::Answer { .. })));
    }

    #[test]
    fn test_parser_invalid_json_is_malformed() {
        let mut parser = SseParser::new();
        parser.feed_line("event: answer");
        let event = parser.feed_line("data: not json");
        assert_eq!(event, Some(StreamEvent::Malformed));
    }

    #[test]
    fn test_parser_non_object_payload_is_malformed() {
        let mut parser = SseParser::new();

        parser.feed_line("event: answer");
        assert_eq!(parser.feed_line("data: 42"), Some(StreamEvent::Malformed));

        parser.feed_line("event: answer");
        assert_eq!(
            parser.feed_line(r#"data: "just a string""#),
            Some(StreamEvent::Malformed)
        );

        parser.feed_line("event: answer");
        assert_eq!(parser.feed_line("data: [1, 2]"), Some(StreamEvent::Malformed));
    }

    #[test]
    fn test_parser_unknown_event_name_is_malformed() {
        let mut parser = SseParser::new();
        parser.feed_line("event: telemetry");
        let event = parser.feed_line(r#"data: {"key": "x"}"#);
        assert_eq!(event, Some(StreamEvent::Malformed));
    }

    #[test]
    fn test_parser_reset() {
        let mut parser = SseParser::new();

        parser.feed_line("event: answer");
        parser.reset();

        // Pending name is gone, so the payload is orphaned
        let event = parser.feed_line(r#"data: {"answer": "hi"}"#);
        assert_eq!(event, Some(StreamEvent::Malformed));
    }

    // Integration test simulating a realistic stream

    #[test]
    fn test_parser_realistic_stream() {
        let mut parser = SseParser::new();
        let mut events = Vec::new();

        let stream_lines = [
            "event: thread_id",
            r#"data: {"thread_id": "t-abc", "memory_key": "mk-1"}"#,
            "event: route",
            r#"data: {"route": "analytics", "node": "router"}"#,
            "event: answer",
            r#"data: {"answer": "Revenue was", "node": "writer"}"#,
            "event: answer",
            r#"data: {"answer": "Revenue was $4.2M", "node": "writer"}"#,
            "event: status",
            r#"data: {"key": "tokens", "value": 128, "node": "writer"}"#,
            "data: [DONE]",
        ];

        for line in stream_lines {
            if let Some(event) = parser.feed_line(line) {
                events.push(event);
            }
        }

        assert_eq!(events.len(), 5);
        assert_eq!(
            events[0],
            StreamEvent::ThreadId(ThreadInfo {
                thread_id: "t-abc".to_string(),
                memory_key: Some("mk-1".to_string()),
            })
        );
        assert!(matches!(events[1], StreamEvent::Route { .. }));
        assert!(matches!(events[2], StreamEvent::Answer { .. }));
        assert!(matches!(events[3], StreamEvent::Answer { .. }));
        assert!(matches!(events[4], StreamEvent::Status { .. }));
    }

    #[test]
    fn test_fresh_parser_yields_identical_events() {
        let lines = [
            "event: answer",
            r#"data: {"answer": "one"}"#,
            "event: status",
            r#"data: {"key": "k", "value": 1}"#,
        ];

        let decode_all = || {
            let mut parser = SseParser::new();
            lines
                .iter()
                .filter_map(|line| parser.feed_line(line))
                .collect::<Vec<_>>()
        };

        assert_eq!(decode_all(), decode_all());
    }
}
