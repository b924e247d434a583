//! Payload field extraction for stream records
//!
//! Turns the JSON object of a `data:` payload into a typed StreamEvent. The
//! backend is loose about field types, so extraction goes through
//! serde_json::Value lookups instead of typed structs: a missing or
//! wrong-typed field falls back to its default rather than failing the
//! record. Only a `thread_id` event without a usable thread ID is rejected
//! outright.

use serde_json::{Map, Value};

use crate::sse::events::{StreamEvent, ThreadInfo};

/// Decode one record into a typed event.
///
/// `event` is the name set by the preceding `event:` line, if any. Unknown
/// or missing names decode to `StreamEvent::Malformed` so the stream layer
/// can drop them.
pub(super) fn decode_record(event: Option<&str>, fields: &Map<String, Value>) -> StreamEvent {
    match event {
        Some("thread_id") => decode_thread_id(fields),
        Some("route") => decode_route(fields),
        Some("answer") => decode_answer(fields),
        Some("status") => decode_status(fields),
        _ => StreamEvent::Malformed,
    }
}

fn decode_thread_id(fields: &Map<String, Value>) -> StreamEvent {
    // thread_id is the one field the protocol actually requires
    let thread_id = match fields.get("thread_id").and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => return StreamEvent::Malformed,
    };
    let memory_key = fields
        .get("memory_key")
        .and_then(Value::as_str)
        .map(str::to_string);

    StreamEvent::ThreadId(ThreadInfo {
        thread_id,
        memory_key,
    })
}

fn decode_route(fields: &Map<String, Value>) -> StreamEvent {
    StreamEvent::Route {
        route: string_field(fields, "route"),
        node: string_field(fields, "node"),
    }
}

fn decode_answer(fields: &Map<String, Value>) -> StreamEvent {
    let chart_type = fields
        .get("chart_type")
        .and_then(Value::as_str)
        .map(str::to_string);
    // Non-string entries are filtered out; an empty array stays an array
    let suggestions = fields
        .get("suggestions")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        });

    StreamEvent::Answer {
        text: string_field(fields, "answer"),
        node: string_field(fields, "node"),
        chart_type,
        suggestions,
    }
}

fn decode_status(fields: &Map<String, Value>) -> StreamEvent {
    StreamEvent::Status {
        key: string_field(fields, "key"),
        value: fields.get("value").and_then(Value::as_f64).unwrap_or(0.0),
        node: string_field(fields, "node"),
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
