//! Augur API client for backend communication.
//!
//! This module provides the HTTP client for the Augur backend's streaming
//! query endpoint, decoding the Server-Sent-Events response body into typed
//! events and driving the callback layer on top of it.

use crate::config::resolve_base_url;
use crate::error::AugurError;
use crate::handler::{QueryHandler, QueryOutcome, RunningAnswer};
use crate::models::QueryRequest;
use crate::sse::{LineFramer, SseParser, StreamEvent};
use bytes::Bytes;
use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use reqwest::Client;
use std::collections::VecDeque;
use std::pin::Pin;

/// Stream of decoded events from a `query_sse` response.
///
/// Ends (`None`) when the backend closes the connection; that termination is
/// the completion marker. Dropping the stream aborts the transfer.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, AugurError>> + Send>>;

/// Client for the Augur backend streaming API.
///
/// Holds the resolved base URL and a reusable HTTP client. Cheap to share
/// by reference; concurrent calls on one client run independently.
pub struct AugurClient {
    /// Base URL for the Augur API, without a trailing slash
    base_url: String,
    /// Reusable HTTP client
    client: Client,
}

impl AugurClient {
    /// Create a new AugurClient with the environment-resolved base URL.
    pub fn new() -> Self {
        Self::with_base_url(resolve_base_url())
    }

    /// Create a new AugurClient with a custom base URL.
    ///
    /// A trailing slash is trimmed so endpoint paths join cleanly.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: crate::config::normalize_base_url(&base_url),
            client: Client::new(),
        }
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stream a query response from the Augur API.
    ///
    /// Sends a POST request to `/query_sse` and returns a stream of decoded
    /// events. Records that fail to decode are dropped with a warning; a
    /// mid-stream transport failure yields one `Err` item and then the
    /// stream terminates.
    ///
    /// # Arguments
    /// * `request` - The query request with the question and correlation state
    ///
    /// # Returns
    /// A stream of `Result<StreamEvent, AugurError>` items
    pub async fn query_stream(&self, request: &QueryRequest) -> Result<EventStream, AugurError> {
        let url = format!("{}/query_sse", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AugurError::Status { status, message });
        }

        // Get the byte stream from the response
        let bytes_stream = response.bytes_stream();

        // Frame, parse, and decode the byte stream. One chunk can complete
        // several records, so decoded events queue up and drain one per poll.
        let event_stream = stream::unfold(
            (
                bytes_stream,
                LineFramer::new(),
                SseParser::new(),
                VecDeque::new(),
                false,
            ),
            |(mut bytes, mut framer, mut parser, mut ready, mut done)| async move {
                loop {
                    // Drain events decoded from earlier chunks first
                    if let Some(event) = ready.pop_front() {
                        return Some((Ok(event), (bytes, framer, parser, ready, done)));
                    }
                    if done {
                        return None;
                    }

                    match bytes.next().await {
                        Some(Ok(chunk)) => {
                            collect_chunk(&mut framer, &mut parser, &mut ready, &chunk);
                        }
                        Some(Err(e)) => {
                            // Surface the transport failure once, then end
                            done = true;
                            return Some((
                                Err(AugurError::Http(e)),
                                (bytes, framer, parser, ready, done),
                            ));
                        }
                        None => {
                            // Stream ended - flush any trailing partial line
                            done = true;
                            if let Some(line) = framer.finish() {
                                collect_line(&mut parser, &mut ready, &line);
                            }
                        }
                    }
                }
            },
        );

        Ok(Box::pin(event_stream))
    }

    /// Run a streaming query and drive the handler's callbacks.
    ///
    /// Layers the callback contract over [`query_stream`]: every decoded
    /// event dispatches in order, then exactly one of `on_complete` or
    /// `on_error` fires. The returned outcome carries the accumulated
    /// answer and metadata from a clean completion.
    ///
    /// [`query_stream`]: AugurClient::query_stream
    ///
    /// # Arguments
    /// * `request` - The query request with the question and correlation state
    /// * `handler` - Callback receiver for this request
    pub async fn ask(
        &self,
        request: &QueryRequest,
        handler: &mut dyn QueryHandler,
    ) -> Result<QueryOutcome, AugurError> {
        let mut stream = match self.query_stream(request).await {
            Ok(stream) => stream,
            Err(e) => {
                handler.on_error(&e);
                return Err(e);
            }
        };

        let mut running = RunningAnswer::new();
        while let Some(item) = stream.next().await {
            match item {
                Ok(event) => running.apply(&event, handler),
                Err(e) => {
                    handler.on_error(&e);
                    return Err(e);
                }
            }
        }

        Ok(running.finish(handler))
    }
}

impl Default for AugurClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Feed one network chunk through the framer and parser, queueing every
/// event it completes.
fn collect_chunk(
    framer: &mut LineFramer,
    parser: &mut SseParser,
    ready: &mut VecDeque<StreamEvent>,
    chunk: &Bytes,
) {
    for line in framer.push(chunk) {
        collect_line(parser, ready, &line);
    }
}

/// Feed one complete line to the parser. Malformed records are dropped here
/// so consumers never see them.
fn collect_line(parser: &mut SseParser, ready: &mut VecDeque<StreamEvent>, line: &str) {
    match parser.feed_line(line) {
        Some(StreamEvent::Malformed) => {
            tracing::warn!("Dropping malformed stream record: {}", line);
        }
        Some(event) => ready.push_back(event),
        None => {}
    }
}
