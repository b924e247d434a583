//! Conversation sessions over the Augur streaming API.
//!
//! A [`ChatSession`] owns the correlation state for one conversation: the
//! thread id sent with every request and the memory key the backend hands
//! back. Each turn folds the backend's `thread_id` events into that state
//! so follow-up questions land on the same conversation server-side.

use crate::client::AugurClient;
use crate::error::AugurError;
use crate::handler::{QueryHandler, QueryOutcome};
use crate::models::QueryRequest;
use crate::sse::{AnswerMetadata, ThreadInfo};
use uuid::Uuid;

/// Correlation identifiers for one conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationState {
    /// Thread id sent with every request on this session
    pub thread_id: String,
    /// Memory key issued by the backend, once it has issued one
    pub memory_key: Option<String>,
}

impl CorrelationState {
    fn new(thread_id: String) -> Self {
        Self {
            thread_id,
            memory_key: None,
        }
    }
}

/// A multi-turn conversation bound to one Augur client.
///
/// The session seeds a local thread id so the first request is already
/// correlated; when the backend issues its own id (or a memory key) the
/// session adopts it for every later turn. Adoption happens even when the
/// stream fails afterwards, so a retry stays on the conversation the
/// backend already opened.
pub struct ChatSession {
    client: AugurClient,
    user_id: String,
    state: CorrelationState,
}

impl ChatSession {
    /// Create a session with a freshly generated thread id.
    ///
    /// # Arguments
    /// * `client` - Client the session sends its requests through
    /// * `user_id` - User identifier sent with every request
    pub fn new(client: AugurClient, user_id: String) -> Self {
        Self {
            client,
            user_id,
            state: CorrelationState::new(Uuid::new_v4().to_string()),
        }
    }

    /// Resume a known conversation instead of generating a thread id.
    pub fn with_thread_id(mut self, thread_id: String) -> Self {
        self.state = CorrelationState::new(thread_id);
        self
    }

    /// The thread id the next request will carry.
    pub fn thread_id(&self) -> &str {
        &self.state.thread_id
    }

    /// The backend-issued memory key, if one has been received.
    pub fn memory_key(&self) -> Option<&str> {
        self.state.memory_key.as_deref()
    }

    /// The full correlation state for this session.
    pub fn correlation(&self) -> &CorrelationState {
        &self.state
    }

    /// Ask one question on this session and drive the handler's callbacks.
    ///
    /// Sends the question with the session's current correlation state and
    /// folds any `thread_id` events from the response back into it before
    /// returning.
    pub async fn ask(
        &mut self,
        question: &str,
        handler: &mut dyn QueryHandler,
    ) -> Result<QueryOutcome, AugurError> {
        let request = self.build_request(question);
        let mut tap = SessionTap::new(handler);
        let result = self.client.ask(&request, &mut tap).await;
        // Adopt whatever the backend issued, error or not
        let (thread_id, memory_key) = (tap.thread_id, tap.memory_key);
        self.absorb(thread_id, memory_key);
        result
    }

    /// Start a new conversation with a fresh thread id.
    ///
    /// Clears the memory key; the backend will open a new thread on the
    /// next request.
    pub fn reset(&mut self) {
        self.state = CorrelationState::new(Uuid::new_v4().to_string());
    }

    /// Start a new conversation on a specific thread id.
    pub fn reset_with_thread_id(&mut self, thread_id: String) {
        self.state = CorrelationState::new(thread_id);
    }

    fn build_request(&self, question: &str) -> QueryRequest {
        let request = QueryRequest::new(
            self.user_id.clone(),
            question.to_string(),
            self.state.thread_id.clone(),
        );
        match &self.state.memory_key {
            Some(key) => request.with_memory_key(key.clone()),
            None => request,
        }
    }

    fn absorb(&mut self, thread_id: Option<String>, memory_key: Option<String>) {
        if let Some(thread_id) = thread_id {
            self.state.thread_id = thread_id;
        }
        // A later thread_id event without a key must not erase an earlier one
        if let Some(memory_key) = memory_key {
            self.state.memory_key = Some(memory_key);
        }
    }
}

/// Handler wrapper that records correlation updates while forwarding every
/// callback to the caller's handler.
struct SessionTap<'a> {
    inner: &'a mut dyn QueryHandler,
    thread_id: Option<String>,
    memory_key: Option<String>,
}

impl<'a> SessionTap<'a> {
    fn new(inner: &'a mut dyn QueryHandler) -> Self {
        Self {
            inner,
            thread_id: None,
            memory_key: None,
        }
    }
}

impl QueryHandler for SessionTap<'_> {
    fn on_thread_id(&mut self, info: &ThreadInfo) {
        self.thread_id = Some(info.thread_id.clone());
        if let Some(key) = &info.memory_key {
            self.memory_key = Some(key.clone());
        }
        self.inner.on_thread_id(info);
    }

    fn on_route(&mut self, route: &str, node: &str) {
        self.inner.on_route(route, node);
    }

    fn on_chunk(&mut self, text: &str) {
        self.inner.on_chunk(text);
    }

    fn on_status(&mut self, key: &str, value: f64, node: &str) {
        self.inner.on_status(key, value, node);
    }

    fn on_complete(&mut self, answer: &str, metadata: &AnswerMetadata) {
        self.inner.on_complete(answer, metadata);
    }

    fn on_error(&mut self, error: &AugurError) {
        self.inner.on_error(error);
    }
}
