//! Request types for the Augur streaming API.

use serde::{Deserialize, Serialize};

/// Request body for the `query_sse` streaming endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryRequest {
    /// End user the question belongs to
    pub user_id: String,
    /// Natural-language question to answer
    pub question: String,
    /// Conversation thread this turn belongs to
    pub thread_id: String,
    /// Backend-issued memory key - omitted until the backend assigns one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_key: Option<String>,
}

impl QueryRequest {
    /// Create a new QueryRequest without a memory key.
    pub fn new(user_id: String, question: String, thread_id: String) -> Self {
        Self {
            user_id,
            question,
            thread_id,
            memory_key: None,
        }
    }

    /// Set the memory key for this request (builder pattern)
    pub fn with_memory_key(mut self, memory_key: String) -> Self {
        self.memory_key = Some(memory_key);
        self
    }
}
