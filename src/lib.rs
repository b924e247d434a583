//! Streaming client for the Augur analytics assistant backend.
//!
//! Augur answers questions over Server-Sent Events: the backend streams
//! typed records (`thread_id`, `route`, `answer`, `status`) and this crate
//! decodes them into callbacks on a [`QueryHandler`]. Sessions keep the
//! thread id and memory key in sync across turns so follow-up questions
//! reach the same conversation.
//!
//! ```ignore
//! use augur_client::{AugurClient, ChatSession, QueryHandler};
//!
//! struct Printer;
//!
//! impl QueryHandler for Printer {
//!     fn on_chunk(&mut self, text: &str) {
//!         println!("{}", text);
//!     }
//! }
//!
//! let mut session = ChatSession::new(AugurClient::new(), "user-1".to_string());
//! let outcome = session.ask("How did revenue trend?", &mut Printer).await?;
//! println!("final: {}", outcome.answer);
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod models;
pub mod session;
pub mod sse;

pub use client::{AugurClient, EventStream};
pub use error::AugurError;
pub use handler::{QueryHandler, QueryOutcome, RunningAnswer};
pub use models::QueryRequest;
pub use session::{ChatSession, CorrelationState};
pub use sse::{AnswerMetadata, LineFramer, SseParser, StreamEvent, ThreadInfo};
