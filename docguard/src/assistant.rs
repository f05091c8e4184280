//! Chat assistant relay
//!
//! Forwards a chat transcript to the Gemini `generateContent` endpoint and
//! returns the model's reply. The relay never fails from the caller's point
//! of view: transport and decoding errors are logged and replaced by a fixed
//! message that can be shown in the chat.

mod client;
mod models;
mod session;

pub use client::GeminiClient;
pub use models::{ChatMessage, ChatRole};
pub use session::ChatSession;

/// Reply shown when the assistant cannot be reached
pub const UNREACHABLE_MESSAGE: &str =
    "Error: Unable to connect to the AI assistant. Please check your network or try again later.";

/// Reply shown when the assistant answers with no text
pub const EMPTY_REPLY_MESSAGE: &str = "I'm sorry, I couldn't process that request.";

/// Error types for relay requests
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("API key not set (expected environment variable {0})")]
    MissingApiKey(String),

    #[error("Server returned error: {0}")]
    ServerError(String),

    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),
}

/// Result type for relay requests
pub type Result<T> = std::result::Result<T, RelayError>;
