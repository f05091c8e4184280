//! Chat session state

use super::client::GeminiClient;
use super::models::ChatMessage;

/// A single conversation with the assistant
///
/// Sending takes `&mut self`, so a session can have at most one request in
/// flight and replies are appended in the order questions were asked.
pub struct ChatSession {
    client: GeminiClient,
    transcript: Vec<ChatMessage>,
}

impl ChatSession {
    /// Start a session, opening with a greeting from the model
    ///
    /// A blank greeting starts with an empty transcript.
    pub fn new(client: GeminiClient, greeting: &str) -> Self {
        let mut transcript = Vec::new();
        if !greeting.trim().is_empty() {
            transcript.push(ChatMessage::model(greeting));
        }
        Self { client, transcript }
    }

    /// All turns so far, oldest first
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Send a user message and wait for the reply
    ///
    /// Blank input is ignored and nothing is sent.
    ///
    /// # Returns
    /// * `Some(&ChatMessage)` - The model reply that was appended to the transcript
    /// * `None` - The input was blank
    pub async fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        if input.trim().is_empty() {
            return None;
        }

        self.transcript.push(ChatMessage::user(input));
        let reply = self.client.ask(&self.transcript).await;
        self.transcript.push(ChatMessage::model(reply));
        self.transcript.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::{ChatRole, UNREACHABLE_MESSAGE};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_appends_user_and_model_turns() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                serde_json::json!({
                    "candidates": [{"content": {"role": "model", "parts": [{"text": "Enable CSRF."}]}}]
                })
                .to_string(),
                "application/json",
            ))
            .mount(&server)
            .await;

        let client = GeminiClient::with_endpoint(server.uri(), "m", Some("k"));
        let mut session = ChatSession::new(client, "Hello!");

        let reply = session.send("How do I stop CSRF?").await.unwrap();
        assert_eq!(reply.role, ChatRole::Model);
        assert_eq!(reply.text, "Enable CSRF.");

        let transcript = session.transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0], ChatMessage::model("Hello!"));
        assert_eq!(transcript[1], ChatMessage::user("How do I stop CSRF?"));
        assert_eq!(transcript[2], ChatMessage::model("Enable CSRF."));
    }

    #[tokio::test]
    async fn test_blank_input_is_ignored() {
        let server = MockServer::start().await;
        let client = GeminiClient::with_endpoint(server.uri(), "m", Some("k"));
        let mut session = ChatSession::new(client, "Hello!");

        assert!(session.send("   ").await.is_none());
        assert_eq!(session.transcript().len(), 1);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_request_still_allows_next_message() {
        let client = GeminiClient::with_endpoint("http://127.0.0.1:9", "m", Some("k"));
        let mut session = ChatSession::new(client, "");

        let first = session.send("first").await.unwrap().text.clone();
        assert_eq!(first, UNREACHABLE_MESSAGE);
        let second = session.send("second").await.unwrap().text.clone();
        assert_eq!(second, UNREACHABLE_MESSAGE);

        let roles: Vec<ChatRole> = session.transcript().iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![ChatRole::User, ChatRole::Model, ChatRole::User, ChatRole::Model]
        );
    }
}
