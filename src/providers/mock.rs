use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::core::gateway::{ChatSession, SessionGateway, SessionHandle};
use crate::core::types::{SessionId, Turn};
use crate::providers::error::ProviderError;

#[derive(Debug)]
pub enum MockReply {
    Text(String),
    Error(ProviderError),
}

impl MockReply {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    #[must_use]
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self::Error(ProviderError::blocked(reason))
    }

    #[must_use]
    pub const fn error(error: ProviderError) -> Self {
        Self::Error(error)
    }
}

#[derive(Debug, Default)]
struct MockState {
    replies: VecDeque<MockReply>,
    sent: Vec<String>,
    opened_with: Vec<Vec<Turn>>,
    open_error: Option<String>,
}

/// Scripted gateway: replies are handed out in the order they were queued,
/// across every session it opens.
#[derive(Clone, Default)]
pub struct MockGateway {
    state: Arc<Mutex<MockState>>,
}

impl MockGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_reply(self, reply: MockReply) -> Self {
        self.state.lock().replies.push_back(reply);
        self
    }

    #[must_use]
    pub fn failing_open(self, message: impl Into<String>) -> Self {
        self.state.lock().open_error = Some(message.into());
        self
    }

    #[must_use]
    pub fn sent_messages(&self) -> Vec<String> {
        self.state.lock().sent.clone()
    }

    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.state.lock().sent.len()
    }

    #[must_use]
    pub fn opened_with(&self) -> Vec<Vec<Turn>> {
        self.state.lock().opened_with.clone()
    }
}

#[async_trait]
impl SessionGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &'static str {
        "mock-model"
    }

    async fn open_session(&self, prior: &[Turn]) -> Result<SessionHandle, ProviderError> {
        let mut state = self.state.lock();
        state.opened_with.push(prior.to_vec());

        if let Some(message) = &state.open_error {
            return Err(ProviderError::Configuration(message.clone()));
        }

        Ok(Arc::new(MockSession {
            id: SessionId::new(),
            state: Arc::clone(&self.state),
        }))
    }
}

struct MockSession {
    id: SessionId,
    state: Arc<Mutex<MockState>>,
}

#[async_trait]
impl ChatSession for MockSession {
    fn id(&self) -> SessionId {
        self.id
    }

    async fn send(&self, text: &str) -> Result<String, ProviderError> {
        let mut state = self.state.lock();
        state.sent.push(text.to_string());

        match state.replies.pop_front() {
            Some(MockReply::Text(reply)) => Ok(reply),
            Some(MockReply::Error(error)) => Err(error),
            None => Err(ProviderError::InvalidRequest(
                "MockGateway: No replies queued".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_queued_replies_in_order() {
        let mock = MockGateway::new()
            .with_reply(MockReply::text("first"))
            .with_reply(MockReply::blocked("SAFETY"));

        let session = mock.open_session(&[]).await.unwrap();

        assert_eq!(session.send("a").await.unwrap(), "first");
        let err = session.send("b").await.unwrap_err();
        assert_eq!(err.block_reason(), Some("SAFETY"));
        assert_eq!(mock.sent_messages(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_mock_errors_when_queue_empty() {
        let mock = MockGateway::new();
        let session = mock.open_session(&[]).await.unwrap();
        assert!(session.send("hello").await.is_err());
        assert_eq!(mock.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_failing_open_records_attempt() {
        let mock = MockGateway::new().failing_open("boom");
        let result = mock.open_session(&[Turn::user("seed")]).await;

        assert!(matches!(result, Err(ProviderError::Configuration(_))));
        assert_eq!(mock.opened_with(), vec![vec![Turn::user("seed")]]);
    }
}
