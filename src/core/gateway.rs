use async_trait::async_trait;
use std::sync::Arc;

use super::types::{SessionId, Turn};
use crate::providers::error::ProviderError;

/// A live conversation with the remote model. The remote side keeps its own
/// context; callers only ever pass text in and get text back.
#[async_trait]
pub trait ChatSession: Send + Sync {
    fn id(&self) -> SessionId;
    async fn send(&self, text: &str) -> Result<String, ProviderError>;
}

pub type SessionHandle = Arc<dyn ChatSession>;

#[async_trait]
pub trait SessionGateway: Send + Sync {
    fn name(&self) -> &str;
    fn model(&self) -> &str;

    /// Opens a session seeded with `prior` turns. Error turns are never sent
    /// to the remote side.
    async fn open_session(&self, prior: &[Turn]) -> Result<SessionHandle, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoSession(SessionId);

    #[async_trait]
    impl ChatSession for EchoSession {
        fn id(&self) -> SessionId {
            self.0
        }

        async fn send(&self, text: &str) -> Result<String, ProviderError> {
            Ok(format!("echo: {text}"))
        }
    }

    struct EchoGateway;

    #[async_trait]
    impl SessionGateway for EchoGateway {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn model(&self) -> &'static str {
            "echo-model"
        }

        async fn open_session(&self, _prior: &[Turn]) -> Result<SessionHandle, ProviderError> {
            Ok(Arc::new(EchoSession(SessionId::new())))
        }
    }

    #[tokio::test]
    async fn test_gateway_trait_object_safe() {
        let gateway: Box<dyn SessionGateway> = Box::new(EchoGateway);
        assert_eq!(gateway.name(), "echo");
        assert_eq!(gateway.model(), "echo-model");

        let session = gateway.open_session(&[]).await.unwrap();
        assert_eq!(session.send("hi").await.unwrap(), "echo: hi");
    }
}
