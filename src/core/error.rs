use thiserror::Error;

use crate::config::ConfigError;
use crate::providers::error::ProviderError;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Failed to open chat session: {0}")]
    Init(#[source] ProviderError),

    #[error("Failed to send message: {0}")]
    Send(#[source] ProviderError),

    #[error("Model returned an empty reply")]
    EmptyReply,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Provider setup failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChatError {
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        matches!(self, Self::Send(err) if err.is_blocked())
    }

    #[must_use]
    pub fn block_reason(&self) -> Option<&str> {
        match self {
            Self::Send(err) => err.block_reason(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
