pub mod error;
pub mod gemini;
pub mod http;
pub mod mock;
pub mod types;

pub use error::ProviderError;
pub use gemini::GeminiGateway;
pub use types::ApiKey;
