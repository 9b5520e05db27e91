pub mod convert;
pub mod types;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::config::{AppConfig, GenerationOptions, HttpOptions, SafetyOptions};
use crate::core::gateway::{ChatSession, SessionGateway, SessionHandle};
use crate::core::types::{SessionId, Turn};
use crate::providers::error::ProviderError;
use crate::providers::http::HttpClient;
use crate::providers::types::ApiKey;

use types::{Content, GenerationConfig, SafetySetting};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Clone)]
pub struct GeminiGateway {
    http: HttpClient,
    api_key: ApiKey,
    api_key_env: String,
    model: String,
    base_url: String,
    generation: GenerationConfig,
    safety: Vec<SafetySetting>,
}

impl std::fmt::Debug for GeminiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGateway")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl GeminiGateway {
    pub fn with_http(api_key: ApiKey, http: &HttpOptions) -> Result<Self, ProviderError> {
        Ok(Self {
            http: HttpClient::new(http)?,
            api_key,
            api_key_env: API_KEY_ENV.to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            generation: convert::generation_config(&GenerationOptions::default()),
            safety: convert::safety_settings(&SafetyOptions::default()),
        })
    }

    /// Builds a gateway from loaded settings. A missing key is not an error
    /// here; it surfaces when the first session is opened.
    pub fn from_config(config: &AppConfig) -> Result<Self, ProviderError> {
        let mut gateway = Self::with_http(ApiKey::from_env(&config.api_key_env), &config.http)?
            .with_model(config.model.clone())
            .with_base_url(&config.base_url)
            .with_generation(&config.generation)
            .with_safety(&config.safety);
        gateway.api_key_env.clone_from(&config.api_key_env);
        Ok(gateway)
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_generation(mut self, options: &GenerationOptions) -> Self {
        self.generation = convert::generation_config(options);
        self
    }

    #[must_use]
    pub fn with_safety(mut self, options: &SafetyOptions) -> Self {
        self.safety = convert::safety_settings(options);
        self
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn parse_error(&self, status: reqwest::StatusCode, body: &str) -> ProviderError {
        ProviderError::from_status(status.as_u16(), body, &self.api_key_env)
    }

    fn validate(&self) -> Result<(), ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::Authentication {
                message: "No API key configured".to_string(),
                hint: Some(format!("Set the {} environment variable", self.api_key_env)),
            });
        }
        if self.model.trim().is_empty() {
            return Err(ProviderError::Configuration(
                "Model name must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    async fn generate(&self, history: &[Content], message: &str) -> Result<String, ProviderError> {
        let api_request =
            convert::to_api_request(history, message, &self.generation, &self.safety);
        let url = self.generate_content_url();

        let response = self
            .http
            .post_json(&url, &self.api_key, &api_request)
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(self.parse_error(status, &error_body));
        }

        let api_response: types::ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        if let Some(usage) = &api_response.usage_metadata {
            tracing::debug!(
                prompt_tokens = usage.prompt_token_count,
                reply_tokens = usage.candidates_token_count,
                total_tokens = usage.total_token_count,
                "Gemini usage"
            );
        }

        convert::reply_text(&api_response)
    }
}

#[async_trait]
impl SessionGateway for GeminiGateway {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn open_session(&self, prior: &[Turn]) -> Result<SessionHandle, ProviderError> {
        self.validate()?;
        let history = convert::history_from_turns(prior)?;

        let session = GeminiSession {
            id: SessionId::new(),
            gateway: self.clone(),
            history: Mutex::new(history),
        };
        tracing::debug!(session = %session.id, model = %self.model, "Opened Gemini session");

        Ok(Arc::new(session))
    }
}

/// Client-held conversation state. The HTTP API is stateless, so every send
/// carries the full history.
pub struct GeminiSession {
    id: SessionId,
    gateway: GeminiGateway,
    history: Mutex<Vec<Content>>,
}

impl GeminiSession {
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.lock().len()
    }
}

impl std::fmt::Debug for GeminiSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiSession")
            .field("id", &self.id)
            .field("history_len", &self.history_len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChatSession for GeminiSession {
    fn id(&self) -> SessionId {
        self.id
    }

    async fn send(&self, text: &str) -> Result<String, ProviderError> {
        let snapshot = self.history.lock().clone();
        let reply = self.gateway.generate(&snapshot, text).await?;

        // Empty model turns are rejected by the API on later requests.
        if !reply.is_empty() {
            let mut history = self.history.lock();
            history.push(convert::user_content(text));
            history.push(convert::model_content(&reply));
        }

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> GeminiGateway {
        gateway_with_key("test-key")
    }

    fn gateway_with_key(key: &str) -> GeminiGateway {
        GeminiGateway::with_http(ApiKey::new(key), &HttpOptions::default()).expect("create gateway")
    }

    #[test]
    fn test_gateway_with_model() {
        let gateway = gateway().with_model("gemini-1.5-pro");
        assert_eq!(gateway.model(), "gemini-1.5-pro");
        assert_eq!(gateway.name(), "gemini");
    }

    #[test]
    fn test_gateway_with_base_url() {
        let gateway = gateway().with_base_url("https://custom.api.com/");
        assert_eq!(gateway.base_url, "https://custom.api.com");
    }

    #[test]
    fn test_gateway_debug_hides_key() {
        let debug = format!("{:?}", gateway_with_key("secret-key"));
        assert!(debug.contains("GeminiGateway"));
        assert!(debug.contains("gemini-2.0-flash"));
        assert!(!debug.contains("secret-key"));
    }

    #[test]
    fn test_generate_content_url_keeps_key_out_of_query() {
        let url = gateway().with_model("gemini-1.5-flash").generate_content_url();
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent"
        );
        assert!(!url.contains("test-key"));
    }

    #[test]
    fn test_from_config_applies_settings() {
        let mut config = AppConfig::default();
        config.model = "gemini-1.5-pro".to_string();
        config.generation.temperature = 0.2;
        config.api_key_env = "GEMINI_CHAT_TEST_UNSET_KEY".to_string();

        let gateway = GeminiGateway::from_config(&config).expect("create gateway");
        assert_eq!(gateway.model(), "gemini-1.5-pro");
        assert_eq!(gateway.generation.temperature, Some(0.2));
        assert_eq!(gateway.safety.len(), 4);
    }

    #[test]
    fn test_parse_error_mentions_configured_env_var() {
        let mut gateway = gateway();
        gateway.api_key_env = "MY_KEY".to_string();
        let err = gateway.parse_error(reqwest::StatusCode::FORBIDDEN, "{}");

        let ProviderError::Authentication { hint, .. } = err else {
            panic!("expected authentication error, got {err:?}");
        };
        assert_eq!(hint.as_deref(), Some("Check your MY_KEY environment variable"));
    }

    #[test]
    fn test_parse_error_404_is_model_not_found() {
        let body = r#"{"error": {"message": "models/foo is not found"}}"#;
        let err = gateway().parse_error(reqwest::StatusCode::NOT_FOUND, body);
        assert!(matches!(err, ProviderError::ModelNotFound(ref m) if m.contains("models/foo")));
    }

    #[tokio::test]
    async fn test_open_session_requires_api_key() {
        let gateway = gateway_with_key("");
        let Err(err) = gateway.open_session(&[]).await else {
            panic!("session opened without an API key");
        };
        assert!(matches!(err, ProviderError::Authentication { .. }));
    }

    #[tokio::test]
    async fn test_open_session_rejects_empty_model() {
        let Err(err) = gateway().with_model("").open_session(&[]).await else {
            panic!("session opened with an empty model name");
        };
        assert!(matches!(err, ProviderError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_open_session_seeds_history_without_error_turns() {
        let prior = vec![
            Turn::user("hi"),
            Turn::assistant("hello"),
            Turn::error("Error: Could not get a response. Please try again."),
        ];
        let gateway = gateway();
        let session = gateway.open_session(&prior).await.expect("open session");
        assert_ne!(session.id(), SessionId::new());

        let seeded = convert::history_from_turns(&prior).unwrap();
        assert_eq!(seeded.len(), 2);
    }

    #[tokio::test]
    async fn test_open_session_rejects_history_starting_with_model() {
        let Err(err) = gateway().open_session(&[Turn::assistant("hello")]).await else {
            panic!("history starting with a model turn was accepted");
        };
        assert!(matches!(err, ProviderError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_send_to_unreachable_host_is_connection_error() {
        let http = HttpOptions {
            timeout_secs: 5,
            max_retries: 0,
        };
        let gateway = GeminiGateway::with_http(ApiKey::new("k"), &http)
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let session = GeminiSession {
            id: SessionId::new(),
            gateway,
            history: Mutex::new(vec![convert::user_content("hi")]),
        };

        let err = session.send("hello").await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Connection(_) | ProviderError::Timeout(_)
        ));
        assert_eq!(session.history_len(), 1);
    }
}
