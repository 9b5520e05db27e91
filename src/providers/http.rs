use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::RetryTransientMiddleware;
use reqwest_retry::policies::ExponentialBackoff;
use serde::Serialize;
use std::time::Duration;

use crate::config::HttpOptions;
use crate::providers::error::ProviderError;
use crate::providers::types::ApiKey;

const API_KEY_HEADER: &str = "x-goog-api-key";
const USER_AGENT: &str = concat!("gemini-chat/", env!("CARGO_PKG_VERSION"));
const RETRY_MIN_DELAY: Duration = Duration::from_millis(500);
const RETRY_MAX_DELAY: Duration = Duration::from_secs(30);

/// JSON-over-HTTPS client for the generative language API. Transient
/// failures (connect errors, 5xx, 429) are retried with exponential backoff.
#[derive(Clone)]
pub struct HttpClient {
    inner: ClientWithMiddleware,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(options: &HttpOptions) -> Result<Self, ProviderError> {
        let timeout = Duration::from_secs(options.timeout_secs);
        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(RETRY_MIN_DELAY, RETRY_MAX_DELAY)
            .build_with_max_retries(options.max_retries);

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                ProviderError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            inner: ClientBuilder::new(client)
                .with(RetryTransientMiddleware::new_with_policy(retry_policy))
                .build(),
            timeout,
        })
    }

    /// Posts `body` as JSON, authenticated with `key`. Any HTTP status comes
    /// back as a response; only transport failures are errors.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        key: &ApiKey,
        body: &T,
    ) -> Result<reqwest::Response, ProviderError> {
        let body =
            serde_json::to_vec(body).map_err(|e| ProviderError::InvalidRequest(e.to_string()))?;

        self.inner
            .post(url)
            .header(API_KEY_HEADER, key.as_str())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))
    }

    fn transport_error(&self, err: &reqwest_middleware::Error) -> ProviderError {
        match err {
            reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => {
                ProviderError::Timeout(self.timeout)
            }
            other => ProviderError::Connection(other.to_string()),
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_takes_timeout_from_options() {
        let options = HttpOptions {
            timeout_secs: 5,
            max_retries: 0,
        };
        let client = HttpClient::new(&options).expect("client");

        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(format!("{client:?}"), "HttpClient { timeout: 5s, .. }");
    }

    #[test]
    fn test_user_agent_names_the_crate() {
        assert!(USER_AGENT.starts_with("gemini-chat/"));
    }
}
