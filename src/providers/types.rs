use std::fmt;

/// API key for the generative language endpoint. Never printed.
#[derive(Clone, Default)]
pub struct ApiKey(String);

impl ApiKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Reads the key from `var_name`. An unset variable gives an empty key,
    /// which is rejected when a session is opened.
    #[must_use]
    pub fn from_env(var_name: &str) -> Self {
        Self(std::env::var(var_name).unwrap_or_default())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("ApiKey(<unset>)")
        } else {
            f.write_str("ApiKey(<redacted>)")
        }
    }
}
