pub mod error;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::providers::gemini::types::HarmBlockThreshold;
use crate::providers::gemini::{API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL};

pub use error::{ConfigError, ConfigResult};

const APP_DIR: &str = "gemini-chat";
const ENV_PREFIX: &str = "GEMINI_CHAT";

pub fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .map(|h| h.join("Library/Application Support").join(APP_DIR))
    }

    #[cfg(target_os = "linux")]
    {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))
            .map(|c| c.join(APP_DIR))
    }

    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA")
            .map(PathBuf::from)
            .map(|a| a.join(APP_DIR))
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .map(|h| h.join(".config").join(APP_DIR))
    }
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_k: 1,
            top_p: 1.0,
            max_output_tokens: 2048,
        }
    }
}

/// One threshold applied to all four harm categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyOptions {
    pub threshold: HarmBlockThreshold,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpOptions {
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            max_retries: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: String,
    /// Name of the environment variable holding the API key. The key itself
    /// is never read from the config file.
    pub api_key_env: String,
    pub base_url: String,
    pub reveal_delay_ms: u64,
    pub generation: GenerationOptions,
    pub safety: SafetyOptions,
    pub http: HttpOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_key_env: API_KEY_ENV.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            reveal_delay_ms: 1,
            generation: GenerationOptions::default(),
            safety: SafetyOptions::default(),
            http: HttpOptions::default(),
        }
    }
}

/// Command-line values that take precedence over the file and environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub model: Option<String>,
    pub reveal_delay_ms: Option<u64>,
    pub temperature: Option<f32>,
}

impl AppConfig {
    /// Loads the default config file and environment, falling back to
    /// defaults when either is unreadable.
    #[must_use]
    pub fn load() -> Self {
        Self::load_sources(Self::get_config_path().as_deref(), false).unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {e}");
            tracing::warn!(error = %e, "Falling back to default config");
            Self::default()
        })
    }

    /// Loads a file the user named explicitly. Unlike [`AppConfig::load`],
    /// a missing or unreadable file is an error.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        Self::load_sources(Some(path), true)
    }

    fn load_sources(path: Option<&Path>, required: bool) -> ConfigResult<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(required));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(model) = &overrides.model {
            self.model.clone_from(model);
        }
        if let Some(delay) = overrides.reveal_delay_ms {
            self.reveal_delay_ms = delay;
        }
        if let Some(temperature) = overrides.temperature {
            self.generation.temperature = temperature;
        }
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Invalid("model must not be empty".to_string()));
        }
        if self.api_key_env.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "api_key_env must not be empty".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(ConfigError::Invalid(format!(
                "generation.temperature must be between 0.0 and 2.0, got {}",
                self.generation.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.generation.top_p) {
            return Err(ConfigError::Invalid(format!(
                "generation.top_p must be between 0.0 and 1.0, got {}",
                self.generation.top_p
            )));
        }
        if self.generation.max_output_tokens == 0 {
            return Err(ConfigError::Invalid(
                "generation.max_output_tokens must be positive".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        get_config_dir().map(|dir| dir.join("config.toml"))
    }

    pub fn init_default() -> ConfigResult<PathBuf> {
        let path = Self::get_config_path().ok_or(ConfigError::NoConfigDir)?;
        Self::init_at(&path)?;
        Ok(path)
    }

    pub fn init_at(path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }

        fs::write(path, include_str!("config.template.toml"))?;
        Ok(())
    }
}
