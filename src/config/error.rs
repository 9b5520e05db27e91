use std::io;
use std::path::PathBuf;

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to load config: {0}")]
    Load(#[from] config::ConfigError),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error("Config file already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Config directory not found")]
    NoConfigDir,
}
