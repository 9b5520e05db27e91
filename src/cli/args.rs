//! CLI argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(name = "gemini-chat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Model to use (e.g., gemini-2.0-flash, gemini-1.5-pro)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Read settings from this file instead of the default location
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Milliseconds between revealed characters of a reply
    #[arg(long, global = true, value_name = "MS")]
    pub reveal_delay_ms: Option<u64>,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(short, long, global = true)]
    pub temperature: Option<f32>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            model: self.model.clone(),
            reveal_delay_ms: self.reveal_delay_ms,
            temperature: self.temperature,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        command: ConfigSubcommands,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSubcommands {
    /// Initialize a new config file
    Init,
    /// Print config file location
    Where,
    /// Print the effective settings after files, environment and flags
    Show,
}
