mod args;
mod gateway;

pub use args::{Cli, Commands, ConfigSubcommands};
pub use gateway::create_gateway;

use crate::config::{AppConfig, ConfigResult};

/// Resolves settings in precedence order: defaults, config file,
/// `GEMINI_CHAT_*` environment, then command-line flags.
///
/// An explicit `--config` path must load cleanly; the default location
/// falls back to defaults with a warning.
pub fn load_config(cli: &Cli) -> ConfigResult<AppConfig> {
    let base = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };

    let config = base.with_overrides(&cli.overrides());
    config.validate()?;
    Ok(config)
}

pub fn run_config_command(command: ConfigSubcommands, cli: &Cli) -> ConfigResult<()> {
    match command {
        ConfigSubcommands::Init => {
            let path = match &cli.config {
                Some(path) => {
                    AppConfig::init_at(path)?;
                    path.clone()
                }
                None => AppConfig::init_default()?,
            };
            println!("✓ Created config file at {}", path.display());
        }
        ConfigSubcommands::Where => {
            let path = cli
                .config
                .clone()
                .or_else(AppConfig::get_config_path)
                .ok_or(crate::config::ConfigError::NoConfigDir)?;
            println!("{}", path.display());
        }
        ConfigSubcommands::Show => {
            print!("{}", load_config(cli)?.to_toml()?);
        }
    }
    Ok(())
}
