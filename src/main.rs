use clap::Parser;

use gemini_chat::cli::{self, Cli, Commands};
use gemini_chat::core::Result;
use gemini_chat::{logging, tui};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { command }) = &cli.command {
        cli::run_config_command(*command, &cli)?;
        return Ok(());
    }

    let _log_guard = logging::init();

    let config = cli::load_config(&cli)?;
    let gateway = cli::create_gateway(&config)?;

    tui::run_tui(gateway, &config).await?;

    Ok(())
}
