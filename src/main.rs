//! compose-assist - tone-aware AI replies for webmail compose windows
//!
//! Main entry point for the compose-assist CLI.

mod cli;
mod cmd_generate;
mod cmd_simulate;
mod cmd_tones;
mod logging;

use clap::Parser;
use tracing::{debug, warn};

use compose_assist_config::{ConfigLoader, ConfigValidator};

use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;
    logging::init_tracing(&config.logging)?;
    debug!(path = ?cli.config, "configuration loaded");

    for warning in ConfigValidator::validate(&config)?.into_result()? {
        warn!(path = %warning.path, "{}", warning.message);
    }

    match cli.command {
        Commands::Generate(args) => cmd_generate::handle_generate(args, config).await,
        Commands::Tones { format } => cmd_tones::handle_tones(&format),
        Commands::Simulate(args) => cmd_simulate::handle_simulate(args, config).await,
    }
}
