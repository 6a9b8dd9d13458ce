use anyhow::Context;
use calibkit::cli::{self, Cli, Commands};
use calibkit::{init_logging, Config};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match cli.command {
        // The target file may not exist yet
        Commands::InitConfig { .. } => Config::default(),
        _ => Config::load_or_default(cli.config.as_deref()).context("failed to load settings")?,
    };

    init_logging(&config.logging.filter, cli.json_logs)?;

    cli::run(cli, &config, &mut std::io::stdout().lock())
}
