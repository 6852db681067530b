//! assetbake - bake static files into a fingerprinted asset table.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};

use assetbake::config::Config;
use assetbake::logger;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    cli::serve::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = Config::discover(&cli.config)?;
    if let Some(path) = &config.config_path {
        assetbake::debug!("config"; "using {}", path.display());
    }

    match &cli.command {
        Commands::Bake { args } => cli::bake::run(config, args),
        Commands::Serve { args } => cli::serve::run(config, args),
    }
}
