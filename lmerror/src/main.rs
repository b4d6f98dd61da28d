#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod command;
mod telemetry;

use std::process::ExitCode;

use args::{Args, Command};
use clap::Parser;
use lmerror_config::Config;

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    // Initialize logging
    telemetry::init(args.log_filter.as_deref().unwrap_or(&config.log.filter), config.log.json)?;

    if let Some(path) = &args.config {
        tracing::debug!(config_path = %path.display(), "using configuration file");
    }

    let patterns = config.patterns.patterns()?;

    match args.command {
        Command::Render { input, format } => command::render(&input, format, &patterns),
        Command::Check { input } => command::check(&input, &patterns),
    }
}
