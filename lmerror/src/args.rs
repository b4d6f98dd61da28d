use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// LMError document tool
#[derive(Debug, Parser)]
#[command(name = "lmerror", about = "Validate and render structured error documents")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "LMERROR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the log filter (e.g. `debug`)
    #[arg(long, env = "LMERROR_LOG")]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate an error document and print its rendering
    Render {
        /// JSON document to read, `-` for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Validate an error document and print `ok` or the failure code
    Check {
        /// JSON document to read, `-` for stdin
        #[arg(default_value = "-")]
        input: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Multi-line text rendering
    Text,
    /// JSON export of the whole chain
    Json,
}
