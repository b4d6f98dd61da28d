#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod log;
pub mod patterns;

use serde::Deserialize;

pub use log::LogConfig;
pub use patterns::PatternsConfig;

/// Top-level LMError configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Validation rules for descriptors and responses
    #[serde(default)]
    pub patterns: PatternsConfig,
    /// Log output settings for the command line tool
    #[serde(default)]
    pub log: LogConfig,
}
