use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a placeholder cannot be
    /// resolved, the TOML is malformed, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let expanded =
            crate::env::expand_env(&raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        tracing::debug!(config_path = %path.display(), "configuration loaded");

        Ok(config)
    }

    /// Validate that every configured rule compiles and the log filter is set
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.patterns.patterns()?;

        if self.log.filter.trim().is_empty() {
            anyhow::bail!("log.filter must not be empty");
        }

        Ok(())
    }
}
