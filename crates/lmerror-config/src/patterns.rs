use lmerror_core::{DEFAULT_CODE_PATTERN, DEFAULT_MESSAGE_PATTERN, DEFAULT_STATUS_CODE_PATTERN, Patterns};
use serde::Deserialize;

/// Pattern overrides, as regular expressions
///
/// Omitted keys keep the built-in rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternsConfig {
    /// Rule for descriptor messages
    #[serde(default = "default_message")]
    pub message: String,
    /// Rule for descriptor codes
    #[serde(default = "default_code")]
    pub code: String,
    /// Rule for HTTP status codes
    #[serde(default = "default_status_code")]
    pub status_code: String,
}

impl PatternsConfig {
    /// Compile into the rule set used by the core
    ///
    /// # Errors
    ///
    /// Returns an error naming the first pattern that is not a valid regex
    pub fn patterns(&self) -> anyhow::Result<Patterns> {
        for (name, pattern) in [
            ("message", &self.message),
            ("code", &self.code),
            ("status_code", &self.status_code),
        ] {
            regex::Regex::new(pattern).map_err(|e| anyhow::anyhow!("invalid patterns.{name}: {e}"))?;
        }

        Ok(Patterns::new(&self.message, &self.code, &self.status_code)?)
    }
}

impl Default for PatternsConfig {
    fn default() -> Self {
        Self {
            message: default_message(),
            code: default_code(),
            status_code: default_status_code(),
        }
    }
}

fn default_message() -> String {
    DEFAULT_MESSAGE_PATTERN.to_string()
}

fn default_code() -> String {
    DEFAULT_CODE_PATTERN.to_string()
}

fn default_status_code() -> String {
    DEFAULT_STATUS_CODE_PATTERN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config: PatternsConfig = toml::from_str(r#"code = '^[a-z]+(\.[a-z]+)*$'"#).unwrap();

        assert_eq!(config.message, DEFAULT_MESSAGE_PATTERN);
        assert_eq!(config.status_code, DEFAULT_STATUS_CODE_PATTERN);

        let patterns = config.patterns().unwrap();
        assert!(patterns.is_code("db.timeout"));
        assert!(!patterns.is_code("db_timeout"));
        assert!(patterns.is_status_code("503"));
    }

    #[test]
    fn invalid_regex_names_the_field() {
        let config = PatternsConfig {
            status_code: "([0-9]{3}".to_string(),
            ..PatternsConfig::default()
        };

        let err = config.patterns().unwrap_err();
        assert!(err.to_string().contains("patterns.status_code"));
    }
}
