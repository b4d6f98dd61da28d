use std::sync::OnceLock;

use regex::Regex;

/// Default message rule: non-empty, no control characters
pub const DEFAULT_MESSAGE_PATTERN: &str = r"^[^\p{Cc}]+$";

/// Default code rule: letters, digits and underscore only
pub const DEFAULT_CODE_PATTERN: &str = r"^[A-Za-z0-9_]+$";

/// Default status code rule: exactly three decimal digits
pub const DEFAULT_STATUS_CODE_PATTERN: &str = r"^[0-9]{3}$";

/// Validation rules applied to descriptor and response fields
///
/// The core treats these as fixed once built. Overrides normally come from
/// configuration; everything else uses [`Patterns::standard`].
#[derive(Debug, Clone)]
pub struct Patterns {
    message: Regex,
    code: Regex,
    status_code: Regex,
}

impl Patterns {
    /// Compile a custom rule set
    ///
    /// # Errors
    ///
    /// Returns the first regex that fails to compile
    pub fn new(message: &str, code: &str, status_code: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            message: Regex::new(message)?,
            code: Regex::new(code)?,
            status_code: Regex::new(status_code)?,
        })
    }

    /// Shared instance of the default rules
    ///
    /// # Panics
    ///
    /// Never in practice: the default patterns are constant and valid
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<Patterns> = OnceLock::new();
        STANDARD.get_or_init(|| {
            Self::new(DEFAULT_MESSAGE_PATTERN, DEFAULT_CODE_PATTERN, DEFAULT_STATUS_CODE_PATTERN)
                .expect("default patterns must be valid regex")
        })
    }

    /// Check a descriptor message
    pub fn is_message(&self, candidate: &str) -> bool {
        self.message.is_match(candidate)
    }

    /// Check a descriptor code
    pub fn is_code(&self, candidate: &str) -> bool {
        self.code.is_match(candidate)
    }

    /// Check an HTTP status code
    pub fn is_status_code(&self, candidate: &str) -> bool {
        self.status_code.is_match(candidate)
    }
}
