use serde::Serialize;

use crate::error::{Error, Result};
use crate::patterns::Patterns;

/// Message and code pair identifying the cause of an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDescriptor {
    message: String,
    code: String,
}

impl ErrorDescriptor {
    /// Validate a descriptor against the default patterns
    ///
    /// # Errors
    ///
    /// `invalid_error_message` or `invalid_error_code`, checked in that order
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Result<Self> {
        Self::new_with(message, code, Patterns::standard())
    }

    /// Validate a descriptor against custom patterns
    ///
    /// # Errors
    ///
    /// `invalid_error_message` or `invalid_error_code`, checked in that order
    pub fn new_with(message: impl Into<String>, code: impl Into<String>, patterns: &Patterns) -> Result<Self> {
        let message = message.into();
        if !patterns.is_message(&message) {
            return Err(Error::InvalidErrorMessage);
        }

        let code = code.into();
        if !patterns.is_code(&code) {
            return Err(Error::InvalidErrorCode);
        }

        Ok(Self { message, code })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}
