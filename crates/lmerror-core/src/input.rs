//! Validation of untyped input
//!
//! Error documents arrive as JSON:
//!
//! ```json
//! {
//!   "error":    { "message": "db timeout", "code": "db_timeout_01" },
//!   "response": { "statusCode": "503", "headers": [{ "name": "Retry-After", "value": "120" }], "body": "..." },
//!   "previous": { "error": { "message": "...", "code": "..." } }
//! }
//! ```
//!
//! Each field is checked in that order and the first failure wins. JSON
//! `null` counts as absent for `response`, `headers`, `body` and `previous`;
//! `headers` given as `[]` or `{}` is absent too.
//! Unknown keys, such as an exported `timestamp`, are ignored.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::descriptor::ErrorDescriptor;
use crate::error::{Error, Result};
use crate::patterns::Patterns;
use crate::response::{HeaderEntry, ResponseSnapshot};
use crate::value::{ErrorValue, Previous};

/// Plain error carried over from a document that has no descriptor
///
/// A `previous` written as exactly `{ "message": "..." }` becomes one of
/// these, which is also how exported chains record previous errors that were
/// not error values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignError {
    message: String,
}

impl ForeignError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl std::fmt::Display for ForeignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ForeignError {}

impl ErrorValue {
    /// Validate a whole error document and build the value
    ///
    /// A `timestamp` key, as written by the JSON export, is ignored and the
    /// value is stamped with the current time.
    ///
    /// # Errors
    ///
    /// The first failing rule, in descriptor, response, previous order
    pub fn from_value(document: &Value, patterns: &Patterns) -> Result<Self> {
        let fields = document.as_object();
        let field = |key: &str| fields.and_then(|fields| fields.get(key)).filter(|value| !value.is_null());

        let descriptor = field("error")
            .ok_or(Error::InvalidError)
            .and_then(|descriptor| descriptor_from_value(descriptor, patterns))?;
        let response = field("response")
            .map(|response| response_from_value(response, patterns))
            .transpose()?;
        let previous = field("previous")
            .map(|previous| previous_from_value(previous, patterns))
            .transpose()?;

        Ok(Self::new(descriptor, response, previous))
    }

    /// Link a prior error given as an untyped document
    ///
    /// # Errors
    ///
    /// `previous_exists` if already linked, otherwise `invalid_previous` if the
    /// document is not an error
    pub fn add_previous_value(&mut self, previous: &Value, patterns: &Patterns) -> Result<()> {
        if self.previous().is_some() {
            return Err(Error::PreviousExists);
        }

        self.add_previous(previous_from_value(previous, patterns)?)
    }
}

/// Validate an untyped descriptor `{ message, code }`
///
/// # Errors
///
/// `invalid_error`, `invalid_error_message` or `invalid_error_code`
pub fn descriptor_from_value(value: &Value, patterns: &Patterns) -> Result<ErrorDescriptor> {
    let fields = value.as_object().ok_or(Error::InvalidError)?;

    let message = string_field(fields, "message").ok_or(Error::InvalidErrorMessage)?;
    if !patterns.is_message(message) {
        return Err(Error::InvalidErrorMessage);
    }

    let code = string_field(fields, "code").ok_or(Error::InvalidErrorCode)?;

    ErrorDescriptor::new_with(message, code, patterns)
}

/// Validate an untyped response `{ statusCode, headers?, body? }`
///
/// # Errors
///
/// `invalid_http_response`, `invalid_http_statusCode` or `invalid_http_header`
pub fn response_from_value(value: &Value, patterns: &Patterns) -> Result<ResponseSnapshot> {
    let fields = value.as_object().ok_or(Error::InvalidHttpResponse)?;

    let status_code = string_field(fields, "statusCode").ok_or(Error::InvalidHttpStatusCode)?;
    if !patterns.is_status_code(status_code) {
        return Err(Error::InvalidHttpStatusCode);
    }

    // `null` and `{}` mean no headers, like a missing key or `[]`
    let headers = match fields.get("headers").filter(|headers| !is_blank(headers)) {
        None => Vec::new(),
        Some(Value::Array(entries)) => entries.iter().map(header_from_value).collect::<Result<Vec<_>>>()?,
        Some(_) => return Err(Error::InvalidHttpHeader),
    };

    let body = fields.get("body").filter(|body| !body.is_null()).cloned();

    ResponseSnapshot::new_with(status_code, headers, body, patterns)
}

fn header_from_value(value: &Value) -> Result<HeaderEntry> {
    let fields = value.as_object().ok_or(Error::InvalidHttpHeader)?;
    let name = string_field(fields, "name").ok_or(Error::InvalidHttpHeader)?;
    let value = string_field(fields, "value").ok_or(Error::InvalidHttpHeader)?;

    HeaderEntry::new(name, value)
}

/// Validate an untyped previous error
///
/// A document with an `error` key is a nested error value, validated with
/// the same rules. A document whose only key is a non-empty string `message`
/// is a [`ForeignError`]; any other key next to `message` is rejected. A
/// nested document that fails validation is reported as `invalid_previous`,
/// not as its inner failure.
///
/// # Errors
///
/// `invalid_previous`
pub fn previous_from_value(value: &Value, patterns: &Patterns) -> Result<Previous> {
    let fields = value.as_object().ok_or(Error::InvalidPrevious)?;

    if fields.contains_key("error") {
        let nested = ErrorValue::from_value(value, patterns).map_err(|_| Error::InvalidPrevious)?;
        return Ok(Arc::new(nested));
    }

    match string_field(fields, "message") {
        Some(message) if !message.is_empty() && fields.len() == 1 => Ok(Arc::new(ForeignError::new(message))),
        _ => Err(Error::InvalidPrevious),
    }
}

fn is_blank(value: &Value) -> bool {
    value.is_null() || value.as_object().is_some_and(Map::is_empty)
}

fn string_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}
