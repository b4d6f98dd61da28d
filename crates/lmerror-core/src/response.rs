use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::patterns::Patterns;

/// Single HTTP header captured in a response snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderEntry {
    name: String,
    value: String,
}

impl HeaderEntry {
    /// Build a header entry
    ///
    /// # Errors
    ///
    /// `invalid_http_header` if either the name or the value is empty
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let value = value.into();

        if name.is_empty() || value.is_empty() {
            return Err(Error::InvalidHttpHeader);
        }

        Ok(Self { name, value })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Normalized HTTP response context attached to an error
///
/// An empty header list is stored as absent, so `headers()` is either `None`
/// or a non-empty slice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSnapshot {
    status_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<Vec<HeaderEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<Value>,
}

impl ResponseSnapshot {
    /// Validate a snapshot against the default patterns
    ///
    /// # Errors
    ///
    /// `invalid_http_statusCode` if the status code is not three digits
    pub fn new(status_code: impl Into<String>, headers: Vec<HeaderEntry>, body: Option<Value>) -> Result<Self> {
        Self::new_with(status_code, headers, body, Patterns::standard())
    }

    /// Validate a snapshot against custom patterns
    ///
    /// # Errors
    ///
    /// `invalid_http_statusCode` if the status code fails the status pattern
    pub fn new_with(
        status_code: impl Into<String>,
        headers: Vec<HeaderEntry>,
        body: Option<Value>,
        patterns: &Patterns,
    ) -> Result<Self> {
        let status_code = status_code.into();
        if !patterns.is_status_code(&status_code) {
            return Err(Error::InvalidHttpStatusCode);
        }

        Ok(Self {
            status_code,
            headers: (!headers.is_empty()).then_some(headers),
            body,
        })
    }

    /// Capture the head and body of an `http` response
    ///
    /// Bodies that serialize to `null`, such as `()`, are recorded as absent.
    ///
    /// # Errors
    ///
    /// `invalid_http_header` if a header value is empty or not visible ASCII,
    /// `invalid_http_body` if the body does not serialize to JSON,
    /// `invalid_http_statusCode` if custom patterns reject the status
    pub fn from_http<B: Serialize>(response: &http::Response<B>, patterns: &Patterns) -> Result<Self> {
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                let value = value.to_str().map_err(|_| Error::InvalidHttpHeader)?;
                HeaderEntry::new(name.as_str(), value)
            })
            .collect::<Result<Vec<_>>>()?;

        let body = serde_json::to_value(response.body()).map_err(|_| Error::InvalidHttpBody)?;
        let body = (!body.is_null()).then_some(body);

        Self::new_with(response.status().as_str(), headers, body, patterns)
    }

    pub fn status_code(&self) -> &str {
        &self.status_code
    }

    /// Headers in their original order, `None` when there were none
    pub fn headers(&self) -> Option<&[HeaderEntry]> {
        self.headers.as_deref()
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }
}
