use thiserror::Error;

/// Capability shared by every failure that carries a machine-readable code
///
/// Implemented by [`crate::ErrorValue`] and by the validation [`Error`]
/// itself, so callers can report either one through the same surface.
pub trait DescribedError: std::error::Error {
    /// Machine-readable identifier (e.g. `db_timeout_01`)
    fn code(&self) -> &str;

    /// Human-readable message
    fn message(&self) -> &str;
}

/// Validation failures raised while building or linking an error value
///
/// Every variant is a caller-input problem and is never retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Descriptor input is not a structured object
    #[error("invalid_error")]
    InvalidError,

    /// Descriptor message is missing, not a string, or fails the message pattern
    #[error("invalid_error_message")]
    InvalidErrorMessage,

    /// Descriptor code is missing, not a string, or fails the code pattern
    #[error("invalid_error_code")]
    InvalidErrorCode,

    /// Response input is not a structured object
    #[error("invalid_http_response")]
    InvalidHttpResponse,

    /// Response status code is missing, not a string, or not three digits
    #[error("invalid_http_statusCode")]
    InvalidHttpStatusCode,

    /// Headers are not a sequence, or an entry has an empty or non-string name or value
    #[error("invalid_http_header")]
    InvalidHttpHeader,

    /// Captured response body could not be serialized to JSON
    #[error("invalid_http_body")]
    InvalidHttpBody,

    /// Previous error input is not an error
    #[error("invalid_previous")]
    InvalidPrevious,

    /// A previous error is already linked
    #[error("previous_exists")]
    PreviousExists,
}

impl Error {
    /// Stable condition name, identical to the `Display` output
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidError => "invalid_error",
            Self::InvalidErrorMessage => "invalid_error_message",
            Self::InvalidErrorCode => "invalid_error_code",
            Self::InvalidHttpResponse => "invalid_http_response",
            Self::InvalidHttpStatusCode => "invalid_http_statusCode",
            Self::InvalidHttpHeader => "invalid_http_header",
            Self::InvalidHttpBody => "invalid_http_body",
            Self::InvalidPrevious => "invalid_previous",
            Self::PreviousExists => "previous_exists",
        }
    }
}

impl DescribedError for Error {
    fn code(&self) -> &str {
        Self::code(self)
    }

    fn message(&self) -> &str {
        match self {
            Self::InvalidError => "error descriptor must be an object",
            Self::InvalidErrorMessage => "error message is missing or malformed",
            Self::InvalidErrorCode => "error code is missing or malformed",
            Self::InvalidHttpResponse => "http response must be an object",
            Self::InvalidHttpStatusCode => "http status code must be three digits",
            Self::InvalidHttpHeader => "http headers must be a list of non-empty name/value pairs",
            Self::InvalidHttpBody => "http body must serialize to json",
            Self::InvalidPrevious => "previous must be an error",
            Self::PreviousExists => "a previous error is already linked",
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;
