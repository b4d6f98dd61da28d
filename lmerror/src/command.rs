use std::io::Read;
use std::process::ExitCode;

use lmerror_core::{ErrorValue, Patterns};
use serde_json::Value;

use crate::args::Format;

/// Read a document from a path, or from stdin when the path is `-`
pub fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .map_err(|e| anyhow::anyhow!("failed to read stdin: {e}"))?;
        return Ok(raw);
    }

    std::fs::read_to_string(input).map_err(|e| anyhow::anyhow!("failed to read {input}: {e}"))
}

/// Parse and validate a document
///
/// Malformed JSON is an operational error; a well-formed document that fails
/// validation comes back as the inner `Err`.
pub fn evaluate(raw: &str, patterns: &Patterns) -> anyhow::Result<lmerror_core::Result<ErrorValue>> {
    let document: Value = serde_json::from_str(raw).map_err(|e| anyhow::anyhow!("document is not valid JSON: {e}"))?;
    Ok(ErrorValue::from_value(&document, patterns))
}

/// Format a validated value for stdout
pub fn format(value: &ErrorValue, format: Format) -> anyhow::Result<String> {
    match format {
        Format::Text => Ok(value.render()),
        Format::Json => Ok(serde_json::to_string_pretty(value)? + "\n"),
    }
}

pub fn render(input: &str, output: Format, patterns: &Patterns) -> anyhow::Result<ExitCode> {
    let raw = read_input(input)?;

    match evaluate(&raw, patterns)? {
        Ok(value) => {
            tracing::debug!(code = value.code(), "document validated");
            print!("{}", format(&value, output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::error!(code = err.code(), input, "invalid error document");
            Ok(ExitCode::FAILURE)
        }
    }
}

pub fn check(input: &str, patterns: &Patterns) -> anyhow::Result<ExitCode> {
    let raw = read_input(input)?;

    match evaluate(&raw, patterns)? {
        Ok(_) => {
            println!("ok");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::warn!(code = err.code(), input, "invalid error document");
            println!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use lmerror_core::Error;

    use super::*;

    #[test]
    fn malformed_json_is_operational_error() {
        assert!(evaluate("{ not json", Patterns::standard()).is_err());
    }

    #[test]
    fn invalid_document_is_validation_error() {
        let result = evaluate(r#"{ "error": { "message": "m", "code": "bad code" } }"#, Patterns::standard()).unwrap();
        assert_eq!(result.map(|_| ()), Err(Error::InvalidErrorCode));
    }

    #[test]
    fn text_format_is_the_rendering() {
        let value = evaluate(
            r#"{ "error": { "message": "db timeout", "code": "db_timeout_01" }, "response": { "statusCode": "503" } }"#,
            Patterns::standard(),
        )
        .unwrap()
        .unwrap();

        assert_eq!(format(&value, Format::Text).unwrap(), value.render());
    }

    #[test]
    fn json_format_exports_the_chain() {
        let value = evaluate(
            r#"{ "error": { "message": "outer", "code": "outer" }, "previous": { "message": "root cause" } }"#,
            Patterns::standard(),
        )
        .unwrap()
        .unwrap();

        let exported: Value = serde_json::from_str(&format(&value, Format::Json).unwrap()).unwrap();
        assert_eq!(exported["error"]["code"], "outer");
        assert_eq!(exported["previous"]["message"], "root cause");
    }
}
