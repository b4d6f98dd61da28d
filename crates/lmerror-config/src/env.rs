use std::sync::OnceLock;

use regex::{Captures, Regex};

/// Substitute `{{ env.NAME }}` and `{{ env.NAME | default("value") }}` in raw TOML
///
/// Runs before deserialization so pattern strings can come from the
/// environment. Comment lines are copied untouched.
pub fn expand_env(input: &str) -> anyhow::Result<String> {
    let mut lines = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut expanded = String::with_capacity(line.len());
        let mut cursor = 0;

        for captures in placeholder().captures_iter(line) {
            let Some(whole) = captures.get(0) else {
                continue;
            };

            expanded.push_str(&line[cursor..whole.start()]);
            expanded.push_str(&resolve(&captures)?);
            cursor = whole.end();
        }

        expanded.push_str(&line[cursor..]);
        lines.push(expanded);
    }

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#)
            .expect("placeholder pattern must be valid regex")
    })
}

fn resolve(captures: &Captures<'_>) -> anyhow::Result<String> {
    let key = captures.get(1).map_or("", |m| m.as_str());
    let fallback = captures.get(2).map(|m| m.as_str());

    let Some(name) = key.strip_prefix("env.").filter(|name| !name.is_empty() && !name.contains('.')) else {
        anyhow::bail!("only variables scoped with 'env.' are supported: `{key}`");
    };

    match (std::env::var(name), fallback) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(fallback)) => Ok(fallback.to_string()),
        (Err(_), None) => anyhow::bail!("environment variable not found: `{name}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = "[patterns]\ncode = '^[a-z_]+$'\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn substitutes_variables() {
        let vars = [("LMERROR_CODE", Some("^[a-z]+$")), ("LMERROR_FILTER", Some("debug"))];
        temp_env::with_vars(vars, || {
            let result = expand_env("code = '{{ env.LMERROR_CODE }}'\nfilter = \"{{env.LMERROR_FILTER}}\"").unwrap();
            assert_eq!(result, "code = '^[a-z]+$'\nfilter = \"debug\"");
        });
    }

    #[test]
    fn missing_variable_is_an_error() {
        temp_env::with_var_unset("LMERROR_MISSING", || {
            let err = expand_env("code = '{{ env.LMERROR_MISSING }}'").unwrap_err();
            assert!(err.to_string().contains("LMERROR_MISSING"));
        });
    }

    #[test]
    fn default_applies_only_when_unset() {
        temp_env::with_var_unset("LMERROR_OPTIONAL", || {
            let result = expand_env("filter = \"{{ env.LMERROR_OPTIONAL | default(\"warn\") }}\"").unwrap();
            assert_eq!(result, "filter = \"warn\"");
        });

        temp_env::with_var("LMERROR_OPTIONAL", Some("trace"), || {
            let result = expand_env("filter = \"{{ env.LMERROR_OPTIONAL | default(\"warn\") }}\"").unwrap();
            assert_eq!(result, "filter = \"trace\"");
        });
    }

    #[test]
    fn other_scopes_are_rejected() {
        let err = expand_env("code = '{{ secrets.CODE }}'").unwrap_err();
        assert!(err.to_string().contains("only variables scoped with 'env.'"));

        let err = expand_env("code = '{{ env.A.B }}'").unwrap_err();
        assert!(err.to_string().contains("only variables scoped with 'env.'"));
    }

    #[test]
    fn comments_are_not_expanded() {
        temp_env::with_var_unset("LMERROR_MISSING", || {
            let input = "  # code = '{{ env.LMERROR_MISSING }}'\nfilter = \"info\"";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }
}
