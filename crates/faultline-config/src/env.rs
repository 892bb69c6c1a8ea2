use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use thiserror::Error;

/// Failure to expand a `{{ env.VAR }}` placeholder
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpandError {
    /// Variable is unset and the placeholder has no default
    #[error("environment variable not found: `{0}`")]
    MissingVariable(String),
    /// Placeholder is not of the form `env.NAME`
    #[error("only variables scoped with 'env.' are supported: `{0}`")]
    UnsupportedScope(String),
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // group 1: key, group 2: optional default("...") value
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\)\s*)?\}\}"#)
            .expect("placeholder pattern must compile")
    })
}

/// Expand `{{ env.VAR }}` and `{{ env.VAR | default("x") }}` in raw TOML
///
/// Comment lines are passed through untouched so commented-out settings
/// never require their variables to be set.
pub fn expand_env(input: &str) -> Result<String, ExpandError> {
    let mut expanded = input
        .lines()
        .map(expand_line)
        .collect::<Result<Vec<_>, _>>()?
        .join("\n");

    if input.ends_with('\n') {
        expanded.push('\n');
    }

    Ok(expanded)
}

fn expand_line(line: &str) -> Result<Cow<'_, str>, ExpandError> {
    if line.trim_start().starts_with('#') {
        return Ok(Cow::Borrowed(line));
    }

    let mut failure = None;
    let expanded = placeholder().replace_all(line, |captures: &Captures<'_>| {
        let default = captures.get(2).map(|m| m.as_str());
        resolve(&captures[1], default).unwrap_or_else(|e| {
            failure.get_or_insert(e);
            String::new()
        })
    });

    failure.map_or(Ok(expanded), Err)
}

fn resolve(key: &str, default: Option<&str>) -> Result<String, ExpandError> {
    let Some(name) = key
        .strip_prefix("env.")
        .filter(|name| !name.is_empty() && !name.contains('.'))
    else {
        return Err(ExpandError::UnsupportedScope(key.to_string()));
    };

    match (std::env::var(name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(fallback)) => Ok(fallback.to_string()),
        (Err(_), None) => Err(ExpandError::MissingVariable(name.to_string())),
    }
}
