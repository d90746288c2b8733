//! Environment variable expansion for config files.
//!
//! Supported forms:
//! - `$VAR` or `${VAR}` - substitute with the variable, error if unset
//! - `${VAR:-default}` - use default if VAR is unset or empty
//! - `${VAR-default}` - use default only if VAR is unset
//! - `$$` - literal `$`

use regex::{Captures, Regex};
use std::sync::LazyLock;

static VAR_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \$\$
        |
        \$\{
            (?P<braced>[A-Za-z_][A-Za-z0-9_]*)
            (?: (?P<op>:?-) (?P<default>[^}]*) )?
        \}
        |
        \$(?P<bare>[A-Za-z_][A-Za-z0-9_]*)
        ",
    )
    .expect("variable reference pattern is valid")
});

/// Expand variable references using the process environment.
///
/// All problems are collected so a config with several missing variables
/// reports them together.
pub fn expand_env(input: &str) -> Result<String, Vec<String>> {
    expand_with(input, |name| std::env::var(name).ok())
}

/// Expand variable references using an arbitrary lookup.
pub fn expand_with<F>(input: &str, lookup: F) -> Result<String, Vec<String>>
where
    F: Fn(&str) -> Option<String>,
{
    let mut problems = Vec::new();

    let expanded = VAR_REFERENCE.replace_all(input, |caps: &Captures| {
        let whole = &caps[0];
        if whole == "$$" {
            return "$".to_string();
        }

        let Some(name) = caps.name("braced").or_else(|| caps.name("bare")) else {
            return whole.to_string();
        };
        let name = name.as_str();
        let op = caps.name("op").map(|m| m.as_str());
        let default = caps.name("default").map(|m| m.as_str());

        match lookup(name) {
            Some(value) if value.contains(['\n', '\r']) => {
                problems.push(format!("environment variable '{name}' contains a newline"));
                whole.to_string()
            }
            Some(value) if value.is_empty() && op == Some(":-") => {
                default.unwrap_or_default().to_string()
            }
            Some(value) => value,
            None => match default {
                Some(default) => default.to_string(),
                None => {
                    problems.push(format!("environment variable '{name}' is not set"));
                    whole.to_string()
                }
            },
        }
    });

    if problems.is_empty() {
        Ok(expanded.into_owned())
    } else {
        Err(problems)
    }
}
