//! Email address grammar.

use std::sync::LazyLock;

use regex::Regex;

/// Local part (dot-separated atoms or a quoted string), `@`, then either a
/// bracketed IPv4 literal or dotted labels ending in a TLD of 2+ letters.
const EMAIL_PATTERN: &str = r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Check whether `value` is an email address. Matching is case-insensitive.
pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(&value.to_lowercase())
}
