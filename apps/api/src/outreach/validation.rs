use std::sync::OnceLock;

use regex::Regex;

/// Loose syntactic check: something@something.tld with no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    });
    re.is_match(email)
}

/// Returns the trimmed value if present and non-blank.
pub fn required(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
