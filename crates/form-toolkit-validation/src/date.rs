//! Date format validation

use once_cell::sync::Lazy;
use regex::Regex;

static DATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

/// Validates `YYYY-MM-DD` shape only
///
/// Calendar validity is not checked: "2024-13-99" passes. Only ASCII
/// digits count; other Unicode decimal digits are rejected.
pub fn validate_date_format(date: &str) -> bool {
    DATE_REGEX.is_match(date)
}
