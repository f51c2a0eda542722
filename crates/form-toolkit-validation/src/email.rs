//! Email validation

use once_cell::sync::Lazy;
use regex::Regex;

// One "@", no whitespace around it, and a dot somewhere after it.
// U+FEFF is not White_Space in Unicode but counts as whitespace in forms.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").unwrap()
});

/// Validates basic email format
///
/// Intentionally permissive, not RFC 5322 complete:
/// - exactly one '@' with content on both sides
/// - at least one '.' in the domain part, with content after it
/// - no whitespace anywhere
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
