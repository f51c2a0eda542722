//! String validation functions

use once_cell::sync::Lazy;
use fancy_regex::Regex;
use std::collections::HashMap;
use std::sync::Mutex;

/// Required value: non-empty after trimming surrounding whitespace
pub fn validate_required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Regex pattern matching
///
/// True when `pattern` matches anywhere in `value`. Lookaround and
/// backreferences are supported. Compiled patterns are cached; an invalid
/// pattern never matches.
pub fn validate_with_regex(value: &str, pattern: &str) -> bool {
    static REGEX_CACHE: Lazy<Mutex<HashMap<String, Regex>>> =
        Lazy::new(|| Mutex::new(HashMap::new()));

    let mut cache = match REGEX_CACHE.lock() {
        Ok(cache) => cache,
        Err(poisoned) => poisoned.into_inner(),
    };

    if !cache.contains_key(pattern) {
        match Regex::new(pattern) {
            Ok(regex) => {
                cache.insert(pattern.to_string(), regex);
            }
            Err(err) => {
                tracing::warn!(pattern, error = %err, "invalid validation pattern");
                return false;
            }
        }
    }

    let Some(regex) = cache.get(pattern) else {
        return false;
    };
    match regex.is_match(value) {
        Ok(matched) => matched,
        Err(err) => {
            // Backtracking limit exceeded
            tracing::warn!(pattern, error = %err, "validation pattern failed to run");
            false
        }
    }
}
