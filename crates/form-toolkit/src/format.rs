// File: crates/form-toolkit/src/format.rs
// Purpose: Display formatting for phone numbers, names and dates

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::FormatError;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Strips non-digits and dashes the first ten as `XXX-XXX-XXXX`
///
/// Digits past the tenth are kept after the last group. Fewer than ten
/// digits are returned undashed.
pub fn format_phone_number(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 10 {
        return digits;
    }
    format!("{}-{}-{}{}", &digits[..3], &digits[3..6], &digits[6..10], &digits[10..])
}

/// Upper-cases the first character of every word
///
/// Word characters are ASCII letters, digits and `_`; everything else
/// (including non-ASCII letters) separates words.
pub fn capitalize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut previous_is_word = false;
    for c in name.chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !previous_is_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        previous_is_word = is_word;
    }
    out
}

/// Parses a date or date-time and renders it as `YYYY-MM-DD`
///
/// Offsets in RFC 3339 input are honored as written (no conversion to the
/// local zone).
pub fn format_date(input: &str) -> Result<String, FormatError> {
    parse_date(input)
        .map(format_naive_date)
        .ok_or_else(|| FormatError::UnparsableDate(input.to_string()))
}

/// Renders `date` as `YYYY-MM-DD`
pub fn format_naive_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Some(datetime.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|datetime| datetime.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        })
}
