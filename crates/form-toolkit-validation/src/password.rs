//! Password validation

/// Minimum number of characters a password must have
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validates password strength
///
/// A password passes when it has at least 8 characters, at least one
/// ASCII letter (either case) and at least one ASCII digit.
pub fn validate_password(password: &str) -> bool {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return false;
    }

    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    has_letter && has_digit
}

/// Explains why a password fails, for callers that want a message
pub fn password_error(password: &str) -> Option<&'static str> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Some("Password must be at least 8 characters");
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Some("Password must contain at least one letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some("Password must contain at least one digit");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_passwords() {
        assert!(validate_password("password1"));
        assert!(validate_password("PASSWORD1"));
        assert!(validate_password("12345678a"));
        assert!(validate_password("Secure@Pass1"));
    }

    #[test]
    fn test_invalid_passwords() {
        assert!(!validate_password("password"));
        assert!(!validate_password("12345678"));
        assert!(!validate_password("!!!!!!!!"));
        assert!(!validate_password(""));
    }

    #[test]
    fn test_short_passwords_always_fail() {
        for s in ["a1", "abc1234", "A1b2C3d", "       "] {
            assert!(s.chars().count() < 8);
            assert!(!validate_password(s));
        }
    }

    #[test]
    fn test_password_error_messages() {
        assert_eq!(
            password_error("short1"),
            Some("Password must be at least 8 characters")
        );
        assert_eq!(
            password_error("12345678"),
            Some("Password must contain at least one letter")
        );
        assert_eq!(
            password_error("abcdefgh"),
            Some("Password must contain at least one digit")
        );
        assert_eq!(password_error("abcdefg1"), None);
    }
}
