//! Composite field validation from a declarative rule set

use serde::{Deserialize, Serialize};

use crate::{password_error, validate_date_format, validate_email, validate_required, validate_with_regex};

/// Validation error for a single field
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// Validation rules for a single field
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct FieldRules {
    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub email: bool,

    #[serde(default)]
    pub password: bool,

    #[serde(default)]
    pub date: bool,

    #[serde(default)]
    pub pattern: Option<String>,

    /// Overrides every generated message
    #[serde(default)]
    pub message: Option<String>,
}

impl FieldRules {
    fn message_or(&self, fallback: impl FnOnce() -> String) -> String {
        self.message.clone().unwrap_or_else(fallback)
    }
}

/// Validate a single field value against `rules`
///
/// A required-but-blank value reports only the required error. Blank values
/// that are not required skip every other rule.
pub fn validate_field(field_name: &str, value: &str, rules: &FieldRules) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut push = |message: String| {
        errors.push(ValidationError {
            field: field_name.to_string(),
            message,
        })
    };

    if !validate_required(value) {
        if rules.required {
            push(rules.message_or(|| format!("{} is required", field_name)));
        }
        return errors;
    }

    if rules.email && !validate_email(value) {
        push(rules.message_or(|| "Invalid email address".to_string()));
    }

    if rules.password {
        if let Some(msg) = password_error(value) {
            push(rules.message_or(|| msg.to_string()));
        }
    }

    if rules.date && !validate_date_format(value) {
        push(rules.message_or(|| "Date must be in YYYY-MM-DD format".to_string()));
    }

    if let Some(ref pattern) = rules.pattern {
        if !validate_with_regex(value, pattern) {
            push(rules.message_or(|| format!("Must match pattern '{}'", pattern)));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_required_short_circuits() {
        let rules = FieldRules {
            required: true,
            email: true,
            ..Default::default()
        };
        let errors = validate_field("email", "  ", &rules);
        assert_eq!(
            errors,
            vec![ValidationError {
                field: "email".to_string(),
                message: "email is required".to_string(),
            }]
        );
    }

    #[test]
    fn test_optional_blank_skips_rules() {
        let rules = FieldRules {
            email: true,
            ..Default::default()
        };
        assert!(validate_field("email", "", &rules).is_empty());
    }

    #[test]
    fn test_collects_every_failure() {
        let rules = FieldRules {
            email: true,
            date: true,
            pattern: Some("^x".to_string()),
            ..Default::default()
        };
        let messages: Vec<String> = validate_field("f", "nope", &rules)
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Invalid email address".to_string(),
                "Date must be in YYYY-MM-DD format".to_string(),
                "Must match pattern '^x'".to_string(),
            ]
        );
    }

    #[test]
    fn test_custom_message_overrides() {
        let rules = FieldRules {
            password: true,
            message: Some("Pick a stronger password".to_string()),
            ..Default::default()
        };
        let errors = validate_field("password", "weak", &rules);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "Pick a stronger password");
    }

    #[test]
    fn test_rules_deserialize_camel_case() {
        let rules: FieldRules =
            serde_json::from_str(r#"{"required":true,"pattern":"\\d","message":"digits"}"#).unwrap();
        assert!(rules.required);
        assert_eq!(rules.pattern.as_deref(), Some("\\d"));
        assert_eq!(rules.message.as_deref(), Some("digits"));
        assert!(!rules.email);
    }

    #[test]
    fn test_valid_value_has_no_errors() {
        let rules = FieldRules {
            required: true,
            email: true,
            ..Default::default()
        };
        assert!(validate_field("email", "user@example.com", &rules).is_empty());
    }
}
