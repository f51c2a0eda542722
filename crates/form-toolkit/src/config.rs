// File: crates/form-toolkit/src/config.rs
// Purpose: Configuration parsing from form-toolkit.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Toolkit configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ToolkitConfig {
    #[serde(default)]
    pub annotation: AnnotationConfig,

    #[serde(default)]
    pub submission: SubmissionConfig,

    #[serde(default)]
    pub messages: MessagesConfig,
}

/// How error annotations are rendered next to fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnotationConfig {
    #[serde(default = "default_annotation_tag")]
    pub tag: String,

    #[serde(default = "default_annotation_class")]
    pub class: String,
}

/// Outbound request settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmissionConfig {
    /// Value of the `Accept` header
    #[serde(default = "default_accept")]
    pub accept: String,
}

/// Default user-facing notifications
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessagesConfig {
    #[serde(default = "default_success_message")]
    pub success: String,

    #[serde(default = "default_error_message")]
    pub error: String,
}

fn default_annotation_tag() -> String {
    "span".to_string()
}

fn default_annotation_class() -> String {
    "error-message".to_string()
}

fn default_accept() -> String {
    "application/json".to_string()
}

fn default_success_message() -> String {
    "Form submitted successfully".to_string()
}

fn default_error_message() -> String {
    "Form submission failed".to_string()
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            tag: default_annotation_tag(),
            class: default_annotation_class(),
        }
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            accept: default_accept(),
        }
    }
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            success: default_success_message(),
            error: default_error_message(),
        }
    }
}

impl ToolkitConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./form-toolkit.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("form-toolkit.toml")
    }

    /// Parse configuration from TOML text; blank text yields defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }
}
