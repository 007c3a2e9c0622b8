//! Contract error types for panel settings
//!
//! Storage failures pass through unchanged; everything else is synthesized
//! with the offending key so callers can act on it.

use thiserror::Error;

/// Panel settings errors
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Row store failure, passed through verbatim
    #[error(transparent)]
    Storage(#[from] anyhow::Error),

    /// Stored or supplied value cannot be converted to the field's type
    #[error("setting '{key}' expects {expected} value, got '{value}': {reason}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        value: String,
        reason: String,
    },

    /// Aggregate cross-field check failed; nothing was written
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Neither a stored row nor a compiled-in default exists for the key
    #[error("setting '{key}' has no stored value and no default")]
    MissingDefault { key: String },

    /// Neither the stored nor the default zone name resolves
    #[error("time zone '{name}' does not exist")]
    InvalidTimeZone { name: String },

    /// Bulk write where one or more keys failed; earlier keys stay committed
    #[error("failed to save {} setting(s): {}", .failures.len(), format_failures(.failures))]
    PartialWrite { failures: Vec<(String, SettingsError)> },
}

impl SettingsError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Keys that failed in a bulk write, empty for any other error
    pub fn failed_keys(&self) -> Vec<&str> {
        match self {
            Self::PartialWrite { failures } => failures.iter().map(|(k, _)| k.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

fn format_failures(failures: &[(String, SettingsError)]) -> String {
    failures
        .iter()
        .map(|(key, err)| format!("{key}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}
