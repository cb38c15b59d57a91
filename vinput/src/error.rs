//! Error types for field configuration and validator failures.
//!
//! Constraint violations are not errors: they are reported as messages on the
//! [`ValidationResult`](crate::validation::ValidationResult). The types here
//! cover caller mistakes and validators that fail to produce a verdict.

use std::any::Any;

use thiserror::Error;

/// Errors returned by [`InputField`](crate::field::InputField) operations.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The pattern assigned to the field is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern source as supplied by the caller.
        pattern: String,
        /// The compile error reported by the regex engine.
        #[source]
        source: regex::Error,
    },

    /// `attach` was called outside of a tokio runtime.
    #[error("field must be attached from within a tokio runtime")]
    NoRuntime,

    /// `attach` was called on a field that is already attached.
    #[error("field {0} is already attached")]
    AlreadyAttached(String),

    /// The operation needs an attached field.
    #[error("field {0} is not attached")]
    NotAttached(String),
}

/// Failure of a single validator.
///
/// A failing validator does not abort the evaluation. Its contribution is
/// replaced by the configured "validation failed" message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// The validator reported that it could not decide.
    #[error("validator failed: {0}")]
    Failed(String),

    /// The validator panicked while running.
    #[error("validator panicked: {0}")]
    Panicked(String),
}

impl RuleError {
    /// Creates a [`RuleError::Failed`] with the given reason.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

/// Errors that can occur when loading a [`FieldConfig`](crate::config::FieldConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid field config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A message template is blank and would be indistinguishable from "no message".
    #[error("message template '{0}' must not be blank")]
    BlankMessage(&'static str),
}

/// Extract a human-readable message from a panic payload.
///
/// Panics carry either `&str` or `String` payloads; anything else falls back
/// to a generic message.
pub fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
