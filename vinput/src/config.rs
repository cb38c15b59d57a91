//! Field configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Default quiet window of the input debouncer.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(50);

/// Per-field configuration.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use vinput::config::FieldConfig;
///
/// let config = FieldConfig::new().debounce(Duration::from_millis(100));
/// assert_eq!(config.debounce, Duration::from_millis(100));
///
/// let parsed = FieldConfig::from_json(r#"{ "debounce_ms": 80 }"#).unwrap();
/// assert_eq!(parsed.debounce, Duration::from_millis(80));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Quiet window the debouncer waits for before committing raw input.
    #[serde(rename = "debounce_ms", deserialize_with = "millis")]
    pub debounce: Duration,

    /// Message templates used by the built-in rule.
    pub messages: Messages,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            messages: Messages::default(),
        }
    }
}

impl FieldConfig {
    /// Create a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the debounce quiet window.
    pub fn debounce(mut self, window: Duration) -> Self {
        self.debounce = window;
        self
    }

    /// Replace the message templates.
    pub fn messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Parse a config from JSON. Missing keys keep their defaults.
    ///
    /// Blank message templates are rejected.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.messages.check()?;
        Ok(config)
    }
}

fn millis<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}

/// Message templates for the built-in rule.
///
/// Messages are opaque strings. `{pattern}`, `{min}` and `{max}` are replaced
/// literally; nothing else is interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Canonical "empty value" message. Its presence drives `required_empty`.
    pub empty: String,
    pub pattern: String,
    pub min: String,
    pub max: String,
    /// Contributed by a validator that fails or panics.
    pub failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            empty: "value cannot be empty".to_string(),
            pattern: "does not match pattern: {pattern}".to_string(),
            // Both bounds read "exceeds".
            min: "exceeds minimum value {min}".to_string(),
            max: "exceeds maximum value {max}".to_string(),
            failed: "validation failed".to_string(),
        }
    }
}

impl Messages {
    /// Reject blank templates.
    pub fn check(&self) -> Result<(), ConfigError> {
        let templates = [
            ("empty", &self.empty),
            ("pattern", &self.pattern),
            ("min", &self.min),
            ("max", &self.max),
            ("failed", &self.failed),
        ];
        match templates.iter().find(|(_, text)| text.trim().is_empty()) {
            Some((name, _)) => Err(ConfigError::BlankMessage(*name)),
            None => Ok(()),
        }
    }

    pub fn pattern_mismatch(&self, pattern: &str) -> String {
        self.pattern.replace("{pattern}", pattern)
    }

    pub fn below_min(&self, min: f64) -> String {
        self.min.replace("{min}", &min.to_string())
    }

    pub fn above_max(&self, max: f64) -> String {
        self.max.replace("{max}", &max.to_string())
    }
}
