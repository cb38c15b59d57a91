//! The built-in rule: pattern, range and required checks.

use crate::config::Messages;
use crate::constraints::Constraints;
use crate::value::Value;

use super::validator::{BoxFuture, RuleOutcome, Validator};

/// Run the built-in checks against `value`.
///
/// All applicable checks run; every failure contributes a message, in the
/// order pattern, minimum, maximum, required.
pub fn check(value: &Value, constraints: &Constraints, messages: &Messages) -> Vec<String> {
    let mut failures = Vec::new();

    if let Some(pattern) = &constraints.pattern
        && !value.is_empty()
        && let Some(text) = value.to_text()
        && !pattern.is_match(&text)
    {
        failures.push(messages.pattern_mismatch(pattern.source()));
    }

    // NaN and empty values never take part in range checks
    if constraints.kind.is_numeric()
        && let Some(n) = value.as_number()
    {
        if let Some(min) = constraints.min
            && n < min
        {
            failures.push(messages.below_min(min));
        }
        if let Some(max) = constraints.max
            && n > max
        {
            failures.push(messages.above_max(max));
        }
    }

    if constraints.required && value.is_empty() {
        failures.push(messages.empty.clone());
    }

    failures
}

/// The built-in rule as a [`Validator`]. Always registered first.
#[derive(Debug, Clone, Default)]
pub struct DefaultRule {
    messages: Messages,
}

impl DefaultRule {
    pub fn new(messages: Messages) -> Self {
        Self { messages }
    }
}

impl Validator for DefaultRule {
    fn validate(&self, value: &Value, constraints: &Constraints) -> BoxFuture<'static, RuleOutcome> {
        let failures = check(value, constraints, &self.messages);
        Box::pin(std::future::ready(Ok(failures)))
    }
}
