//! Ordered validator collection and concurrent evaluation.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use futures::FutureExt;
use futures::future::join_all;
use log::warn;

use crate::constraints::Constraints;
use crate::error::{RuleError, panic_message};
use crate::value::Value;

use super::builtin::DefaultRule;
use super::validator::{RuleOutcome, Validator};

/// Ordered list of validators owned by one field.
///
/// The list only grows. The built-in rule is installed once, at index 0.
/// Cloning is cheap and yields a snapshot that can be evaluated without
/// holding the field's lock.
#[derive(Clone, Default)]
pub struct ValidatorSet {
    validators: Vec<Arc<dyn Validator>>,
    has_default: bool,
}

impl ValidatorSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the built-in rule at index 0. Later calls are ignored.
    pub fn install_default(&mut self, rule: DefaultRule) {
        if self.has_default {
            return;
        }
        self.validators.insert(0, Arc::new(rule));
        self.has_default = true;
    }

    pub fn has_default(&self) -> bool {
        self.has_default
    }

    /// Append a validator.
    pub fn push(&mut self, validator: Arc<dyn Validator>) {
        self.validators.push(validator);
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Run every validator and collect their messages.
    ///
    /// Validators are dispatched in list order and awaited together; the
    /// output keeps list order regardless of completion order. Messages from
    /// one validator are joined with `;`. Validators with nothing to report
    /// are skipped; blank messages from the built-in rule still count. A
    /// validator that errors or panics contributes `failed`.
    pub async fn evaluate(&self, value: &Value, constraints: &Constraints, failed: &str) -> Vec<String> {
        let pending = self.validators.iter().enumerate().map(|(index, validator)| {
            let builtin = self.has_default && index == 0;
            let dispatched =
                panic::catch_unwind(AssertUnwindSafe(|| validator.validate(value, constraints)));
            async move {
                let outcome: RuleOutcome = match dispatched {
                    Ok(future) => match AssertUnwindSafe(future).catch_unwind().await {
                        Ok(outcome) => outcome,
                        Err(panic) => Err(RuleError::Panicked(panic_message(&*panic))),
                    },
                    Err(panic) => Err(RuleError::Panicked(panic_message(&*panic))),
                };
                match outcome {
                    Ok(messages) => combine(messages, builtin),
                    Err(err) => {
                        warn!("validator #{index}: {err}");
                        Some(failed.to_string())
                    }
                }
            }
        });

        join_all(pending).await.into_iter().flatten().collect()
    }
}

impl std::fmt::Debug for ValidatorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorSet")
            .field("len", &self.validators.len())
            .field("has_default", &self.has_default)
            .finish()
    }
}

/// Join one validator's messages into a single composite message.
///
/// Empty strings are dropped unless `keep_blank` is set.
fn combine(messages: Vec<String>, keep_blank: bool) -> Option<String> {
    let parts: Vec<String> = messages
        .into_iter()
        .filter(|m| keep_blank || !m.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(";"))
    }
}
