//! The validator contract and closure adapters.

use std::future::Future;
use std::pin::Pin;

use crate::constraints::Constraints;
use crate::error::RuleError;
use crate::value::Value;

/// Type alias for boxed futures used in async validation.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// What a validator produces: its failure messages, or an error when it
/// could not decide.
pub type RuleOutcome = Result<Vec<String>, RuleError>;

/// A single validation rule.
///
/// Validators receive a snapshot of the value and constraints taken when the
/// evaluation started. Synchronous rules return an already-completed future.
pub trait Validator: Send + Sync {
    fn validate(&self, value: &Value, constraints: &Constraints) -> BoxFuture<'static, RuleOutcome>;
}

struct SyncRule<F>(F);

impl<F> Validator for SyncRule<F>
where
    F: Fn(&Value, &Constraints) -> Vec<String> + Send + Sync,
{
    fn validate(&self, value: &Value, constraints: &Constraints) -> BoxFuture<'static, RuleOutcome> {
        let messages = (self.0)(value, constraints);
        Box::pin(std::future::ready(Ok(messages)))
    }
}

struct AsyncRule<F>(F);

impl<F, Fut> Validator for AsyncRule<F>
where
    F: Fn(Value, Constraints) -> Fut + Send + Sync,
    Fut: Future<Output = RuleOutcome> + Send + 'static,
{
    fn validate(&self, value: &Value, constraints: &Constraints) -> BoxFuture<'static, RuleOutcome> {
        Box::pin((self.0)(value.clone(), constraints.clone()))
    }
}

/// Wrap a synchronous closure as a validator.
pub fn rule<F>(f: F) -> impl Validator
where
    F: Fn(&Value, &Constraints) -> Vec<String> + Send + Sync + 'static,
{
    SyncRule(f)
}

/// Wrap an async closure as a validator.
///
/// The closure receives owned snapshots so the returned future can outlive
/// the call.
pub fn rule_async<F, Fut>(f: F) -> impl Validator
where
    F: Fn(Value, Constraints) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = RuleOutcome> + Send + 'static,
{
    AsyncRule(f)
}
