//! Validation rules and their aggregation.
//!
//! A field owns a [`ValidatorSet`]: the built-in [`DefaultRule`] at index 0
//! followed by any validators registered by the embedding code. Each
//! validator returns zero or more messages for the current value; the set
//! runs them concurrently and collects one composite message per validator.
//!
//! # Example
//!
//! ```
//! use vinput::error::RuleError;
//! use vinput::validation::{rule, rule_async};
//! use vinput::value::Value;
//!
//! let no_spaces = rule(|value: &Value, _| match value {
//!     Value::Text(s) if s.contains(' ') => vec!["no spaces allowed".to_string()],
//!     _ => Vec::new(),
//! });
//!
//! let remote = rule_async(|value: Value, _| async move {
//!     if value == Value::from("taken") {
//!         Ok(vec!["name is taken".to_string()])
//!     } else if value == Value::from("offline") {
//!         Err(RuleError::failed("service unavailable"))
//!     } else {
//!         Ok(Vec::new())
//!     }
//! });
//! # let _ = (no_spaces, remote);
//! ```

mod builtin;
mod result;
mod set;
mod validator;

pub use builtin::{DefaultRule, check};
pub use result::{ValidationOutcome, ValidationResult};
pub use set::ValidatorSet;
pub use validator::{BoxFuture, RuleOutcome, Validator, rule, rule_async};
