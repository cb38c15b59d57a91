//! Reactive validation engine and input normalization for form input widgets.
//!
//! The widget framework owns rendering; this crate owns the logic behind a
//! single input: coercing raw text into a typed [`Value`](value::Value),
//! debouncing keystrokes, running an ordered set of (possibly async)
//! validators, deriving the `invalid` / `required_empty` flags and
//! announcing every settled validation.

pub mod config;
pub mod constraints;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod field;
pub mod focus;
pub mod host;
pub mod notify;
pub mod validation;
pub mod value;

pub use field::InputField;

pub mod prelude {
    pub use crate::config::{FieldConfig, Messages};
    pub use crate::constraints::{Constraints, Pattern};
    pub use crate::engine::Phase;
    pub use crate::error::{ConfigError, FieldError, RuleError};
    pub use crate::field::{FieldId, InputField};
    pub use crate::host::{ContainerClass, DetachedHost, FieldHost, NativeControl};
    pub use crate::notify::{VALIDATION_CHANGED, ValidationChanged};
    pub use crate::validation::{
        RuleOutcome, ValidationOutcome, ValidationResult, Validator, rule, rule_async,
    };
    pub use crate::value::{Kind, Value, coerce};
}
