//! The input field: a typed value, its constraints and the validation
//! pipeline wired together.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, trace};
use tokio::runtime::Handle;
use tokio::sync::broadcast;

use crate::config::FieldConfig;
use crate::constraints::{Constraints, compile_pattern};
use crate::debounce::Debouncer;
use crate::engine::{Phase, Ticket, ValidationEngine};
use crate::error::FieldError;
use crate::focus;
use crate::host::{ContainerClass, FieldHost, NativeControl};
use crate::notify::{ChangeNotifier, ValidationChanged};
use crate::validation::{
    DefaultRule, ValidationOutcome, ValidationResult, Validator, ValidatorSet, check,
};
use crate::value::{Kind, Value, coerce};

/// Unique identifier for an InputField instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(usize);

impl FieldId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for FieldId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__vinput_{}", self.0)
    }
}

/// Resources that only exist while the field is attached to a host.
struct Attachment {
    runtime: Handle,
    host: Arc<dyn FieldHost>,
    debouncer: Debouncer<String>,
}

/// Mutable field state
struct FieldInner {
    value: Value,
    constraints: Constraints,
    disabled: bool,
    label: String,
    placeholder: String,
    title: String,
    step: Option<String>,
    validators: ValidatorSet,
    engine: ValidationEngine,
    attachment: Option<Attachment>,
}

struct Shared {
    id: FieldId,
    config: FieldConfig,
    inner: RwLock<FieldInner>,
    /// Serializes the settle step so presentation updates apply in order.
    settle: Mutex<()>,
    notifier: ChangeNotifier,
}

/// Everything an evaluation needs, captured when it is initiated.
struct Evaluation {
    ticket: Ticket,
    validators: ValidatorSet,
    value: Value,
    constraints: Constraints,
}

/// A form input field with reactive validation.
///
/// `InputField` is cheap to clone; clones share the same state. Property
/// setters re-run validation in the background once the field is attached.
/// Raw input from the native control goes through [`on_input`](Self::on_input),
/// which debounces it before coercing and committing the value.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use vinput::prelude::*;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), FieldError> {
/// let field = InputField::new();
/// field.set_kind(Kind::Number);
/// field.set_min(Some(5.0));
/// field.set_max(Some(10.0));
/// field.set_value(3);
/// field.attach(Arc::new(DetachedHost))?;
///
/// let outcome = field.validate().await?;
/// assert_eq!(outcome.result().unwrap().messages, vec!["exceeds minimum value 5"]);
/// assert!(field.invalid());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct InputField {
    shared: Arc<Shared>,
}

impl InputField {
    /// Create a text field with the default configuration.
    pub fn new() -> Self {
        Self::with_config(FieldConfig::default())
    }

    /// Create a text field with the given configuration.
    pub fn with_config(config: FieldConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                id: FieldId::new(),
                config,
                inner: RwLock::new(FieldInner {
                    value: Value::Null,
                    constraints: Constraints::default(),
                    disabled: false,
                    label: String::new(),
                    placeholder: String::new(),
                    title: String::new(),
                    step: None,
                    validators: ValidatorSet::new(),
                    engine: ValidationEngine::new(),
                    attachment: None,
                }),
                settle: Mutex::new(()),
                notifier: ChangeNotifier::new(),
            }),
        }
    }

    /// Get the unique ID for this field
    pub fn id(&self) -> FieldId {
        self.shared.id
    }

    pub fn config(&self) -> &FieldConfig {
        &self.shared.config
    }

    fn read(&self) -> RwLockReadGuard<'_, FieldInner> {
        self.shared
            .inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, FieldInner> {
        self.shared
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Apply `f` and re-run validation if it reports a change.
    fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut FieldInner) -> bool,
    {
        let changed = {
            let mut guard = self.write();
            f(&mut *guard)
        };
        if changed {
            self.revalidate();
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Attach the field to its host.
    ///
    /// Installs the built-in rule at index 0, starts the input debouncer and
    /// runs the first validation in the background. Must be called from
    /// within a tokio runtime.
    pub fn attach(&self, host: Arc<dyn FieldHost>) -> Result<(), FieldError> {
        let runtime = Handle::try_current().map_err(|_| FieldError::NoRuntime)?;

        let evaluation = {
            let mut guard = self.write();
            if guard.attachment.is_some() {
                return Err(FieldError::AlreadyAttached(self.id().to_string()));
            }

            let weak = Arc::downgrade(&self.shared);
            let debouncer = Debouncer::spawn(&runtime, self.shared.config.debounce, move |raw: String| {
                if let Some(shared) = weak.upgrade() {
                    InputField { shared }.commit_raw(&raw);
                }
            });

            guard
                .validators
                .install_default(DefaultRule::new(self.shared.config.messages.clone()));
            guard.attachment = Some(Attachment {
                runtime: runtime.clone(),
                host,
                debouncer,
            });
            debug!("field {} attached", self.id());
            Self::begin(&mut guard)
        };

        self.spawn_evaluation(&runtime, evaluation);
        Ok(())
    }

    /// Detach the field from its host.
    ///
    /// Cancels any pending debounced commit, discards the validator set and
    /// the last result, and makes sure evaluations still in flight never
    /// touch the host again. Detaching a detached field does nothing.
    pub fn detach(&self) {
        let attachment = {
            let mut guard = self.write();
            let Some(attachment) = guard.attachment.take() else {
                return;
            };
            guard.engine.reset();
            guard.validators = ValidatorSet::new();
            attachment
        };
        attachment.debouncer.cancel();
        debug!("field {} detached", self.id());
    }

    pub fn is_attached(&self) -> bool {
        self.read().attachment.is_some()
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Re-run validation and wait for it to settle.
    ///
    /// Returns [`ValidationOutcome::Superseded`] if a newer evaluation was
    /// initiated (or the field was detached) before this one completed.
    pub async fn validate(&self) -> Result<ValidationOutcome, FieldError> {
        let evaluation = {
            let mut guard = self.write();
            if guard.attachment.is_none() {
                return Err(FieldError::NotAttached(self.id().to_string()));
            }
            Self::begin(&mut guard)
        };
        Ok(self.finish(evaluation).await)
    }

    /// Register an additional validator after the existing ones.
    ///
    /// Does not trigger validation by itself; call [`validate`](Self::validate)
    /// to apply the new rule right away.
    pub fn add_validator<V: Validator + 'static>(&self, validator: V) {
        self.write().validators.push(Arc::new(validator));
    }

    /// Number of registered validators, the built-in rule included.
    pub fn validator_count(&self) -> usize {
        self.read().validators.len()
    }

    /// Run the built-in rule against `value` with the current constraints.
    ///
    /// Returns the `;`-joined messages, or `None` if the value passes.
    pub fn default_validators(&self, value: &Value) -> Option<String> {
        let constraints = self.read().constraints.clone();
        let failures = check(value, &constraints, &self.shared.config.messages);
        if failures.is_empty() {
            None
        } else {
            Some(failures.join(";"))
        }
    }

    fn begin(guard: &mut FieldInner) -> Evaluation {
        Evaluation {
            ticket: guard.engine.begin(),
            validators: guard.validators.clone(),
            value: guard.value.clone(),
            constraints: guard.constraints.clone(),
        }
    }

    /// Initiate an evaluation now and let it complete in the background.
    fn revalidate(&self) {
        let started = {
            let mut guard = self.write();
            let Some(runtime) = guard.attachment.as_ref().map(|a| a.runtime.clone()) else {
                return;
            };
            (runtime, Self::begin(&mut guard))
        };
        let (runtime, evaluation) = started;
        self.spawn_evaluation(&runtime, evaluation);
    }

    fn spawn_evaluation(&self, runtime: &Handle, evaluation: Evaluation) {
        let field = self.clone();
        runtime.spawn(async move {
            field.finish(evaluation).await;
        });
    }

    async fn finish(&self, evaluation: Evaluation) -> ValidationOutcome {
        let Evaluation {
            ticket,
            validators,
            value,
            constraints,
        } = evaluation;
        let messages = validators
            .evaluate(&value, &constraints, &self.shared.config.messages.failed)
            .await;
        self.settle(ticket, messages)
    }

    fn settle(&self, ticket: Ticket, messages: Vec<String>) -> ValidationOutcome {
        let result = {
            let _serial = self
                .shared
                .settle
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());

            let (result, disabled, host) = {
                let mut guard = self.write();
                let Some(host) = guard.attachment.as_ref().map(|a| Arc::clone(&a.host)) else {
                    return self.discard_detached(ticket);
                };
                let result = ValidationResult::new(messages, guard.disabled, &self.shared.config.messages.empty);
                if !guard.engine.settle(ticket, result.clone()) {
                    return ValidationOutcome::Superseded;
                }
                (result, guard.disabled, host)
            };

            trace!(
                "field {} settled #{}: {} message(s)",
                self.id(),
                ticket.generation(),
                result.messages.len()
            );

            // Host callbacks may detach the field; stop touching the host once they do.
            host.toggle_class(ContainerClass::Required, result.required_empty && !disabled);
            if !self.is_attached() {
                return self.discard_detached(ticket);
            }
            host.toggle_class(ContainerClass::Invalid, result.invalid);
            if !self.is_attached() {
                return self.discard_detached(ticket);
            }
            host.dispatch(&ValidationChanged::new(self.id()));
            result
        };

        // Listeners run outside the settle lock so they may drive validation themselves.
        if !self.is_attached() {
            return self.discard_detached(ticket);
        }
        self.shared.notifier.emit(ValidationChanged::new(self.id()));

        ValidationOutcome::Applied(result)
    }

    fn discard_detached(&self, ticket: Ticket) -> ValidationOutcome {
        debug!(
            "field {} detached, discarding evaluation #{}",
            self.id(),
            ticket.generation()
        );
        ValidationOutcome::Superseded
    }

    /// Whether the field is flagged invalid. Always `false` while disabled.
    pub fn invalid(&self) -> bool {
        self.read().engine.result().invalid
    }

    /// Whether the last result contains the canonical empty-value message.
    ///
    /// Recorded even while disabled; only the presentation is suppressed.
    pub fn required_empty(&self) -> bool {
        self.read().engine.result().required_empty
    }

    /// Messages of the last applied result.
    pub fn messages(&self) -> Vec<String> {
        self.read().engine.result().messages.clone()
    }

    /// The last applied result.
    pub fn result(&self) -> ValidationResult {
        self.read().engine.result().clone()
    }

    pub fn phase(&self) -> Phase {
        self.read().engine.phase()
    }

    // -------------------------------------------------------------------------
    // Change notification
    // -------------------------------------------------------------------------

    /// Register a callback invoked on every settled validation.
    ///
    /// Callbacks run after the settle step has finished, so they may read
    /// properties, change them or even drive another validation to completion.
    pub fn on_change<F>(&self, f: F)
    where
        F: Fn(&ValidationChanged) + Send + Sync + 'static,
    {
        self.shared.notifier.on_change(f);
    }

    /// Subscribe to settled validations from async code.
    pub fn subscribe(&self) -> broadcast::Receiver<ValidationChanged> {
        self.shared.notifier.subscribe()
    }

    // -------------------------------------------------------------------------
    // Native control events
    // -------------------------------------------------------------------------

    /// Feed raw text from the native control's input event.
    ///
    /// The value is committed after the quiet window, coerced per kind.
    pub fn on_input(&self, raw: impl Into<String>) -> Result<(), FieldError> {
        let guard = self.read();
        match guard.attachment.as_ref() {
            Some(attachment) => {
                attachment.debouncer.push(raw.into());
                Ok(())
            }
            None => Err(FieldError::NotAttached(self.id().to_string())),
        }
    }

    fn commit_raw(&self, raw: &str) {
        let kind = {
            let guard = self.read();
            if guard.attachment.is_none() {
                return;
            }
            guard.constraints.kind
        };
        trace!("field {} committing debounced input", self.id());
        self.set_value(coerce(raw, kind));
    }

    /// Handle focus on the native control: move the caret to the end of the
    /// displayed text where the kind allows it.
    pub fn on_focus(&self, control: &mut dyn NativeControl) -> Option<usize> {
        let (kind, text) = {
            let guard = self.read();
            (guard.constraints.kind, guard.value.to_string())
        };
        focus::place_caret_at_end(kind, &text, control)
    }

    // -------------------------------------------------------------------------
    // Properties
    // -------------------------------------------------------------------------

    pub fn value(&self) -> Value {
        self.read().value.clone()
    }

    /// Set the value. Re-runs validation if it changed.
    pub fn set_value(&self, value: impl Into<Value>) {
        let value = value.into();
        self.update(|inner| {
            if inner.value == value {
                return false;
            }
            inner.value = value;
            true
        });
    }

    pub fn kind(&self) -> Kind {
        self.read().constraints.kind
    }

    pub fn set_kind(&self, kind: Kind) {
        self.update(|inner| {
            let changed = inner.constraints.kind != kind;
            inner.constraints.kind = kind;
            changed
        });
    }

    pub fn pattern(&self) -> Option<String> {
        self.read()
            .constraints
            .pattern
            .as_ref()
            .map(|p| p.source().to_string())
    }

    /// Set the pattern. `None` or `""` removes it.
    ///
    /// A pattern that does not compile is rejected and the previous pattern
    /// stays in place.
    pub fn set_pattern(&self, pattern: Option<&str>) -> Result<(), FieldError> {
        let pattern = compile_pattern(pattern)?;
        self.update(|inner| {
            let changed = inner.constraints.pattern != pattern;
            inner.constraints.pattern = pattern;
            changed
        });
        Ok(())
    }

    pub fn min(&self) -> Option<f64> {
        self.read().constraints.min
    }

    pub fn set_min(&self, min: Option<f64>) {
        self.update(|inner| {
            let changed = inner.constraints.min != min;
            inner.constraints.min = min;
            changed
        });
    }

    pub fn max(&self) -> Option<f64> {
        self.read().constraints.max
    }

    pub fn set_max(&self, max: Option<f64>) {
        self.update(|inner| {
            let changed = inner.constraints.max != max;
            inner.constraints.max = max;
            changed
        });
    }

    pub fn required(&self) -> bool {
        self.read().constraints.required
    }

    pub fn set_required(&self, required: bool) {
        self.update(|inner| {
            let changed = inner.constraints.required != required;
            inner.constraints.required = required;
            changed
        });
    }

    /// Snapshot of the constraint set.
    pub fn constraints(&self) -> Constraints {
        self.read().constraints.clone()
    }

    /// Replace the whole constraint set with a single re-validation.
    pub fn set_constraints(&self, constraints: Constraints) {
        self.update(|inner| {
            let changed = inner.constraints != constraints;
            inner.constraints = constraints;
            changed
        });
    }

    pub fn disabled(&self) -> bool {
        self.read().disabled
    }

    /// Enable or disable the field.
    ///
    /// A disabled field keeps validating but is never flagged invalid.
    pub fn set_disabled(&self, disabled: bool) {
        self.update(|inner| {
            let changed = inner.disabled != disabled;
            inner.disabled = disabled;
            changed
        });
    }

    pub fn label(&self) -> String {
        self.read().label.clone()
    }

    pub fn set_label(&self, label: impl Into<String>) {
        self.write().label = label.into();
    }

    pub fn placeholder(&self) -> String {
        self.read().placeholder.clone()
    }

    pub fn set_placeholder(&self, placeholder: impl Into<String>) {
        self.write().placeholder = placeholder.into();
    }

    pub fn title(&self) -> String {
        self.read().title.clone()
    }

    pub fn set_title(&self, title: impl Into<String>) {
        self.write().title = title.into();
    }

    pub fn step(&self) -> Option<String> {
        self.read().step.clone()
    }

    pub fn set_step(&self, step: Option<String>) {
        self.write().step = step;
    }

    // -------------------------------------------------------------------------
    // Presentation
    // -------------------------------------------------------------------------

    /// Text to render into the native control. `Null` renders as `""`.
    pub fn display_text(&self) -> String {
        self.read().value.to_string()
    }

    /// Tooltip for the native control.
    ///
    /// Empty for passwords; otherwise the title, falling back to the
    /// displayed value.
    pub fn tooltip(&self) -> String {
        let guard = self.read();
        if guard.constraints.kind == Kind::Password {
            return String::new();
        }
        if !guard.title.is_empty() {
            return guard.title.clone();
        }
        guard.value.to_string()
    }

    /// Tab index of the native control: `-1` takes a disabled field out of
    /// the tab order.
    pub fn tab_index(&self) -> i32 {
        if self.read().disabled { -1 } else { 0 }
    }
}

impl Default for InputField {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InputField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.read();
        f.debug_struct("InputField")
            .field("id", &self.shared.id)
            .field("value", &guard.value)
            .field("constraints", &guard.constraints)
            .field("disabled", &guard.disabled)
            .field("phase", &guard.engine.phase())
            .field("attached", &guard.attachment.is_some())
            .finish()
    }
}
