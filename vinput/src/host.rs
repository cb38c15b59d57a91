//! Traits implemented by the surrounding widget framework.
//!
//! The field never renders anything itself. It reports presentation state
//! through a [`FieldHost`] and positions the caret through a
//! [`NativeControl`].

use crate::notify::ValidationChanged;

/// Presentation classes toggled on the field's visual container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerClass {
    /// The value is required and currently empty.
    Required,
    /// The field is invalid.
    Invalid,
}

impl ContainerClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Invalid => "invalid",
        }
    }
}

/// The host context a field is attached to.
///
/// Both methods are called from inside the field's settle step. They may
/// read properties or detach the field, but must not block on `validate()`.
pub trait FieldHost: Send + Sync {
    /// Add (`on == true`) or remove a class on the visual container.
    fn toggle_class(&self, class: ContainerClass, on: bool);

    /// Publish an event into the host's event tree.
    fn dispatch(&self, event: &ValidationChanged);
}

/// Host for headless use: ignores presentation and dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedHost;

impl FieldHost for DetachedHost {
    fn toggle_class(&self, _class: ContainerClass, _on: bool) {}

    fn dispatch(&self, _event: &ValidationChanged) {}
}

/// The native input control bound to a field.
pub trait NativeControl {
    /// Whether the control supports selection-range operations.
    fn supports_selection(&self) -> bool;

    /// Select `start..end`, in characters. Equal bounds place the caret.
    fn set_selection_range(&mut self, start: usize, end: usize);
}
