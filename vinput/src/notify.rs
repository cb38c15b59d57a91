//! Change notification for settled validations.

use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;

use crate::field::FieldId;

/// Name of the event published on every settle.
pub const VALIDATION_CHANGED: &str = "validation-changed";

/// Published once per settled validation.
///
/// Carries no validation data: observers re-read the field's properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationChanged {
    /// The field whose validation state changed.
    pub field: FieldId,
    /// The event propagates to ancestors of the field.
    pub bubbles: bool,
    /// The event crosses shadow/encapsulation boundaries.
    pub composed: bool,
}

impl ValidationChanged {
    pub fn new(field: FieldId) -> Self {
        Self {
            field,
            bubbles: true,
            composed: true,
        }
    }

    pub fn name(&self) -> &'static str {
        VALIDATION_CHANGED
    }
}

type Listener = Arc<dyn Fn(&ValidationChanged) + Send + Sync>;

/// Fans settle events out to callbacks and async subscribers.
pub struct ChangeNotifier {
    listeners: RwLock<Vec<Listener>>,
    tx: broadcast::Sender<ValidationChanged>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self {
            listeners: RwLock::new(Vec::new()),
            tx,
        }
    }

    /// Register a callback invoked synchronously on every settle.
    pub fn on_change<F>(&self, f: F)
    where
        F: Fn(&ValidationChanged) + Send + Sync + 'static,
    {
        self.listeners
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Arc::new(f));
    }

    /// Subscribe to settle events from async code.
    ///
    /// Slow receivers may observe `RecvError::Lagged`; since events carry no
    /// data, skipping is harmless.
    pub fn subscribe(&self) -> broadcast::Receiver<ValidationChanged> {
        self.tx.subscribe()
    }

    /// Publish an event to every listener and subscriber.
    ///
    /// Callbacks run outside the listener lock so they may register more
    /// listeners.
    pub fn emit(&self, event: ValidationChanged) {
        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        for listener in listeners {
            listener(&event);
        }
        // No subscribers is not an error
        let _ = self.tx.send(event);
    }

    pub fn listener_count(&self) -> usize {
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len();
        listeners + self.tx.receiver_count()
    }
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn poison(notifier: &ChangeNotifier) {
        std::thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _guard = notifier.listeners.write();
                    panic!("poison listener lock");
                })
                .join();
        });
    }

    #[test]
    fn test_poisoned_lock_keeps_registrations() {
        let notifier = ChangeNotifier::new();
        poison(&notifier);
        assert!(notifier.listeners.is_poisoned());

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        notifier.on_change(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(notifier.listener_count(), 1);

        notifier.emit(ValidationChanged::new(crate::InputField::new().id()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
