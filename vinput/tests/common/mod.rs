#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use vinput::prelude::*;

/// Host that records class toggles and dispatched events.
#[derive(Debug, Default)]
pub struct RecordingHost {
    classes: Mutex<HashMap<ContainerClass, bool>>,
    events: Mutex<Vec<ValidationChanged>>,
}

impl RecordingHost {
    pub fn has_class(&self, class: ContainerClass) -> bool {
        self.classes
            .lock()
            .map(|guard| guard.get(&class).copied().unwrap_or(false))
            .unwrap_or(false)
    }

    pub fn events(&self) -> Vec<ValidationChanged> {
        self.events.lock().map(|guard| guard.clone()).unwrap_or_default()
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl FieldHost for RecordingHost {
    fn toggle_class(&self, class: ContainerClass, on: bool) {
        self.classes.lock().unwrap().insert(class, on);
    }

    fn dispatch(&self, event: &ValidationChanged) {
        self.events.lock().unwrap().push(*event);
    }
}

/// Native control that records the last selection range.
#[derive(Debug, Default)]
pub struct FakeControl {
    pub selection_supported: bool,
    pub selection: Option<(usize, usize)>,
}

impl FakeControl {
    pub fn with_selection() -> Self {
        Self {
            selection_supported: true,
            selection: None,
        }
    }
}

impl NativeControl for FakeControl {
    fn supports_selection(&self) -> bool {
        self.selection_supported
    }

    fn set_selection_range(&mut self, start: usize, end: usize) {
        self.selection = Some((start, end));
    }
}
