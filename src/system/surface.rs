//! Capability interface over the page controls.
//!
//! The synchronization logic never touches a concrete widget toolkit. It
//! reads and writes control values by id through [`ControlSurface`], and every
//! lookup may come back empty: a missing control means the feature is absent
//! for this session, never an error.

use std::collections::{HashMap, HashSet};

/// Input events delivered by the host, keyed by the id of the control that
/// produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    /// Live edit (every keystroke, slider drag).
    Input(String),
    /// Value committed by a picker.
    Change(String),
    /// Text field lost focus or the edit was confirmed.
    Commit(String),
    /// Button press.
    Click(String),
}

impl ControlEvent {
    pub fn id(&self) -> &str {
        match self {
            ControlEvent::Input(id)
            | ControlEvent::Change(id)
            | ControlEvent::Commit(id)
            | ControlEvent::Click(id) => id,
        }
    }
}

/// Element lookup and mutation by id.
pub trait ControlSurface {
    /// Current value of a control, `None` when the control does not exist.
    fn get(&self, id: &str) -> Option<String>;

    /// Writes a value. Returns `false` (and does nothing) when the control
    /// does not exist.
    fn set(&mut self, id: &str, value: &str) -> bool;

    /// Shows or hides an element. Missing elements are ignored.
    fn set_visible(&mut self, id: &str, visible: bool);

    fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }
}

/// In-memory surface: a flat id → value table plus a visibility set.
///
/// Used by the egui panel as its backing store and by tests as a fake page.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    values: HashMap<String, String>,
    visible: HashSet<String>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a control with an initial value. Registering an existing id
    /// overwrites its value.
    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.values.insert(id.into(), value.into());
    }

    pub fn remove(&mut self, id: &str) {
        self.values.remove(id);
        self.visible.remove(id);
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }
}

impl ControlSurface for MemorySurface {
    fn get(&self, id: &str) -> Option<String> {
        self.values.get(id).cloned()
    }

    fn set(&mut self, id: &str, value: &str) -> bool {
        match self.values.get_mut(id) {
            Some(slot) => {
                value.clone_into(slot);
                true
            }
            None => false,
        }
    }

    fn set_visible(&mut self, id: &str, visible: bool) {
        if !self.values.contains_key(id) {
            return;
        }
        if visible {
            self.visible.insert(id.to_string());
        } else {
            self.visible.remove(id);
        }
    }
}
