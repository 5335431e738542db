// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presentation changes addressed to rendered elements.
//!
//! Widgets never touch a document directly. Each change is an
//! [`ElementUpdate`] handed to an [`ElementSink`], which applies it to
//! whatever holds the rendered SVG.

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

/// Name of the attribute toggled to hide an element.
pub const VISIBILITY: &str = "visibility";

/// One change to one element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    /// Set an attribute.
    SetAttribute {
        /// Attribute name.
        name: &'static str,
        /// New value.
        value: String,
    },
    /// Remove an attribute.
    RemoveAttribute {
        /// Attribute name.
        name: &'static str,
    },
    /// Add a class if not already present.
    AddClass(&'static str),
    /// Remove a class if present.
    RemoveClass(&'static str),
}

/// A change addressed to the element with `id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementUpdate {
    /// Target element id.
    pub id: String,
    /// The change.
    pub change: Change,
}

impl ElementUpdate {
    /// Sets attribute `name` to `value`.
    #[must_use]
    pub fn set(id: impl Into<String>, name: &'static str, value: impl fmt::Display) -> Self {
        Self {
            id: id.into(),
            change: Change::SetAttribute {
                name,
                value: value.to_string(),
            },
        }
    }

    /// Removes attribute `name`.
    #[must_use]
    pub fn remove(id: impl Into<String>, name: &'static str) -> Self {
        Self {
            id: id.into(),
            change: Change::RemoveAttribute { name },
        }
    }

    /// Hides the element.
    #[must_use]
    pub fn hide(id: impl Into<String>) -> Self {
        Self::set(id, VISIBILITY, "hidden")
    }

    /// Clears any visibility override so the element shows.
    #[must_use]
    pub fn show(id: impl Into<String>) -> Self {
        Self::remove(id, VISIBILITY)
    }

    /// Adds `class`.
    #[must_use]
    pub fn add_class(id: impl Into<String>, class: &'static str) -> Self {
        Self {
            id: id.into(),
            change: Change::AddClass(class),
        }
    }

    /// Removes `class`.
    #[must_use]
    pub fn remove_class(id: impl Into<String>, class: &'static str) -> Self {
        Self {
            id: id.into(),
            change: Change::RemoveClass(class),
        }
    }
}

impl fmt::Display for ElementUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.change {
            Change::SetAttribute { name, value } => write!(f, "#{} {name}={value:?}", self.id),
            Change::RemoveAttribute { name } => write!(f, "#{} -{name}", self.id),
            Change::AddClass(class) => write!(f, "#{} +.{class}", self.id),
            Change::RemoveClass(class) => write!(f, "#{} -.{class}", self.id),
        }
    }
}

/// Receives presentation changes.
pub trait ElementSink {
    /// Applies one update.
    fn apply(&mut self, update: ElementUpdate);
}

/// A sink shared by every widget of one diagram.
pub type SharedSink = Rc<RefCell<dyn ElementSink>>;

#[derive(Clone, Debug, Default)]
struct ElementState {
    attributes: HashMap<&'static str, String>,
    classes: Vec<&'static str>,
}

/// An [`ElementSink`] that keeps every update and the resulting state.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    log: Vec<ElementUpdate>,
    state: HashMap<String, ElementState>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty sink behind a shared handle.
    #[must_use]
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Every update received, in order.
    #[must_use]
    pub fn updates(&self) -> &[ElementUpdate] {
        &self.log
    }

    /// Drains the update log, keeping the element state.
    pub fn take_updates(&mut self) -> Vec<ElementUpdate> {
        core::mem::take(&mut self.log)
    }

    /// Current value of attribute `name` on element `id`.
    #[must_use]
    pub fn attribute(&self, id: &str, name: &str) -> Option<&str> {
        self.state
            .get(id)
            .and_then(|s| s.attributes.get(name))
            .map(String::as_str)
    }

    /// Current value of attribute `name` on element `id`, parsed as a number.
    #[must_use]
    pub fn number(&self, id: &str, name: &str) -> Option<f64> {
        self.attribute(id, name).and_then(|v| v.parse().ok())
    }

    /// Whether element `id` currently has `class`.
    #[must_use]
    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.state
            .get(id)
            .is_some_and(|s| s.classes.iter().any(|c| *c == class))
    }

    /// Whether element `id` is currently hidden.
    #[must_use]
    pub fn is_hidden(&self, id: &str) -> bool {
        self.attribute(id, VISIBILITY) == Some("hidden")
    }
}

impl ElementSink for RecordingSink {
    fn apply(&mut self, update: ElementUpdate) {
        let state = self.state.entry_ref(update.id.as_str()).or_default();
        match &update.change {
            Change::SetAttribute { name, value } => {
                state.attributes.insert(*name, value.clone());
            }
            Change::RemoveAttribute { name } => {
                state.attributes.remove(name);
            }
            Change::AddClass(class) => {
                if !state.classes.contains(class) {
                    state.classes.push(*class);
                }
            }
            Change::RemoveClass(class) => state.classes.retain(|c| c != class),
        }
        self.log.push(update);
    }
}
