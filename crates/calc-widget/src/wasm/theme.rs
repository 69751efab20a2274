//! Light/dark theme toggle with a persisted preference
//!
//! With nothing saved the page carries neither class and the stylesheet
//! follows the system preference. Toggling flips `dark` and drops the other
//! class; `light` is only added when a saved preference is restored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dom::DomElement;

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme
    Light,
    /// Dark theme
    Dark,
}

impl Theme {
    /// Stored value and CSS class name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a stored value; anything else means "no preference"
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The other theme
    #[must_use]
    pub const fn opposite(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Toggle button text; the button offers the theme you would switch to
    #[must_use]
    pub const fn toggle_label(&self) -> &'static str {
        match self {
            Self::Dark => "\u{2600}\u{FE0F} Light",
            Self::Light => "\u{1F319} Dark",
        }
    }

    /// `aria-pressed` value for the toggle button
    #[must_use]
    pub const fn aria_pressed(&self) -> &'static str {
        match self {
            Self::Dark => "true",
            Self::Light => "false",
        }
    }
}

/// Key-value storage surviving page reloads
pub trait ThemeStore {
    /// Reads a stored value
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store, serializable so a session can be carried over
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes the store to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Restores a store from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl ThemeStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Anything with a class list, mock or real
pub trait ClassList {
    /// Returns true if the class is present
    fn contains(&self, class: &str) -> bool;

    /// Adds a class
    fn add(&mut self, class: &str);

    /// Removes a class
    fn remove(&mut self, class: &str);

    /// Flips a class; returns true if it is now present
    fn toggle(&mut self, class: &str) -> bool {
        if self.contains(class) {
            self.remove(class);
            false
        } else {
            self.add(class);
            true
        }
    }
}

impl ClassList for DomElement {
    fn contains(&self, class: &str) -> bool {
        self.has_class(class)
    }

    fn add(&mut self, class: &str) {
        self.add_class(class);
    }

    fn remove(&mut self, class: &str) {
        self.remove_class(class);
    }
}

/// Theme logic bound to a storage key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeToggle {
    storage_key: String,
}

impl ThemeToggle {
    /// Creates a toggle persisting under `storage_key`
    #[must_use]
    pub fn new(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
        }
    }

    /// Storage key in use
    #[must_use]
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Applies the saved preference to `root`, if there is one
    pub fn restore<C, T>(&self, root: &mut C, store: &T) -> Option<Theme>
    where
        C: ClassList + ?Sized,
        T: ThemeStore + ?Sized,
    {
        let saved = store.get(&self.storage_key).and_then(|v| Theme::parse(&v))?;
        root.add(saved.as_str());
        debug!(theme = saved.as_str(), "restored saved theme");
        Some(saved)
    }

    /// The theme currently shown; without a `dark` class the page is light
    #[must_use]
    pub fn current<C: ClassList + ?Sized>(root: &C) -> Theme {
        if root.contains(Theme::Dark.as_str()) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    /// Flips between dark and light, persists the choice, and returns it
    pub fn toggle<C, T>(&self, root: &mut C, store: &mut T) -> Theme
    where
        C: ClassList + ?Sized,
        T: ThemeStore + ?Sized,
    {
        let theme = if root.toggle(Theme::Dark.as_str()) {
            Theme::Dark
        } else {
            Theme::Light
        };
        root.remove(theme.opposite().as_str());
        store.set(&self.storage_key, theme.as_str());
        debug!(theme = theme.as_str(), "theme toggled");
        theme
    }

    /// Writes the label and `aria-pressed` state onto the toggle button
    pub fn sync_button(theme: Theme, button: &mut DomElement) {
        button.set_text(theme.toggle_label());
        button.set_attr("aria-pressed", theme.aria_pressed());
    }
}
