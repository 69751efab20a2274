//! Mock DOM for the calculator page
//!
//! A flat element registry keyed by id, with parent links so clicks on a
//! button's label resolve to the button. Enough of the DOM to run the whole
//! widget without a browser.

use std::collections::HashMap;

use crate::sink::{HistorySink, RenderSink};

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Parent element ID
    pub parent: Option<String>,
    /// Child element IDs, in document order
    pub children: Vec<String>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Sets an attribute value
    pub fn set_attr(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }

    /// Removes an attribute
    pub fn remove_attr(&mut self, key: &str) {
        self.attributes.remove(key);
    }

    /// Reads a `data-*` attribute, e.g. `data("action")` for `data-action`
    #[must_use]
    pub fn data(&self, name: &str) -> Option<&str> {
        self.get_attr(&format!("data-{name}"))
    }
}

/// DOM events the page listens for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Key pressed anywhere in the window
    KeyDown {
        /// The `KeyboardEvent.key` value
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a keydown event
    #[must_use]
    pub fn key_down(key: &str) -> Self {
        Self::KeyDown {
            key: key.to_string(),
        }
    }
}

/// Mock DOM for running the calculator without a browser
#[derive(Debug, Clone)]
pub struct MockDom {
    elements: HashMap<String, DomElement>,
    event_history: Vec<DomEvent>,
    shake_duration_ms: u64,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Document element; carries the theme classes
    pub const ROOT_ID: &'static str = "document";
    /// Main display
    pub const RESULT_ID: &'static str = "result";
    /// Last evaluated expression
    pub const HISTORY_ID: &'static str = "history";
    /// Keypad container; clicks are only handled inside it
    pub const GRID_ID: &'static str = "grid";
    /// Theme toggle button
    pub const MODE_TOGGLE_ID: &'static str = "modeToggle";
    /// Class marking the display while an error message shows
    pub const ERROR_CLASS: &'static str = "error";
    /// Attribute carrying the shake animation length
    pub const SHAKE_ATTR: &'static str = "data-shake-ms";

    /// Creates a DOM holding only the document element
    #[must_use]
    pub fn new() -> Self {
        let mut elements = HashMap::new();
        elements.insert(
            Self::ROOT_ID.to_string(),
            DomElement::new("html").with_id(Self::ROOT_ID),
        );
        Self {
            elements,
            event_history: Vec::new(),
            shake_duration_ms: 180,
        }
    }

    /// Creates the calculator page skeleton: toggle, history, result, grid
    #[must_use]
    pub fn calculator() -> Self {
        let mut dom = Self::new();
        dom.append_child(
            Self::ROOT_ID,
            DomElement::new("button")
                .with_id(Self::MODE_TOGGLE_ID)
                .with_attr("aria-pressed", "false"),
        );
        dom.append_child(
            Self::ROOT_ID,
            DomElement::new("div")
                .with_id(Self::HISTORY_ID)
                .with_class("history")
                .with_text(crate::sink::HISTORY_PLACEHOLDER),
        );
        dom.append_child(
            Self::ROOT_ID,
            DomElement::new("div")
                .with_id(Self::RESULT_ID)
                .with_class("result")
                .with_attr("aria-live", "polite"),
        );
        dom.append_child(
            Self::ROOT_ID,
            DomElement::new("div").with_id(Self::GRID_ID).with_class("grid"),
        );
        dom
    }

    /// Sets the shake animation length recorded on error
    pub fn set_shake_duration_ms(&mut self, ms: u64) {
        self.shake_duration_ms = ms;
    }

    /// Inserts `child` under `parent_id`; returns false if the parent is
    /// missing or the child has no id
    pub fn append_child(&mut self, parent_id: &str, mut child: DomElement) -> bool {
        if child.id.is_empty() {
            return false;
        }
        let Some(parent) = self.elements.get_mut(parent_id) else {
            return false;
        };
        parent.children.push(child.id.clone());
        child.parent = Some(parent_id.to_string());
        self.elements.insert(child.id.clone(), child);
        true
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Gets a mutable element by ID
    pub fn get_element_mut(&mut self, id: &str) -> Option<&mut DomElement> {
        self.elements.get_mut(id)
    }

    /// Gets element text by ID
    #[must_use]
    pub fn element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }

    /// The document element
    #[must_use]
    pub fn root(&self) -> Option<&DomElement> {
        self.get_element(Self::ROOT_ID)
    }

    /// The document element, mutably
    pub fn root_mut(&mut self) -> Option<&mut DomElement> {
        self.get_element_mut(Self::ROOT_ID)
    }

    /// Walks from `id` up through its ancestors, returning the first element
    /// with the given tag (the element itself included)
    #[must_use]
    pub fn closest(&self, id: &str, tag: &str) -> Option<&DomElement> {
        let mut current = self.elements.get(id);
        while let Some(elem) = current {
            if elem.tag == tag {
                return Some(elem);
            }
            current = elem.parent.as_deref().and_then(|p| self.elements.get(p));
        }
        None
    }

    /// Returns true if `id` is `ancestor_id` or sits below it
    #[must_use]
    pub fn is_within(&self, id: &str, ancestor_id: &str) -> bool {
        let mut current = self.elements.get(id);
        while let Some(elem) = current {
            if elem.id == ancestor_id {
                return true;
            }
            current = elem.parent.as_deref().and_then(|p| self.elements.get(p));
        }
        false
    }

    /// Records a dispatched event
    pub fn record_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    fn result_mut(&mut self) -> Option<&mut DomElement> {
        self.elements.get_mut(Self::RESULT_ID)
    }
}

impl RenderSink for MockDom {
    fn render(&mut self, text: &str) {
        if let Some(result) = self.result_mut() {
            result.set_text(text);
        }
    }

    fn show_error(&mut self, message: &str) {
        let shake = self.shake_duration_ms.to_string();
        if let Some(result) = self.result_mut() {
            result.set_text(message);
            result.add_class(Self::ERROR_CLASS);
            result.set_attr(Self::SHAKE_ATTR, &shake);
        }
    }

    fn clear_error(&mut self) {
        if let Some(result) = self.result_mut() {
            result.remove_class(Self::ERROR_CLASS);
            result.remove_attr(Self::SHAKE_ATTR);
        }
    }
}

impl HistorySink for MockDom {
    fn show_history(&mut self, text: &str) {
        if let Some(history) = self.elements.get_mut(Self::HISTORY_ID) {
            history.set_text(text);
        }
    }
}
