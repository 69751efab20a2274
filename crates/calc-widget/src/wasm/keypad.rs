//! On-screen keypad
//!
//! Layout:
//! ```text
//! [ C ] [ ⌫ ] [ ÷ ] [ × ]
//! [ 7 ] [ 8 ] [ 9 ] [ − ]
//! [ 4 ] [ 5 ] [ 6 ] [ + ]
//! [ 1 ] [ 2 ] [ 3 ] [ = ]
//! [ 0 ] [ . ]
//! ```
//!
//! Labels use display glyphs; the `data-value` attribute always carries the
//! ASCII character that goes into the buffer.

use super::dom::{DomElement, MockDom};
use crate::input::KeypadAction;

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButtonDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        let id = match action {
            KeypadAction::Append(ch) => format!("btn-{}", char_name(ch)),
            KeypadAction::Equals => "btn-equals".to_string(),
            KeypadAction::Backspace => "btn-backspace".to_string(),
            KeypadAction::Clear => "btn-clear".to_string(),
        };
        Self {
            action,
            id,
            row,
            col,
        }
    }

    /// Returns the text printed on the button
    #[must_use]
    pub fn label(&self) -> String {
        match self.action {
            KeypadAction::Append('/') => "\u{00F7}".to_string(),
            KeypadAction::Append('*') => "\u{00D7}".to_string(),
            KeypadAction::Append('-') => "\u{2212}".to_string(),
            KeypadAction::Append(ch) => ch.to_string(),
            KeypadAction::Equals => "=".to_string(),
            KeypadAction::Backspace => "\u{232B}".to_string(),
            KeypadAction::Clear => "C".to_string(),
        }
    }

    /// Builds the `<button>` element with its `data-*` attribute
    #[must_use]
    pub fn to_element(&self) -> DomElement {
        let button = DomElement::new("button")
            .with_id(&self.id)
            .with_class("key")
            .with_class(&format!("keypad-row-{}", self.row))
            .with_class(&format!("keypad-col-{}", self.col));
        match self.action {
            KeypadAction::Append(ch) => button.with_attr("data-value", &ch.to_string()),
            other => button.with_attr("data-action", other.action_name().unwrap_or_default()),
        }
    }

    /// ID of the label `<span>` inside the button
    #[must_use]
    pub fn label_id(&self) -> String {
        format!("{}-label", self.id)
    }
}

/// Returns a name for a keypad character (for element IDs)
fn char_name(ch: char) -> String {
    match ch {
        '+' => "plus".to_string(),
        '-' => "minus".to_string(),
        '*' => "multiply".to_string(),
        '/' => "divide".to_string(),
        '.' => "decimal".to_string(),
        other => other.to_string(),
    }
}

/// Keypad layout definition
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButtonDef>,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Number of columns in the grid
    pub const COLS: usize = 4;

    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use KeypadAction::{Append, Backspace, Clear, Equals};

        let rows: [&[KeypadAction]; 5] = [
            &[Clear, Backspace, Append('/'), Append('*')],
            &[Append('7'), Append('8'), Append('9'), Append('-')],
            &[Append('4'), Append('5'), Append('6'), Append('+')],
            &[Append('1'), Append('2'), Append('3'), Equals],
            &[Append('0'), Append('.')],
        ];

        let buttons = rows
            .iter()
            .enumerate()
            .flat_map(|(row, actions)| {
                actions
                    .iter()
                    .enumerate()
                    .map(move |(col, action)| KeypadButtonDef::new(*action, row, col))
            })
            .collect();

        Self { buttons }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button that performs `action`
    #[must_use]
    pub fn find_button_by_action(&self, action: KeypadAction) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.action == action)
    }
}

/// Resolves a clicked `<button>` to an action from its `data-*` attributes
#[must_use]
pub fn button_action(button: &DomElement) -> Option<KeypadAction> {
    action_from_data(button.data("action"), button.data("value"))
}

/// Resolves `data-action` / `data-value` attribute values to an action
///
/// A known `data-action` wins over `data-value`; an unknown one falls back to
/// the value. A value must be a single character.
#[must_use]
pub fn action_from_data(action: Option<&str>, value: Option<&str>) -> Option<KeypadAction> {
    if let Some(known) = action.and_then(KeypadAction::from_action_name) {
        return Some(known);
    }
    let mut chars = value?.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(KeypadAction::Append(ch)),
        _ => None,
    }
}

/// Extension trait for MockDom to add keypad
pub trait MockDomKeypadExt {
    /// Mounts every keypad button, with its label span, into the grid
    fn add_keypad(&mut self, keypad: &Keypad);
}

impl MockDomKeypadExt for MockDom {
    fn add_keypad(&mut self, keypad: &Keypad) {
        for def in keypad.buttons() {
            self.append_child(MockDom::GRID_ID, def.to_element());
            self.append_child(
                &def.id,
                DomElement::new("span")
                    .with_id(&def.label_id())
                    .with_class("label")
                    .with_text(&def.label()),
            );
        }
    }
}
