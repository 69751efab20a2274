//! Input actions and the keyboard mapping
//!
//! Buttons and keys both resolve to a [`KeypadAction`] before they reach the
//! controller.

/// Something the user asked the calculator to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadAction {
    /// Append a character to the expression
    Append(char),
    /// Evaluate the expression
    Equals,
    /// Delete the last character
    Backspace,
    /// Reset everything
    Clear,
}

impl KeypadAction {
    /// Returns the character this action appends, if any
    #[must_use]
    pub const fn to_char(&self) -> Option<char> {
        match self {
            Self::Append(ch) => Some(*ch),
            Self::Equals | Self::Backspace | Self::Clear => None,
        }
    }

    /// Parses a `data-action` attribute value
    #[must_use]
    pub fn from_action_name(name: &str) -> Option<Self> {
        match name {
            "clear" => Some(Self::Clear),
            "backspace" => Some(Self::Backspace),
            "equals" => Some(Self::Equals),
            _ => None,
        }
    }

    /// Returns the `data-action` name for non-append actions
    #[must_use]
    pub const fn action_name(&self) -> Option<&'static str> {
        match self {
            Self::Clear => Some("clear"),
            Self::Backspace => Some("backspace"),
            Self::Equals => Some("equals"),
            Self::Append(_) => None,
        }
    }

    /// Returns true if the browser's default handling of the key must be
    /// suppressed (Enter would otherwise submit or click a focused button)
    #[must_use]
    pub const fn prevents_default(&self) -> bool {
        matches!(self, Self::Equals)
    }
}

/// Maps a `KeyboardEvent.key` value to an action
///
/// Digits, `.`, and the four operators append; `Enter` and `=` evaluate;
/// `Backspace` deletes; `c` or `C` clears. Every other key is ignored.
#[must_use]
pub fn key_to_action(key: &str) -> Option<KeypadAction> {
    let mut chars = key.chars();
    let single = match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    };

    match (key, single) {
        ("Enter" | "=", _) => Some(KeypadAction::Equals),
        ("Backspace", _) => Some(KeypadAction::Backspace),
        (_, Some('c' | 'C')) => Some(KeypadAction::Clear),
        (_, Some(ch @ ('0'..='9' | '.' | '+' | '-' | '*' | '/'))) => {
            Some(KeypadAction::Append(ch))
        }
        _ => None,
    }
}
