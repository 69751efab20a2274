//! Web frontend for the calculator widget
//!
//! The page logic runs against a mock DOM so it can be exercised without a
//! browser; the `wasm` feature adds bindings to the real page.

#[cfg(feature = "wasm")]
mod browser;
mod dom;
mod keypad;
mod page;
mod theme;

#[cfg(feature = "wasm")]
pub use browser::{BrowserCalculator, WebSink};
pub use dom::{DomElement, DomEvent, MockDom};
pub use keypad::{action_from_data, button_action, Keypad, KeypadButtonDef, MockDomKeypadExt};
pub use page::{press_button, CalculatorPage};
pub use theme::{ClassList, MemoryStore, Theme, ThemeStore, ThemeToggle};
