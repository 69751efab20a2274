//! The whole calculator page on a mock DOM
//!
//! Wires the keypad, the keyboard, the theme toggle, and the revert timer to
//! a [`Calculator`] rendering into a [`MockDom`]. Time only moves when
//! [`CalculatorPage::advance`] is called.

use std::time::Duration;

use tracing::{debug, trace};

use super::dom::{DomEvent, MockDom};
use super::keypad::{button_action, Keypad, MockDomKeypadExt};
use super::theme::{MemoryStore, Theme, ThemeStore, ThemeToggle};
use crate::config::WidgetConfig;
use crate::controller::Calculator;
use crate::input::{key_to_action, KeypadAction};
use crate::timer::RevertTimer;

/// Calculator page driven by synthetic DOM events
#[derive(Debug)]
pub struct CalculatorPage<T: ThemeStore = MemoryStore> {
    calculator: Calculator<MockDom>,
    keypad: Keypad,
    theme: ThemeToggle,
    store: T,
    timer: RevertTimer,
}

impl CalculatorPage<MemoryStore> {
    /// Creates a page with default settings and an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(WidgetConfig::default(), MemoryStore::new())
    }
}

impl Default for CalculatorPage<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ThemeStore> CalculatorPage<T> {
    /// Builds the page, restoring any saved theme from `store`
    pub fn with_config(config: WidgetConfig, store: T) -> Self {
        let keypad = Keypad::new();
        let mut dom = MockDom::calculator();
        dom.add_keypad(&keypad);
        dom.set_shake_duration_ms(config.shake_duration_ms);

        let theme = ThemeToggle::new(config.theme_storage_key.clone());
        if let Some(root) = dom.root_mut() {
            theme.restore(root, &store);
        }

        let mut page = Self {
            calculator: Calculator::with_config(dom, config),
            keypad,
            theme,
            store,
            timer: RevertTimer::new(),
        };
        page.sync_toggle_button();
        page
    }

    /// Handles one DOM event; returns true if its default action was
    /// prevented
    pub fn dispatch(&mut self, event: DomEvent) -> bool {
        trace!(?event, "dispatch");
        let prevented = match &event {
            DomEvent::Click { element_id } => {
                self.handle_click(element_id);
                false
            }
            DomEvent::KeyDown { key } => self.handle_key(key),
        };
        self.calculator.sink_mut().record_event(event);
        for delay in self.calculator.take_revert_requests() {
            self.timer.schedule(delay);
        }
        prevented
    }

    /// Clicks the element with the given id
    pub fn click(&mut self, element_id: &str) -> bool {
        self.dispatch(DomEvent::click(element_id))
    }

    /// Presses a key
    pub fn key(&mut self, key: &str) -> bool {
        self.dispatch(DomEvent::key_down(key))
    }

    /// Presses each character of `keys` in turn
    pub fn type_keys(&mut self, keys: &str) {
        for ch in keys.chars() {
            self.key(&ch.to_string());
        }
    }

    /// Moves time forward, firing every revert that came due
    pub fn advance(&mut self, elapsed: Duration) {
        let due = self.timer.advance(elapsed);
        for _ in 0..due {
            self.calculator.revert_display();
        }
        if due > 0 {
            debug!(due, "display reverted");
        }
    }

    /// Text in the result element
    #[must_use]
    pub fn display_text(&self) -> &str {
        self.dom().element_text(MockDom::RESULT_ID).unwrap_or_default()
    }

    /// Text in the history element
    #[must_use]
    pub fn history_text(&self) -> &str {
        self.dom().element_text(MockDom::HISTORY_ID).unwrap_or_default()
    }

    /// Returns true while the result element carries error styling
    #[must_use]
    pub fn error_shown(&self) -> bool {
        self.dom()
            .get_element(MockDom::RESULT_ID)
            .is_some_and(|e| e.has_class(MockDom::ERROR_CLASS))
    }

    /// Theme currently shown
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.dom()
            .root()
            .map_or(Theme::Light, ThemeToggle::current)
    }

    /// Reverts still waiting on the clock
    #[must_use]
    pub fn pending_reverts(&self) -> usize {
        self.timer.pending()
    }

    /// The page's DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        self.calculator.sink()
    }

    /// The calculator behind the page
    #[must_use]
    pub fn calculator(&self) -> &Calculator<MockDom> {
        &self.calculator
    }

    /// The keypad layout
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// The theme store
    #[must_use]
    pub fn store(&self) -> &T {
        &self.store
    }

    /// Tears the page down, keeping the store for the next one
    pub fn into_store(self) -> T {
        self.store
    }

    fn handle_click(&mut self, element_id: &str) {
        if element_id == MockDom::MODE_TOGGLE_ID {
            self.toggle_theme();
            return;
        }
        let dom = self.calculator.sink();
        if !dom.is_within(element_id, MockDom::GRID_ID) {
            trace!(element_id, "click outside keypad");
            return;
        }
        let Some(button) = dom.closest(element_id, "button") else {
            trace!(element_id, "click not on a button");
            return;
        };
        match button_action(button) {
            Some(action) => self.calculator.apply(action),
            None => debug!(button = %button.id, "button has no usable action"),
        }
    }

    fn handle_key(&mut self, key: &str) -> bool {
        match key_to_action(key) {
            Some(action) => {
                self.calculator.apply(action);
                action.prevents_default()
            }
            None => {
                trace!(key, "key ignored");
                false
            }
        }
    }

    fn toggle_theme(&mut self) {
        if let Some(root) = self.calculator.sink_mut().root_mut() {
            self.theme.toggle(root, &mut self.store);
        }
        self.sync_toggle_button();
    }

    fn sync_toggle_button(&mut self) {
        let theme = self.theme();
        if let Some(button) = self
            .calculator
            .sink_mut()
            .get_element_mut(MockDom::MODE_TOGGLE_ID)
        {
            ThemeToggle::sync_button(theme, button);
        }
    }
}

/// Presses the keypad button for `action`, if the page has one
pub fn press_button<T: ThemeStore>(page: &mut CalculatorPage<T>, action: KeypadAction) -> bool {
    let Some(id) = page
        .keypad()
        .find_button_by_action(action)
        .map(|b| b.id.clone())
    else {
        return false;
    };
    page.click(&id);
    true
}
