//! Browser bindings
//!
//! The page markup provides `#result`, `#history`, `#grid`, and
//! `#modeToggle`. JS glue forwards `keydown` events from the window, `click`
//! events from the grid, and clicks on the toggle:
//!
//! ```js
//! const calc = new BrowserCalculator();
//! window.addEventListener('keydown', (e) => calc.handle_key(e));
//! grid.addEventListener('click', (e) => calc.handle_click(e));
//! modeToggle.addEventListener('click', () => calc.toggle_theme());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, DomTokenList, Element, Event, KeyboardEvent, Storage, Window};

use super::keypad::action_from_data;
use super::theme::{ClassList, ThemeStore, ThemeToggle};
use crate::config::WidgetConfig;
use crate::controller::Calculator;
use crate::input::{key_to_action, KeypadAction};
use crate::sink::{HistorySink, RenderSink};

const ERROR_CLASS: &str = "error";
const SHAKE_ATTR: &str = "data-shake-ms";

/// Writes calculator output into real page elements
#[derive(Debug)]
pub struct WebSink {
    result: Element,
    history: Element,
    shake_duration_ms: u64,
}

impl RenderSink for WebSink {
    fn render(&mut self, text: &str) {
        self.result.set_text_content(Some(text));
    }

    fn show_error(&mut self, message: &str) {
        self.result.set_text_content(Some(message));
        if let Err(err) = self.result.class_list().add_1(ERROR_CLASS) {
            warn!(?err, "could not add error class");
        }
        let shake = self.shake_duration_ms.to_string();
        if let Err(err) = self.result.set_attribute(SHAKE_ATTR, &shake) {
            warn!(?err, "could not start shake animation");
        }
    }

    fn clear_error(&mut self) {
        if let Err(err) = self.result.class_list().remove_1(ERROR_CLASS) {
            warn!(?err, "could not remove error class");
        }
        if let Err(err) = self.result.remove_attribute(SHAKE_ATTR) {
            warn!(?err, "could not stop shake animation");
        }
    }
}

impl HistorySink for WebSink {
    fn show_history(&mut self, text: &str) {
        self.history.set_text_content(Some(text));
    }
}

/// `localStorage`, or nothing when the browser refuses access
#[derive(Debug)]
struct LocalStore(Option<Storage>);

impl ThemeStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let Some(storage) = &self.0 else {
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            debug!(?err, "theme not persisted");
        }
    }
}

/// The document element's class list
struct RootClasses(DomTokenList);

impl ClassList for RootClasses {
    fn contains(&self, class: &str) -> bool {
        self.0.contains(class)
    }

    fn add(&mut self, class: &str) {
        if let Err(err) = self.0.add_1(class) {
            warn!(?err, class, "could not add class");
        }
    }

    fn remove(&mut self, class: &str) {
        if let Err(err) = self.0.remove_1(class) {
            warn!(?err, class, "could not remove class");
        }
    }
}

/// Browser calculator - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    window: Window,
    calculator: Rc<RefCell<Calculator<WebSink>>>,
    root: Element,
    toggle_button: Option<Element>,
    theme: ThemeToggle,
    store: LocalStore,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Binds to the current page with default settings
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<BrowserCalculator, JsValue> {
        Self::with_config_json("{}")
    }

    /// Binds to the current page with settings given as JSON
    pub fn with_config_json(json: &str) -> Result<BrowserCalculator, JsValue> {
        console_error_panic_hook::set_once();

        let config =
            WidgetConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let root = document
            .document_element()
            .ok_or_else(|| JsValue::from_str("no document element"))?;
        let find = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
        };

        let sink = WebSink {
            result: find("result")?,
            history: find("history")?,
            shake_duration_ms: config.shake_duration_ms,
        };
        let toggle_button = document.get_element_by_id("modeToggle");
        let store = LocalStore(window.local_storage().ok().flatten());
        let theme = ThemeToggle::new(config.theme_storage_key.clone());
        theme.restore(&mut RootClasses(root.class_list()), &store);

        let bound = Self {
            window,
            calculator: Rc::new(RefCell::new(Calculator::with_config(sink, config))),
            root,
            toggle_button,
            theme,
            store,
        };
        bound.sync_toggle_button();
        console::log_1(&"Calculator WASM initialized".into());
        Ok(bound)
    }

    /// Handles a window `keydown`
    pub fn handle_key(&self, event: &KeyboardEvent) {
        let Some(action) = key_to_action(&event.key()) else {
            return;
        };
        if action.prevents_default() {
            event.prevent_default();
        }
        self.apply(action);
    }

    /// Handles a click anywhere inside the keypad grid
    pub fn handle_click(&self, event: &Event) {
        let Some(button) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest("button").ok().flatten())
        else {
            return;
        };
        let action = button.get_attribute("data-action");
        let value = button.get_attribute("data-value");
        match action_from_data(action.as_deref(), value.as_deref()) {
            Some(action) => self.apply(action),
            None => debug!(id = %button.id(), "button has no usable action"),
        }
    }

    /// Flips between light and dark and persists the choice
    pub fn toggle_theme(&mut self) {
        self.theme
            .toggle(&mut RootClasses(self.root.class_list()), &mut self.store);
        self.sync_toggle_button();
    }

    /// Current display text
    pub fn display_text(&self) -> String {
        self.calculator.borrow().display_text()
    }

    /// Current buffer contents
    pub fn expression(&self) -> String {
        self.calculator.borrow().buffer().as_str().to_string()
    }
}

impl BrowserCalculator {
    fn apply(&self, action: KeypadAction) {
        let requests = {
            let mut calculator = self.calculator.borrow_mut();
            calculator.apply(action);
            calculator.take_revert_requests()
        };
        for delay in requests {
            self.schedule_revert(delay.as_millis());
        }
    }

    fn schedule_revert(&self, delay_ms: u128) {
        let calculator = Rc::clone(&self.calculator);
        let callback = Closure::once_into_js(move || {
            calculator.borrow_mut().revert_display();
        });
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if let Err(err) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            warn!(?err, "could not schedule display revert");
        }
    }

    fn sync_toggle_button(&self) {
        let Some(button) = &self.toggle_button else {
            return;
        };
        let theme = ThemeToggle::current(&RootClasses(self.root.class_list()));
        button.set_text_content(Some(theme.toggle_label()));
        if let Err(err) = button.set_attribute("aria-pressed", theme.aria_pressed()) {
            warn!(?err, "could not update toggle state");
        }
        debug!(theme = theme.as_str(), "toggle button synced");
    }
}
