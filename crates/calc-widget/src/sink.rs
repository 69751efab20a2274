//! Output targets the controller writes to
//!
//! The controller never knows what sits behind these traits: a browser
//! element, the mock DOM, or a plain recorder in tests.

/// Receives the main display text
pub trait RenderSink {
    /// Shows `text` as the current display value
    fn render(&mut self, text: &str);

    /// Shows a transient error message with error styling
    fn show_error(&mut self, message: &str);

    /// Removes error styling; the text is left as-is
    fn clear_error(&mut self);
}

/// Receives the last evaluated expression
pub trait HistorySink {
    /// Shows `text` on the history line
    fn show_history(&mut self, text: &str);
}

/// Placeholder written to the history line on clear (a non-breaking space,
/// so the line keeps its height)
pub const HISTORY_PLACEHOLDER: &str = "\u{00A0}";

/// One write received by a [`RecordingSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    /// `render` was called
    Render(String),
    /// `show_error` was called
    Error(String),
    /// `clear_error` was called
    ClearError,
    /// `show_history` was called
    History(String),
}

/// Sink that records every write, for tests and headless use
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<SinkEvent>,
    display: String,
    history: String,
    error_active: bool,
}

impl RecordingSink {
    /// Creates an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write in order
    #[must_use]
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Text currently on the display
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Text currently on the history line
    #[must_use]
    pub fn history(&self) -> &str {
        &self.history
    }

    /// True while error styling is applied
    #[must_use]
    pub fn error_active(&self) -> bool {
        self.error_active
    }

    /// Forgets recorded events but keeps the current display state
    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl RenderSink for RecordingSink {
    fn render(&mut self, text: &str) {
        self.display = text.to_string();
        self.events.push(SinkEvent::Render(text.to_string()));
    }

    fn show_error(&mut self, message: &str) {
        self.display = message.to_string();
        self.error_active = true;
        self.events.push(SinkEvent::Error(message.to_string()));
    }

    fn clear_error(&mut self) {
        self.error_active = false;
        self.events.push(SinkEvent::ClearError);
    }
}

impl HistorySink for RecordingSink {
    fn show_history(&mut self, text: &str) {
        self.history = text.to_string();
        self.events.push(SinkEvent::History(text.to_string()));
    }
}
