//! Calculator controller
//!
//! Wraps the [`ExpressionBuffer`] and pushes every state change to a sink.
//! Evaluation failures never escape: they become a transient message plus a
//! revert request that the host schedules.

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::config::WidgetConfig;
use crate::core::{CalcError, ExpressionBuffer};
use crate::input::KeypadAction;
use crate::sink::{HistorySink, RenderSink, HISTORY_PLACEHOLDER};

/// The calculator widget state, bound to its output sink
#[derive(Debug)]
pub struct Calculator<S> {
    buffer: ExpressionBuffer,
    sink: S,
    config: WidgetConfig,
    revert_requests: Vec<Duration>,
}

impl<S: RenderSink + HistorySink> Calculator<S> {
    /// Creates a calculator with default settings and renders the initial `0`
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, WidgetConfig::default())
    }

    /// Creates a calculator with the given settings and renders the initial `0`
    pub fn with_config(sink: S, config: WidgetConfig) -> Self {
        let mut calculator = Self {
            buffer: ExpressionBuffer::with_precision(config.significant_digits),
            sink,
            config,
            revert_requests: Vec::new(),
        };
        calculator.render();
        calculator
    }

    /// Returns the expression buffer
    #[must_use]
    pub fn buffer(&self) -> &ExpressionBuffer {
        &self.buffer
    }

    /// Returns the sink
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the sink mutably
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Returns the active configuration
    #[must_use]
    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Consumes the calculator, returning its sink
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Dispatches a keypad action
    pub fn apply(&mut self, action: KeypadAction) {
        trace!(?action, "apply");
        match action {
            KeypadAction::Append(ch) => self.append(ch),
            KeypadAction::Equals => self.evaluate(),
            KeypadAction::Backspace => self.backspace(),
            KeypadAction::Clear => self.clear(),
        }
    }

    /// Appends a character; rejected input leaves the display untouched
    pub fn append(&mut self, ch: char) {
        let outcome = self.buffer.append(ch);
        if !outcome.changed() {
            debug!(%ch, buffer = self.buffer.as_str(), "append rejected");
            return;
        }
        trace!(%ch, ?outcome, buffer = self.buffer.as_str(), "appended");
        self.render();
    }

    /// Deletes the last character
    pub fn backspace(&mut self) {
        self.buffer.backspace();
        self.render();
    }

    /// Resets the buffer, the last result, and the history line
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.sink.show_history(HISTORY_PLACEHOLDER);
        self.render();
    }

    /// Evaluates the buffer; failures show a transient message
    pub fn evaluate(&mut self) {
        match self.buffer.evaluate() {
            Ok(None) => {}
            Ok(Some(evaluation)) => {
                debug!(
                    expression = %evaluation.expression,
                    result = %evaluation.display,
                    "evaluated"
                );
                self.sink.show_history(&evaluation.history_line());
                self.render();
            }
            Err(err) => self.show_error(&err),
        }
    }

    /// Re-renders the current state and drops error styling
    ///
    /// Hosts call this once per revert request, when its delay has elapsed.
    pub fn revert_display(&mut self) {
        self.sink.clear_error();
        self.render();
    }

    /// Takes the revert delays requested since the last call
    pub fn take_revert_requests(&mut self) -> Vec<Duration> {
        std::mem::take(&mut self.revert_requests)
    }

    /// Current display text
    #[must_use]
    pub fn display_text(&self) -> String {
        self.buffer.display_text()
    }

    fn render(&mut self) {
        let text = self.buffer.display_text();
        self.sink.render(&text);
    }

    fn show_error(&mut self, err: &CalcError) {
        warn!(error = ?err, buffer = self.buffer.as_str(), "evaluation failed");
        self.sink.show_error(&err.message());
        self.revert_requests.push(self.config.revert_delay());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{RecordingSink, SinkEvent};

    fn calculator() -> Calculator<RecordingSink> {
        Calculator::new(RecordingSink::new())
    }

    fn press(calc: &mut Calculator<RecordingSink>, keys: &str) {
        for ch in keys.chars() {
            calc.append(ch);
        }
    }

    #[test]
    fn test_initial_render_shows_zero() {
        let calc = calculator();
        assert_eq!(calc.sink().display(), "0");
        assert_eq!(calc.sink().events(), &[SinkEvent::Render("0".into())]);
    }

    #[test]
    fn test_append_renders_buffer() {
        let mut calc = calculator();
        press(&mut calc, "12+");
        assert_eq!(calc.sink().display(), "12+");
    }

    #[test]
    fn test_rejected_append_does_not_render() {
        let mut calc = calculator();
        calc.sink_mut().clear_events();
        calc.append('*');
        assert!(calc.sink().events().is_empty());
    }

    #[test]
    fn test_backspace_on_empty_still_renders() {
        let mut calc = calculator();
        calc.sink_mut().clear_events();
        calc.backspace();
        assert_eq!(calc.sink().events(), &[SinkEvent::Render("0".into())]);
    }

    #[test]
    fn test_evaluate_updates_history_and_display() {
        let mut calc = calculator();
        press(&mut calc, "2+3*4");
        calc.evaluate();
        assert_eq!(calc.sink().history(), "2+3*4 =");
        assert_eq!(calc.sink().display(), "14");
        assert_eq!(calc.buffer().as_str(), "14");
        assert!(calc.take_revert_requests().is_empty());
    }

    #[test]
    fn test_evaluate_empty_is_silent() {
        let mut calc = calculator();
        calc.sink_mut().clear_events();
        calc.evaluate();
        assert!(calc.sink().events().is_empty());
        assert!(calc.take_revert_requests().is_empty());
    }

    #[test]
    fn test_math_error_is_transient() {
        let mut calc = calculator();
        press(&mut calc, "5/0");
        calc.evaluate();
        assert_eq!(calc.sink().display(), "Math error");
        assert!(calc.sink().error_active());
        assert_eq!(
            calc.take_revert_requests(),
            vec![Duration::from_millis(700)]
        );

        calc.revert_display();
        assert_eq!(calc.sink().display(), "5/0");
        assert!(!calc.sink().error_active());
        assert_eq!(calc.sink().history(), "");
    }

    #[test]
    fn test_invalid_input_message() {
        let mut calc = calculator();
        press(&mut calc, "2x");
        calc.evaluate();
        assert_eq!(calc.sink().display(), "Invalid input");
    }

    #[test]
    fn test_typing_over_error_keeps_error_styling() {
        let mut calc = calculator();
        press(&mut calc, "1/0");
        calc.evaluate();
        calc.backspace();
        assert_eq!(calc.sink().display(), "1/");
        assert!(calc.sink().error_active());
    }

    #[test]
    fn test_clear_resets_history_line() {
        let mut calc = calculator();
        press(&mut calc, "6*7");
        calc.evaluate();
        calc.clear();
        assert_eq!(calc.sink().history(), HISTORY_PLACEHOLDER);
        assert_eq!(calc.sink().display(), "0");
        assert_eq!(calc.buffer().last_result(), None);
    }

    #[test]
    fn test_apply_dispatches_actions() {
        let mut calc = calculator();
        for action in [
            KeypadAction::Append('9'),
            KeypadAction::Append('-'),
            KeypadAction::Append('4'),
            KeypadAction::Equals,
        ] {
            calc.apply(action);
        }
        assert_eq!(calc.display_text(), "5");
        calc.apply(KeypadAction::Backspace);
        assert_eq!(calc.display_text(), "5");
        calc.apply(KeypadAction::Clear);
        assert_eq!(calc.display_text(), "0");
    }

    #[test]
    fn test_custom_revert_delay_and_precision() {
        let config = WidgetConfig::new()
            .with_revert_delay_ms(50)
            .with_significant_digits(4);
        let mut calc = Calculator::with_config(RecordingSink::new(), config);
        press(&mut calc, "2/3");
        calc.evaluate();
        assert_eq!(calc.display_text(), "0.6667");
        press(&mut calc, "/0");
        calc.evaluate();
        assert_eq!(
            calc.take_revert_requests(),
            vec![Duration::from_millis(50)]
        );
    }

    #[test]
    fn test_into_sink() {
        let mut calc = calculator();
        press(&mut calc, "8");
        let sink = calc.into_sink();
        assert_eq!(sink.display(), "8");
    }
}
