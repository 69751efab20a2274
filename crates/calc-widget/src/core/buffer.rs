//! Expression buffer: keypad input normalization and evaluation
//!
//! The buffer is the whole calculator state: the text being composed plus
//! the last successful result. Every keypad press lands here as `append`,
//! `backspace`, `clear`, or `evaluate`.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::evaluator::Evaluator;
use crate::core::format::{format_number_with_precision, DEFAULT_SIGNIFICANT_DIGITS};
use crate::core::{CalcError, CalcResult, MathFault, Operation};

/// Characters an expression may contain when it is evaluated
const ALLOWED_EXPRESSION: &str = r"^[0-9+\-*/().\s]+$";

/// Division and multiplication glyphs mapped onto their ASCII operators
const GLYPHS: [(char, char); 2] = [('\u{00F7}', '/'), ('\u{00D7}', '*')];

fn allowed_expression() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(ALLOWED_EXPRESSION).expect("allow-list pattern is valid"))
}

/// How an `append` changed the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appended {
    /// The character was added to the end
    Inserted,
    /// A `0` was synthesized ahead of a leading decimal point
    ZeroPadded,
    /// The trailing operator was overwritten
    Replaced(Operation),
    /// The character was ignored
    Rejected,
}

impl Appended {
    /// Returns true if the buffer text changed
    #[must_use]
    pub const fn changed(&self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// A successful evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The buffer text that was evaluated
    pub expression: String,
    /// The computed value
    pub value: f64,
    /// The formatted value, now the buffer content
    pub display: String,
}

impl Evaluation {
    /// Returns the history line for this evaluation, e.g. `"2+3*4 ="`
    #[must_use]
    pub fn history_line(&self) -> String {
        format!("{} =", self.expression)
    }
}

/// In-progress expression plus the last computed result
#[derive(Debug, Clone)]
pub struct ExpressionBuffer {
    text: String,
    last_result: Option<f64>,
    evaluator: Evaluator,
    significant_digits: usize,
}

impl Default for ExpressionBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionBuffer {
    /// Creates an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::with_precision(DEFAULT_SIGNIFICANT_DIGITS)
    }

    /// Creates an empty buffer that rounds results to `significant_digits`
    #[must_use]
    pub fn with_precision(significant_digits: usize) -> Self {
        Self {
            text: String::new(),
            last_result: None,
            evaluator: Evaluator::new(),
            significant_digits,
        }
    }

    /// Returns the buffer text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns true if nothing has been typed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the last successful result
    #[must_use]
    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    /// Formats a value with this buffer's precision
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        format_number_with_precision(value, self.significant_digits)
    }

    /// Text for the main display: the buffer, else the last result, else `0`
    #[must_use]
    pub fn display_text(&self) -> String {
        if !self.text.is_empty() {
            return self.text.clone();
        }
        self.last_result
            .map_or_else(|| "0".to_string(), |value| self.format(value))
    }

    /// Text typed since the last operator
    fn trailing_segment(&self) -> &str {
        self.text
            .rsplit(Operation::is_operator_char)
            .next()
            .unwrap_or_default()
    }

    fn trailing_operator(&self) -> Option<Operation> {
        self.text.chars().next_back().and_then(Operation::from_char)
    }

    /// Appends a keypad character
    ///
    /// - digits are always appended
    /// - `.` is dropped if the current number already has one, and gets a
    ///   leading `0` if the current number is empty
    /// - `*` and `/` cannot start the buffer; an operator replaces a
    ///   trailing operator
    /// - anything else is appended as-is and left for `evaluate` to reject
    pub fn append(&mut self, ch: char) -> Appended {
        if ch == '.' {
            let segment = self.trailing_segment();
            if segment.contains('.') {
                return Appended::Rejected;
            }
            if segment.is_empty() {
                self.text.push_str("0.");
                return Appended::ZeroPadded;
            }
        }

        if let Some(op) = Operation::from_char(ch) {
            if self.text.is_empty() && op.requires_left_operand() {
                return Appended::Rejected;
            }
            if let Some(previous) = self.trailing_operator() {
                self.text.pop();
                self.text.push(ch);
                return Appended::Replaced(previous);
            }
        }

        self.text.push(ch);
        Appended::Inserted
    }

    /// Removes the last character; returns false on an empty buffer
    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    /// Empties the buffer and forgets the last result
    pub fn clear(&mut self) {
        self.text.clear();
        self.last_result = None;
    }

    /// Evaluates the buffer
    ///
    /// Returns `Ok(None)` for an empty buffer. On failure the buffer and last
    /// result are left untouched. On success the buffer is replaced by the
    /// formatted result, so further input extends the result text.
    pub fn evaluate(&mut self) -> CalcResult<Option<Evaluation>> {
        if self.text.is_empty() {
            return Ok(None);
        }
        if !allowed_expression().is_match(&self.text) {
            return Err(CalcError::InvalidInput);
        }

        let normalized = normalize_glyphs(&self.text);
        let value = self.evaluator.evaluate_str(&normalized)?;
        if !value.is_finite() {
            return Err(CalcError::Math(MathFault::NonFinite(value)));
        }

        let display = self.format(value);
        let expression = std::mem::replace(&mut self.text, display.clone());
        self.last_result = Some(value);

        Ok(Some(Evaluation {
            expression,
            value,
            display,
        }))
    }
}

/// Maps `÷` and `×` onto `/` and `*`
#[must_use]
pub fn normalize_glyphs(expression: &str) -> String {
    expression
        .chars()
        .map(|ch| {
            GLYPHS
                .iter()
                .find(|(glyph, _)| *glyph == ch)
                .map_or(ch, |(_, ascii)| *ascii)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EvalError;

    fn typed(keys: &str) -> ExpressionBuffer {
        let mut buffer = ExpressionBuffer::new();
        for ch in keys.chars() {
            buffer.append(ch);
        }
        buffer
    }

    // ===== append tests =====

    #[test]
    fn test_digits_concatenate() {
        assert_eq!(typed("1234567890").as_str(), "1234567890");
    }

    #[test]
    fn test_second_decimal_point_is_ignored() {
        let mut buffer = typed("1.2");
        assert_eq!(buffer.append('.'), Appended::Rejected);
        assert_eq!(buffer.as_str(), "1.2");
    }

    #[test]
    fn test_decimal_point_on_empty_buffer_synthesizes_zero() {
        let mut buffer = ExpressionBuffer::new();
        assert_eq!(buffer.append('.'), Appended::ZeroPadded);
        assert_eq!(buffer.as_str(), "0.");
    }

    #[test]
    fn test_decimal_point_after_operator_synthesizes_zero() {
        assert_eq!(typed("1.5+.").as_str(), "1.5+0.");
    }

    #[test]
    fn test_decimal_point_allowed_in_each_segment() {
        assert_eq!(typed("1.5*2.5").as_str(), "1.5*2.5");
    }

    #[test]
    fn test_operator_overwrites_trailing_operator() {
        let mut buffer = typed("3+");
        assert_eq!(buffer.append('-'), Appended::Replaced(Operation::Add));
        assert_eq!(buffer.as_str(), "3-");
    }

    #[test]
    fn test_multiply_and_divide_cannot_start_buffer() {
        let mut buffer = ExpressionBuffer::new();
        assert_eq!(buffer.append('*'), Appended::Rejected);
        assert_eq!(buffer.append('/'), Appended::Rejected);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_sign_may_start_buffer() {
        assert_eq!(typed("-").as_str(), "-");
        assert_eq!(typed("+").as_str(), "+");
    }

    #[test]
    fn test_leading_sign_can_be_overwritten_by_multiply() {
        assert_eq!(typed("-*").as_str(), "*");
    }

    #[test]
    fn test_other_characters_append_verbatim() {
        assert_eq!(typed("(2+3)").as_str(), "(2+3)");
        assert_eq!(typed("2x").as_str(), "2x");
    }

    #[test]
    fn test_appended_changed() {
        assert!(Appended::Inserted.changed());
        assert!(Appended::ZeroPadded.changed());
        assert!(Appended::Replaced(Operation::Add).changed());
        assert!(!Appended::Rejected.changed());
    }

    // ===== backspace / clear tests =====

    #[test]
    fn test_backspace_removes_last_character() {
        let mut buffer = typed("12+");
        assert!(buffer.backspace());
        assert_eq!(buffer.as_str(), "12");
    }

    #[test]
    fn test_backspace_on_empty_buffer_is_noop() {
        let mut buffer = ExpressionBuffer::new();
        assert!(!buffer.backspace());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_clear_resets_text_and_result() {
        let mut buffer = typed("6*7");
        buffer.evaluate().unwrap();
        buffer.append('1');
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.last_result(), None);
        assert_eq!(buffer.display_text(), "0");
    }

    // ===== evaluate tests =====

    #[test]
    fn test_evaluate_precedence() {
        let mut buffer = typed("2+3*4");
        let evaluation = buffer.evaluate().unwrap().unwrap();
        assert_eq!(evaluation.value, 14.0);
        assert_eq!(evaluation.history_line(), "2+3*4 =");
        assert_eq!(buffer.as_str(), "14");
        assert_eq!(buffer.last_result(), Some(14.0));
    }

    #[test]
    fn test_evaluate_empty_buffer_is_noop() {
        let mut buffer = ExpressionBuffer::new();
        assert_eq!(buffer.evaluate(), Ok(None));
        assert_eq!(buffer.last_result(), None);
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        let mut buffer = typed("5/0");
        assert_eq!(
            buffer.evaluate(),
            Err(CalcError::Math(MathFault::NonFinite(f64::INFINITY)))
        );
        assert_eq!(buffer.as_str(), "5/0");
        assert_eq!(buffer.last_result(), None);
    }

    #[test]
    fn test_evaluate_zero_over_zero() {
        let mut buffer = typed("0/0");
        assert!(matches!(
            buffer.evaluate(),
            Err(CalcError::Math(MathFault::NonFinite(v))) if v.is_nan()
        ));
    }

    #[test]
    fn test_evaluate_dangling_operator_is_math_error() {
        let mut buffer = typed("7+");
        assert!(matches!(
            buffer.evaluate(),
            Err(CalcError::Math(MathFault::Eval(EvalError::Parse(_))))
        ));
        assert_eq!(buffer.as_str(), "7+");
    }

    #[test]
    fn test_evaluate_rejects_foreign_characters() {
        let mut buffer = typed("2x3");
        assert_eq!(buffer.evaluate(), Err(CalcError::InvalidInput));
        assert_eq!(buffer.as_str(), "2x3");
    }

    #[test]
    fn test_evaluate_rejects_glyphs_before_normalizing() {
        let mut buffer = typed("6\u{00F7}3");
        assert_eq!(buffer.evaluate(), Err(CalcError::InvalidInput));
    }

    #[test]
    fn test_evaluate_keeps_previous_result_on_failure() {
        let mut buffer = typed("1+1");
        buffer.evaluate().unwrap();
        buffer.append('/');
        buffer.append('0');
        assert!(buffer.evaluate().is_err());
        assert_eq!(buffer.last_result(), Some(2.0));
        assert_eq!(buffer.as_str(), "2/0");
    }

    #[test]
    fn test_digits_after_result_extend_it() {
        let mut buffer = typed("6*7");
        buffer.evaluate().unwrap();
        buffer.append('1');
        assert_eq!(buffer.as_str(), "421");
    }

    #[test]
    fn test_result_in_exponent_form_is_invalid_input() {
        let mut buffer = typed("100000000000*10000000000");
        buffer.evaluate().unwrap();
        assert_eq!(buffer.as_str(), "1e+21");
        assert_eq!(buffer.evaluate(), Err(CalcError::InvalidInput));
    }

    #[test]
    fn test_evaluate_rounds_fractional_result() {
        let mut buffer = typed("1/3");
        buffer.evaluate().unwrap();
        assert_eq!(buffer.as_str(), "0.333333333333");
    }

    #[test]
    fn test_evaluate_rounds_exact_ties_up() {
        let mut buffer = typed("200000000001/2");
        let evaluation = buffer.evaluate().unwrap().unwrap();
        assert_eq!(evaluation.display, "100000000001");

        let mut buffer = typed("-200000000001/2");
        let evaluation = buffer.evaluate().unwrap().unwrap();
        assert_eq!(evaluation.display, "-100000000001");
    }

    #[test]
    fn test_evaluate_leading_zero_literal_is_math_error() {
        let mut buffer = typed("07+1");
        assert!(matches!(
            buffer.evaluate(),
            Err(CalcError::Math(MathFault::Eval(EvalError::Parse(_))))
        ));
        assert_eq!(buffer.as_str(), "07+1");
    }

    #[test]
    fn test_digit_after_zero_result_is_math_error() {
        let mut buffer = typed("3-3");
        buffer.evaluate().unwrap();
        buffer.append('7');
        assert_eq!(buffer.as_str(), "07");
        assert!(matches!(buffer.evaluate(), Err(CalcError::Math(_))));
    }

    #[test]
    fn test_evaluate_with_custom_precision() {
        let mut buffer = ExpressionBuffer::with_precision(3);
        for ch in "2/3".chars() {
            buffer.append(ch);
        }
        buffer.evaluate().unwrap();
        assert_eq!(buffer.as_str(), "0.667");
    }

    // ===== display tests =====

    #[test]
    fn test_display_text_fallbacks() {
        let mut buffer = ExpressionBuffer::new();
        assert_eq!(buffer.display_text(), "0");
        buffer.append('9');
        assert_eq!(buffer.display_text(), "9");
        buffer.evaluate().unwrap();
        buffer.backspace();
        assert_eq!(buffer.display_text(), "9");
    }

    #[test]
    fn test_normalize_glyphs() {
        assert_eq!(normalize_glyphs("8\u{00F7}2\u{00D7}3"), "8/2*3");
        assert_eq!(normalize_glyphs("1+2"), "1+2");
    }
}
