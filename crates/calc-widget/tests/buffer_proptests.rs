//! Property-based tests for the expression buffer
//!
//! Input sequences are drawn from the keypad alphabet, so every property
//! holds for anything a user can type.

use calc_widget::core::{format_number, Appended, CalcError, ExpressionBuffer, Operation};
use calc_widget::input::{key_to_action, KeypadAction};
use proptest::prelude::*;

// ===== Strategy definitions =====

/// Generate any operator character
fn operator_strategy() -> impl Strategy<Value = char> {
    prop_oneof![Just('+'), Just('-'), Just('*'), Just('/')]
}

/// Generate any keypad character
fn keypad_char_strategy() -> impl Strategy<Value = char> {
    prop_oneof![
        3 => proptest::char::range('0', '9'),
        1 => Just('.'),
        2 => operator_strategy(),
    ]
}

/// Generate a sequence of keypad characters
fn keypad_input_strategy() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(keypad_char_strategy(), 0..40)
}

fn typed(chars: &[char]) -> ExpressionBuffer {
    let mut buffer = ExpressionBuffer::new();
    for ch in chars {
        buffer.append(*ch);
    }
    buffer
}

// ===== Append properties =====

proptest! {
    /// Operators are never adjacent; a second one replaces the first
    #[test]
    fn prop_no_adjacent_operators(chars in keypad_input_strategy()) {
        let buffer = typed(&chars);
        let text: Vec<char> = buffer.as_str().chars().collect();
        for pair in text.windows(2) {
            prop_assert!(
                !(Operation::is_operator_char(pair[0]) && Operation::is_operator_char(pair[1])),
                "adjacent operators in {:?}",
                buffer.as_str()
            );
        }
    }

    /// Each number has at most one decimal point
    #[test]
    fn prop_one_decimal_point_per_number(chars in keypad_input_strategy()) {
        let buffer = typed(&chars);
        for number in buffer.as_str().split(Operation::is_operator_char) {
            prop_assert!(number.matches('.').count() <= 1, "{:?}", buffer.as_str());
        }
    }

    /// A decimal point always follows a digit
    #[test]
    fn prop_decimal_point_follows_digit(chars in keypad_input_strategy()) {
        let buffer = typed(&chars);
        let text: Vec<char> = buffer.as_str().chars().collect();
        for (i, ch) in text.iter().enumerate() {
            if *ch == '.' {
                prop_assert!(i > 0 && text[i - 1].is_ascii_digit(), "{:?}", buffer.as_str());
            }
        }
    }

    /// Only `-` and `+` may open the buffer
    #[test]
    fn prop_multiply_divide_rejected_on_empty(op in prop_oneof![Just('*'), Just('/')]) {
        let mut buffer = ExpressionBuffer::new();
        prop_assert_eq!(buffer.append(op), Appended::Rejected);
        prop_assert!(buffer.is_empty());
    }

    /// Digits always land at the end of the buffer
    #[test]
    fn prop_digits_always_append(chars in keypad_input_strategy(), d in proptest::char::range('0', '9')) {
        let mut buffer = typed(&chars);
        let before = buffer.as_str().to_string();
        prop_assert_eq!(buffer.append(d), Appended::Inserted);
        prop_assert_eq!(buffer.as_str(), format!("{before}{d}"));
    }

    /// Backspace undoes exactly one character
    #[test]
    fn prop_backspace_removes_last_char(chars in keypad_input_strategy()) {
        let mut buffer = typed(&chars);
        let mut expected = buffer.as_str().to_string();
        let popped = expected.pop().is_some();
        prop_assert_eq!(buffer.backspace(), popped);
        prop_assert_eq!(buffer.as_str(), expected);
    }
}

// ===== Evaluate properties =====

proptest! {
    /// Evaluation either fails and leaves the buffer alone, or replaces it
    /// with the finite formatted result
    #[test]
    fn prop_evaluate_is_all_or_nothing(chars in keypad_input_strategy()) {
        let mut buffer = typed(&chars);
        let before = buffer.as_str().to_string();
        match buffer.evaluate() {
            Ok(None) => prop_assert!(before.is_empty()),
            Ok(Some(evaluation)) => {
                prop_assert!(evaluation.value.is_finite());
                prop_assert_eq!(&evaluation.expression, &before);
                prop_assert_eq!(buffer.as_str(), evaluation.display.as_str());
                prop_assert_eq!(buffer.last_result(), Some(evaluation.value));
            }
            Err(err) => {
                prop_assert!(matches!(err, CalcError::Math(_)), "{:?}", before);
                prop_assert_eq!(buffer.as_str(), before.as_str());
                prop_assert_eq!(buffer.last_result(), None);
            }
        }
    }

    /// Keypad input never trips the character allow-list
    #[test]
    fn prop_keypad_input_is_never_invalid(chars in keypad_input_strategy()) {
        let mut buffer = typed(&chars);
        prop_assert_ne!(buffer.evaluate().err(), Some(CalcError::InvalidInput));
    }

    /// The display is never blank
    #[test]
    fn prop_display_never_blank(chars in keypad_input_strategy(), evaluate in any::<bool>()) {
        let mut buffer = typed(&chars);
        if evaluate {
            let _ = buffer.evaluate();
        }
        prop_assert!(!buffer.display_text().is_empty());
    }

    /// Small integer sums match integer arithmetic
    #[test]
    fn prop_integer_addition(a in 0u32..1_000_000, b in 0u32..1_000_000) {
        let mut buffer = ExpressionBuffer::new();
        for ch in format!("{a}+{b}").chars() {
            buffer.append(ch);
        }
        let evaluation = buffer.evaluate().unwrap().unwrap();
        prop_assert_eq!(evaluation.display, (u64::from(a) + u64::from(b)).to_string());
    }

    /// Division by zero is always a math error
    #[test]
    fn prop_division_by_zero_fails(a in 0u32..1_000_000) {
        let mut buffer = ExpressionBuffer::new();
        for ch in format!("{a}/0").chars() {
            buffer.append(ch);
        }
        prop_assert!(matches!(buffer.evaluate(), Err(CalcError::Math(_))));
    }
}

// ===== Formatting and key mapping properties =====

proptest! {
    /// Integers print exactly, without a decimal point
    #[test]
    fn prop_format_integers_exactly(value in -999_999_999_999_999i64..1_000_000_000_000_000i64) {
        prop_assert_eq!(format_number(value as f64), value.to_string());
    }

    /// Fractional results keep at most 12 significant digits and stay within
    /// rounding distance of the value
    #[test]
    fn prop_format_fractions_fit_twelve_digits(value in -1e6f64..1e6f64) {
        prop_assume!(value.fract() != 0.0 && value.abs() >= 1e-6);
        let text = format_number(value);
        prop_assert!(!text.contains('e'), "{text}");
        let significant = text
            .trim_start_matches('-')
            .replace('.', "")
            .trim_start_matches('0')
            .trim_end_matches('0')
            .len();
        prop_assert!(significant <= 12, "{value} -> {text}");
        let parsed: f64 = text.parse().unwrap();
        prop_assert!((parsed - value).abs() <= value.abs() * 1e-11, "{value} -> {text}");
    }

    /// Every single-character keypad key maps to an append of itself
    #[test]
    fn prop_keypad_chars_map_to_append(ch in keypad_char_strategy()) {
        prop_assert_eq!(key_to_action(&ch.to_string()), Some(KeypadAction::Append(ch)));
    }
}
