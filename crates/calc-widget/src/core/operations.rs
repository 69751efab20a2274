//! The four binary operators the keypad can enter

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operation {
    /// Returns the operator symbol as it appears in the buffer
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Parses a buffer character into an operator
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Returns true if `ch` is one of the four operator characters
    #[must_use]
    pub const fn is_operator_char(ch: char) -> bool {
        Self::from_char(ch).is_some()
    }

    /// Returns true if the operator may not open an expression
    ///
    /// A leading `-` or `+` is a sign; a leading `*` or `/` is meaningless.
    #[must_use]
    pub const fn requires_left_operand(&self) -> bool {
        matches!(self, Self::Multiply | Self::Divide)
    }

    /// Applies the operator with IEEE-754 semantics
    ///
    /// Division by zero yields an infinity or NaN; callers decide whether a
    /// non-finite value is acceptable.
    #[must_use]
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_round_trips_through_from_char() {
        for op in [
            Operation::Add,
            Operation::Subtract,
            Operation::Multiply,
            Operation::Divide,
        ] {
            assert_eq!(Operation::from_char(op.symbol()), Some(op));
        }
    }

    #[test]
    fn test_from_char_rejects_non_operators() {
        for ch in ['%', '^', '(', ')', '.', '7', ' ', '÷', '×'] {
            assert_eq!(Operation::from_char(ch), None, "{ch:?}");
        }
    }

    #[test]
    fn test_is_operator_char() {
        assert!(Operation::is_operator_char('+'));
        assert!(Operation::is_operator_char('/'));
        assert!(!Operation::is_operator_char('x'));
    }

    #[test]
    fn test_requires_left_operand() {
        assert!(Operation::Multiply.requires_left_operand());
        assert!(Operation::Divide.requires_left_operand());
        assert!(!Operation::Add.requires_left_operand());
        assert!(!Operation::Subtract.requires_left_operand());
    }

    #[test]
    fn test_apply_arithmetic() {
        assert_eq!(Operation::Add.apply(2.0, 3.0), 5.0);
        assert_eq!(Operation::Subtract.apply(2.0, 3.0), -1.0);
        assert_eq!(Operation::Multiply.apply(2.0, 3.0), 6.0);
        assert_eq!(Operation::Divide.apply(3.0, 2.0), 1.5);
    }

    #[test]
    fn test_apply_division_by_zero_is_not_finite() {
        assert_eq!(Operation::Divide.apply(5.0, 0.0), f64::INFINITY);
        assert_eq!(Operation::Divide.apply(-5.0, 0.0), f64::NEG_INFINITY);
        assert!(Operation::Divide.apply(0.0, 0.0).is_nan());
    }
}
