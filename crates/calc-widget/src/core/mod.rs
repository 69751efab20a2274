//! Calculator core: expression buffer, parser, and evaluator
//!
//! Nothing in here touches a display. The buffer reports outcomes and the
//! controller decides what the user sees.

pub mod buffer;
pub mod evaluator;
pub mod format;
mod operations;
pub mod parser;

pub use buffer::{Appended, ExpressionBuffer};
pub use format::{format_number, format_number_with_precision};
pub use operations::Operation;

use thiserror::Error;

/// Result type for parsing and evaluating expressions
pub type EvalResult<T> = Result<T, EvalError>;

/// Result type for buffer evaluation
pub type CalcResult<T> = Result<T, CalcError>;

/// Failures raised by the arithmetic parser
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// No tokens to evaluate
    #[error("Empty expression")]
    EmptyExpression,
    /// Invalid expression syntax
    #[error("Invalid expression: {0}")]
    Parse(String),
}

/// Reasons an evaluation produced no result
///
/// The two variants map one-to-one onto the messages the user sees.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// The buffer holds a character outside the expression grammar
    #[error("Invalid input")]
    InvalidInput,
    /// The expression did not parse or produced a non-finite value
    #[error("Math error")]
    Math(#[source] MathFault),
}

impl CalcError {
    /// Returns the message shown on the display
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// What went wrong inside a `Math` error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MathFault {
    /// The parser rejected the expression
    #[error(transparent)]
    Eval(#[from] EvalError),
    /// Division by zero or overflow
    #[error("non-finite result: {0}")]
    NonFinite(f64),
}

impl From<EvalError> for CalcError {
    fn from(err: EvalError) -> Self {
        Self::Math(MathFault::Eval(err))
    }
}
