//! AST evaluator
//!
//! Plain `f64` arithmetic. Whether an infinite or NaN result is acceptable is
//! left to the caller, so `1/(1/0)` still evaluates to `0`.

use crate::core::parser::{AstNode, Parser};
use crate::core::EvalResult;

/// Evaluator for AST expressions
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates an AST node
    #[must_use]
    pub fn evaluate(&self, node: &AstNode) -> f64 {
        match node {
            AstNode::Number(n) => *n,
            AstNode::Negate(inner) => -self.evaluate(inner),
            AstNode::BinaryOp { left, op, right } => {
                op.apply(self.evaluate(left), self.evaluate(right))
            }
        }
    }

    /// Parses and evaluates a string expression
    pub fn evaluate_str(&self, input: &str) -> EvalResult<f64> {
        let ast = Parser::parse_str(input)?;
        Ok(self.evaluate(&ast))
    }
}
