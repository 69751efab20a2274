//! Keypad Calculator Widget
//!
//! An expression buffer that accepts keypad and keyboard input, evaluates
//! `+ - * /` arithmetic with parentheses, and renders through pluggable
//! sinks. Failed evaluations show a transient message that reverts after a
//! configurable delay.
//!
//! # Layers
//!
//! - [`core`]: the buffer, input normalization, parser, evaluator, and number
//!   formatting
//! - [`controller`]: binds a buffer to a [`sink::RenderSink`] and
//!   [`sink::HistorySink`]
//! - [`wasm`]: the page (keypad, theme toggle, revert timer) on a mock DOM,
//!   plus browser bindings behind the `wasm` feature
//!
//! # Example
//!
//! ```rust
//! use calc_widget::prelude::*;
//!
//! let mut calc = Calculator::new(RecordingSink::new());
//! for ch in "12/4+1".chars() {
//!     calc.append(ch);
//! }
//! calc.evaluate();
//! assert_eq!(calc.sink().display(), "4");
//! assert_eq!(calc.sink().history(), "12/4+1 =");
//!
//! calc.append('/');
//! calc.append('0');
//! calc.evaluate();
//! assert_eq!(calc.sink().display(), "Math error");
//! ```

// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod controller;
pub mod core;
pub mod input;
pub mod sink;
pub mod timer;

/// Web frontend - the mock DOM page is always available for testing
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, WidgetConfig};
    pub use crate::controller::Calculator;
    pub use crate::core::buffer::Evaluation;
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{
        format_number, Appended, CalcError, CalcResult, ExpressionBuffer, Operation,
    };
    pub use crate::input::{key_to_action, KeypadAction};
    pub use crate::sink::{HistorySink, RecordingSink, RenderSink, SinkEvent};
    pub use crate::timer::RevertTimer;
    pub use crate::wasm::{CalculatorPage, DomEvent, MemoryStore, MockDom, Theme};
}
