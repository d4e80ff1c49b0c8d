//! Single-variable expression parser and evaluator for function plotting.
//!
//! An expression such as `2x^2 - 3(x + 1)` is parsed once into an immutable
//! tree, then sampled at as many points as the caller needs. Parsing is strict
//! and all-or-nothing; evaluation never fails and follows IEEE-754 float
//! semantics, so `1/0` is infinity rather than an error.
//!
//! # Grammar
//!
//! - `+` and `-` bind loosest, then `*` and `/`, then unary `-`, then `^`.
//! - `^` is right-associative: `2^3^2` is `2^(3^2)`.
//! - A factor followed directly by `(` or a letter multiplies: `2x`,
//!   `x(x+1)` and `(x)(x)` are products. A digit never does: `23` is a number.
//! - Variables are single ASCII letters. The first one seen is the
//!   expression's variable, and no other letter may appear.
//! - Numbers are decimal, like `3` or `0.25`; no exponent notation.
//!
//! # Example
//!
//! ```rust
//! let parsed = plot_expr::parse("2x^2 - 3(x + 1)").unwrap();
//! assert_eq!(parsed.variable(), Some('x'));
//! assert_eq!(parsed.evaluate(2.0), -1.0);
//!
//! let ys = parsed.evaluate_many(&[0.0, 1.0, 2.0]);
//! assert_eq!(ys, [-3.0, -4.0, -1.0]);
//!
//! assert!(plot_expr::parse("x + y").is_err());
//! ```

mod chars;
mod error;
mod evaluate;
mod expression;
mod parse;

pub use chars::Symbol;
pub use error::{Expected, ParseError, Rule};
pub use expression::*;

/// How deeply parenthesized groups and exponents may nest. Deeper input is
/// rejected with [`Expected::ShallowerNesting`] so that parsing, evaluation
/// and dropping a tree stay within a thread's stack.
pub const MAX_NESTING: usize = 256;

/// Parse `input` as an `f64`-valued expression.
///
/// Shorthand for [`Expression::<f64>::parse`].
pub fn parse(input: &str) -> Result<Expression, ParseError> {
    Expression::parse(input)
}

pub trait FloatExt:
    num_traits::Float + std::str::FromStr + std::fmt::Debug + std::fmt::Display + Send + Sync
{
}
impl FloatExt for f32 {}
impl FloatExt for f64 {}
