use std::fmt;

use thiserror::Error;

use crate::chars::Symbol;

/// A failed parse. Parsing stops at the first rule whose required input is
/// missing; no partial tree is kept.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("expected {expected}, found {} at {rule} (offset {offset})", Found(.found))]
pub struct ParseError {
    /// What the failing rule required.
    pub expected: Expected,
    /// The next character, or `None` at end of input.
    pub found: Option<char>,
    /// The grammar rule that failed.
    pub rule: Rule,
    /// Byte offset into the whitespace-stripped source.
    pub offset: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expected {
    Digit,
    Letter,
    Symbol(Symbol),
    /// The variable name already bound earlier in the same expression.
    Variable(char),
    EndOfInput,
    /// A complete digit string that the float type refused to convert. `f32`
    /// and `f64` accept every digit string; only a custom [`crate::FloatExt`]
    /// can produce this.
    Number,
    /// Groups and exponents nested deeper than [`crate::MAX_NESTING`].
    ShallowerNesting,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit => f.write_str("a digit"),
            Self::Letter => f.write_str("a letter"),
            Self::Symbol(symbol) => write!(f, "'{}'", symbol.as_char()),
            Self::Variable(name) => write!(f, "variable '{name}'"),
            Self::EndOfInput => f.write_str("end of input"),
            Self::Number => f.write_str("a number"),
            Self::ShallowerNesting => {
                write!(f, "at most {} levels of nesting", crate::MAX_NESTING)
            }
        }
    }
}

/// Grammar rules, named the way they appear in diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    Expression,
    Sum,
    Term,
    Factor,
    Base,
    Primary,
    Variable,
    Number,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Expression => "EXPRESSION",
            Self::Sum => "SUM",
            Self::Term => "TERM",
            Self::Factor => "FACTOR",
            Self::Base => "BASE",
            Self::Primary => "PRIMARY",
            Self::Variable => "VARIABLE",
            Self::Number => "NUMBER",
        })
    }
}

struct Found<'a>(&'a Option<char>);

impl fmt::Display for Found<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.0 {
            Some(c) => write!(f, "'{c}'"),
            None => f.write_str("end of input"),
        }
    }
}
