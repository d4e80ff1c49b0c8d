//! Character classes and a cursor over whitespace-stripped input.
//!
//! There is no tokenizer: grammar rules look at one character at a time and
//! consume it only when it belongs to the class they want.

use crate::error::{Expected, ParseError, Rule};

/// The single-character operators and punctuation of the grammar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Plus,
    Minus,
    Times,
    Divide,
    Caret,
    OpenParen,
    CloseParen,
    Dot,
}

impl Symbol {
    pub fn as_char(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Times => '*',
            Self::Divide => '/',
            Self::Caret => '^',
            Self::OpenParen => '(',
            Self::CloseParen => ')',
            Self::Dot => '.',
        }
    }
}

/// A class of characters a rule may ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum CharClass {
    Digit,
    Letter,
    Symbol(Symbol),
    Exactly(char),
}

impl CharClass {
    pub fn matches(self, c: char) -> bool {
        match self {
            Self::Digit => is_digit(c),
            Self::Letter => is_letter(c),
            Self::Symbol(symbol) => c == symbol.as_char(),
            Self::Exactly(expected) => c == expected,
        }
    }

    fn expected(self) -> Expected {
        match self {
            Self::Digit => Expected::Digit,
            Self::Letter => Expected::Letter,
            Self::Symbol(symbol) => Expected::Symbol(symbol),
            Self::Exactly(c) => Expected::Variable(c),
        }
    }
}

impl From<Symbol> for CharClass {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

pub(crate) fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

pub(crate) fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// Removes every whitespace character, wherever it appears.
pub(crate) fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

pub(crate) struct CharStream<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> CharStream<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }

    pub fn peek(&self) -> Option<char> {
        self.text[self.offset..].chars().next()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The text consumed since `start`, an earlier [`Self::offset`].
    pub fn consumed_since(&self, start: usize) -> &'a str {
        &self.text[start..self.offset]
    }

    pub fn is_at_end(&self) -> bool {
        self.offset == self.text.len()
    }

    /// False at end of input.
    pub fn next_is(&self, class: impl Into<CharClass>) -> bool {
        let class = class.into();
        self.peek().is_some_and(|c| class.matches(c))
    }

    /// Consumes the next character if it is in `class`.
    pub fn eat(&mut self, class: impl Into<CharClass>) -> bool {
        self.spit(class).is_some()
    }

    /// Consumes and returns the next character if it is in `class`.
    pub fn spit(&mut self, class: impl Into<CharClass>) -> Option<char> {
        let class = class.into();
        let c = self.peek().filter(|&c| class.matches(c))?;
        self.offset += c.len_utf8();
        Some(c)
    }

    pub fn require(
        &mut self,
        class: impl Into<CharClass>,
        rule: Rule,
    ) -> Result<(), ParseError> {
        self.require_spit(class, rule).map(|_| ())
    }

    pub fn require_spit(
        &mut self,
        class: impl Into<CharClass>,
        rule: Rule,
    ) -> Result<char, ParseError> {
        let class = class.into();
        self.spit(class).ok_or_else(|| self.error(class.expected(), rule))
    }

    /// Builds an error describing the current position.
    pub fn error(&self, expected: Expected, rule: Rule) -> ParseError {
        ParseError {
            expected,
            found: self.peek(),
            rule,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes() {
        assert!(is_digit('0') && is_digit('9'));
        assert!(!is_digit('a') && !is_digit('.'));
        assert!(is_letter('a') && is_letter('Z'));
        assert!(!is_letter('é') && !is_letter('1') && !is_letter('_'));
        assert!(CharClass::Symbol(Symbol::Caret).matches('^'));
        assert!(!CharClass::Exactly('x').matches('X'));
    }

    #[test]
    fn end_of_input_never_matches() {
        let mut stream = CharStream::new("");
        assert!(stream.is_at_end());
        assert_eq!(stream.peek(), None);
        assert!(!stream.next_is(CharClass::Digit));
        assert!(!stream.next_is(Symbol::OpenParen));
        assert!(!stream.eat(Symbol::Minus));
        assert_eq!(stream.spit(CharClass::Letter), None);
    }

    #[test]
    fn eat_only_consumes_on_match() {
        let mut stream = CharStream::new("-1");
        assert!(!stream.eat(Symbol::Plus));
        assert_eq!(stream.offset(), 0);
        assert!(stream.eat(Symbol::Minus));
        assert_eq!(stream.spit(CharClass::Digit), Some('1'));
        assert!(stream.is_at_end());
    }

    #[test]
    fn require_reports_position() {
        let mut stream = CharStream::new("(a");
        stream.require(Symbol::OpenParen, Rule::Primary).unwrap();
        let err = stream.require(CharClass::Digit, Rule::Number).unwrap_err();
        assert_eq!(
            err,
            ParseError {
                expected: Expected::Digit,
                found: Some('a'),
                rule: Rule::Number,
                offset: 1,
            }
        );
    }

    #[test]
    fn strips_all_whitespace() {
        assert_eq!(strip_whitespace(" 2 x\t+\n1 "), "2x+1");
    }
}
