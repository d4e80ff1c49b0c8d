//! Recursive descent over the grammar
//!
//! ```text
//! sum     = term (("+" | "-") term)*
//! term    = factor (("*" | &"(" | &letter) factor | "/" factor)*
//! factor  = "-"* base
//! base    = primary ("^" factor)?
//! primary = variable | number | "(" sum ")"
//! number  = digit+ ("." digit+)?
//! ```
//!
//! Every choice commits on a single character of lookahead; there is no
//! backtracking and the first failure aborts the whole parse.

use crate::chars::{strip_whitespace, CharClass, CharStream, Symbol};
use crate::error::{Expected, ParseError, Rule};
use crate::expression::{AddOp, Expression, MulOp, Node};
use crate::{FloatExt, MAX_NESTING};

/// State shared by every rule during one top-level parse.
#[derive(Debug, Default)]
struct ParseContext {
    /// Set by the first variable token, then enforced on every later one.
    variable: Option<char>,
    /// Open groups and exponents around the current position.
    depth: usize,
}

impl ParseContext {
    fn enter(&mut self, stream: &CharStream, rule: Rule) -> Result<(), ParseError> {
        if self.depth == MAX_NESTING {
            return Err(stream.error(Expected::ShallowerNesting, rule));
        }
        self.depth += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

impl<R: FloatExt> Expression<R> {
    /// Parse the expression from `input`.
    ///
    /// Whitespace anywhere in `input` is ignored. The first letter read
    /// becomes the expression's variable; any other letter is an error.
    ///
    /// The whole input must form one expression: anything left over after it,
    /// as in `1)` or `x2`, fails at [`Rule::Expression`]. Groups and exponents
    /// may nest at most [`MAX_NESTING`] levels deep.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let source = strip_whitespace(input);
        log::debug!("parsing expression {source:?}");

        let mut context = ParseContext::default();
        let mut stream = CharStream::new(&source);
        let root = parse_expression(&mut stream, &mut context).inspect_err(|err| {
            log::debug!("failed to parse {source:?}: {err}");
        })?;

        Ok(Self {
            root,
            variable: context.variable,
            source,
        })
    }

    /// Parse `input` and report only which variable name it uses.
    pub fn parse_variable_name(input: &str) -> Result<Option<char>, ParseError> {
        Ok(Self::parse(input)?.variable)
    }
}

fn parse_expression<R: FloatExt>(
    stream: &mut CharStream,
    context: &mut ParseContext,
) -> Result<Node<R>, ParseError> {
    let root = parse_sum(stream, context)?;
    if !stream.is_at_end() {
        return Err(stream.error(Expected::EndOfInput, Rule::Expression));
    }
    Ok(root)
}

fn parse_sum<R: FloatExt>(
    stream: &mut CharStream,
    context: &mut ParseContext,
) -> Result<Node<R>, ParseError> {
    log::trace!("{} at offset {}", Rule::Sum, stream.offset());
    let first = parse_term(stream, context)?;

    let mut rest = Vec::new();
    loop {
        let op = if stream.eat(Symbol::Plus) {
            AddOp::Add
        } else if stream.eat(Symbol::Minus) {
            AddOp::Subtract
        } else {
            break;
        };
        rest.push((parse_term(stream, context)?, op));
    }

    Ok(Node::Sum {
        first: Box::new(first),
        rest,
    })
}

fn parse_term<R: FloatExt>(
    stream: &mut CharStream,
    context: &mut ParseContext,
) -> Result<Node<R>, ParseError> {
    log::trace!("{} at offset {}", Rule::Term, stream.offset());
    let first = parse_factor(stream, context)?;

    let mut rest = Vec::new();
    loop {
        // A following "(" or letter multiplies without being consumed here. A
        // digit never does, so "23" stays one number.
        let op = if stream.eat(Symbol::Times)
            || stream.next_is(Symbol::OpenParen)
            || stream.next_is(CharClass::Letter)
        {
            MulOp::Multiply
        } else if stream.eat(Symbol::Divide) {
            MulOp::Divide
        } else {
            break;
        };
        rest.push((parse_factor(stream, context)?, op));
    }

    Ok(Node::Product {
        first: Box::new(first),
        rest,
    })
}

fn parse_factor<R: FloatExt>(
    stream: &mut CharStream,
    context: &mut ParseContext,
) -> Result<Node<R>, ParseError> {
    log::trace!("{} at offset {}", Rule::Factor, stream.offset());
    let mut negate = false;
    while stream.eat(Symbol::Minus) {
        negate = !negate;
    }

    Ok(Node::UnaryChain {
        negate,
        inner: Box::new(parse_base(stream, context)?),
    })
}

fn parse_base<R: FloatExt>(
    stream: &mut CharStream,
    context: &mut ParseContext,
) -> Result<Node<R>, ParseError> {
    log::trace!("{} at offset {}", Rule::Base, stream.offset());
    let base = parse_primary(stream, context)?;

    // The exponent is a whole factor, which makes "^" right-associative and
    // admits a negated exponent.
    let exponent = if stream.eat(Symbol::Caret) {
        context.enter(stream, Rule::Base)?;
        let exponent = parse_factor(stream, context)?;
        context.leave();
        Some(Box::new(exponent))
    } else {
        None
    };

    Ok(Node::Power {
        base: Box::new(base),
        exponent,
    })
}

fn parse_primary<R: FloatExt>(
    stream: &mut CharStream,
    context: &mut ParseContext,
) -> Result<Node<R>, ParseError> {
    log::trace!("{} at offset {}", Rule::Primary, stream.offset());
    if stream.next_is(CharClass::Letter) {
        parse_variable(stream, context)
    } else if stream.next_is(CharClass::Digit) {
        parse_number(stream)
    } else {
        stream.require(Symbol::OpenParen, Rule::Primary)?;
        context.enter(stream, Rule::Primary)?;
        let group = parse_sum(stream, context)?;
        stream.require(Symbol::CloseParen, Rule::Primary)?;
        context.leave();
        Ok(group)
    }
}

fn parse_variable<R>(
    stream: &mut CharStream,
    context: &mut ParseContext,
) -> Result<Node<R>, ParseError> {
    match context.variable {
        Some(name) => stream.require(CharClass::Exactly(name), Rule::Variable)?,
        None => {
            let name = stream.require_spit(CharClass::Letter, Rule::Variable)?;
            log::debug!("bound variable '{name}'");
            context.variable = Some(name);
        }
    }
    Ok(Node::Variable)
}

fn parse_number<R: FloatExt>(stream: &mut CharStream) -> Result<Node<R>, ParseError> {
    let start = stream.offset();

    stream.require(CharClass::Digit, Rule::Number)?;
    while stream.eat(CharClass::Digit) {}

    if stream.eat(Symbol::Dot) {
        // At least one digit must follow the decimal point.
        stream.require(CharClass::Digit, Rule::Number)?;
        while stream.eat(CharClass::Digit) {}
    }

    let literal = stream.consumed_since(start);
    literal
        .parse::<R>()
        .map(Node::Number)
        .map_err(|_| ParseError {
            expected: Expected::Number,
            found: literal.chars().next(),
            rule: Rule::Number,
            offset: start,
        })
}
