use std::fmt;

/// A parsed single-variable expression, ready to be sampled.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression<R = f64> {
    pub(crate) root: Node<R>,
    pub(crate) variable: Option<char>,
    pub(crate) source: String,
}

impl<R> Expression<R> {
    pub fn root(&self) -> &Node<R> {
        &self.root
    }

    /// The variable name bound while parsing, if the expression mentions one.
    pub fn variable(&self) -> Option<char> {
        self.variable
    }

    /// The parsed text with whitespace removed.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Syntax tree node. Each variant corresponds to one grammar rule; a
/// parenthesized group is just a nested [`Node::Sum`].
#[derive(Clone, Debug, PartialEq)]
pub enum Node<R> {
    // Leaves.
    Number(R),
    /// The input variable. Its name lives on the [`Expression`], not here.
    Variable,

    Power {
        base: Box<Node<R>>,
        exponent: Option<Box<Node<R>>>,
    },
    UnaryChain {
        negate: bool,
        inner: Box<Node<R>>,
    },
    Product {
        first: Box<Node<R>>,
        rest: Vec<(Node<R>, MulOp)>,
    },
    Sum {
        first: Box<Node<R>>,
        rest: Vec<(Node<R>, AddOp)>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOp {
    Add,
    Subtract,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MulOp {
    Multiply,
    Divide,
}

impl AddOp {
    fn as_char(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
        }
    }
}

impl MulOp {
    fn as_char(self) -> char {
        match self {
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }
}

impl<R: fmt::Display> Node<R> {
    /// Writes the tree with every operator explicit: implicit products gain a
    /// `*`, exponents and groups are parenthesized.
    fn write(&self, f: &mut fmt::Formatter<'_>, name: char, top: bool) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Variable => write!(f, "{name}"),
            Self::Power { base, exponent } => {
                base.write(f, name, false)?;
                if let Some(exponent) = exponent {
                    f.write_str("^(")?;
                    exponent.write(f, name, false)?;
                    f.write_str(")")?;
                }
                Ok(())
            }
            Self::UnaryChain { negate, inner } => {
                if *negate {
                    f.write_str("-")?;
                }
                inner.write(f, name, false)
            }
            Self::Product { first, rest } => {
                first.write(f, name, false)?;
                for (factor, op) in rest {
                    write!(f, "{}", op.as_char())?;
                    factor.write(f, name, false)?;
                }
                Ok(())
            }
            Self::Sum { first, rest } => {
                if !top {
                    f.write_str("(")?;
                }
                first.write(f, name, false)?;
                for (term, op) in rest {
                    write!(f, "{}", op.as_char())?;
                    term.write(f, name, false)?;
                }
                if !top {
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}

impl<R: fmt::Display> fmt::Display for Node<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, 'x', true)
    }
}

impl<R: fmt::Display> fmt::Display for Expression<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write(f, self.variable.unwrap_or('x'), true)
    }
}
