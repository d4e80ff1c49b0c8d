use crate::expression::{AddOp, Expression, MulOp, Node};
use crate::FloatExt;

#[cfg(feature = "rayon")]
use rayon::prelude::{IntoParallelRefIterator, ParallelExtend, ParallelIterator};

impl<R: FloatExt> Expression<R> {
    /// Calculates the value of the expression with its variable set to `x`.
    ///
    /// Never fails: division by zero and fractional powers of negative numbers
    /// produce infinities and NaN as usual for floats.
    pub fn evaluate(&self, x: R) -> R {
        self.root.evaluate(x)
    }

    /// Calculates the expression at every point of `xs`, in order.
    pub fn evaluate_many(&self, xs: &[R]) -> Vec<R> {
        let mut output = Vec::with_capacity(xs.len());
        self.evaluate_into(xs, &mut output);
        output
    }

    /// Like [`Self::evaluate_many`], but writes into `output` so a caller
    /// sampling repeatedly can reuse one buffer.
    pub fn evaluate_into(&self, xs: &[R], output: &mut Vec<R>) {
        output.clear();
        output.reserve(xs.len());

        #[cfg(feature = "rayon")]
        {
            output.par_extend(xs.par_iter().map(|x| self.evaluate(*x)));
        }
        #[cfg(not(feature = "rayon"))]
        {
            output.extend(xs.iter().map(|x| self.evaluate(*x)));
        }
    }
}

impl<R: FloatExt> Node<R> {
    pub fn evaluate(&self, x: R) -> R {
        match self {
            Self::Number(value) => *value,
            Self::Variable => x,
            Self::Power { base, exponent } => match exponent {
                Some(exponent) => base.evaluate(x).powf(exponent.evaluate(x)),
                None => base.evaluate(x),
            },
            Self::UnaryChain { negate, inner } => {
                let value = inner.evaluate(x);
                if *negate {
                    -value
                } else {
                    value
                }
            }
            // Folds run strictly left to right so rounding matches the
            // written order.
            Self::Product { first, rest } => {
                rest.iter()
                    .fold(first.evaluate(x), |product, (factor, op)| match op {
                        MulOp::Multiply => product * factor.evaluate(x),
                        MulOp::Divide => product / factor.evaluate(x),
                    })
            }
            Self::Sum { first, rest } => {
                rest.iter()
                    .fold(first.evaluate(x), |sum, (term, op)| match op {
                        AddOp::Add => sum + term.evaluate(x),
                        AddOp::Subtract => sum - term.evaluate(x),
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(input: &str, x: f64) -> f64 {
        crate::parse(input).unwrap().evaluate(x)
    }

    #[test]
    fn precedence_and_associativity() {
        assert_eq!(eval("2+3*4", 0.0), 14.0);
        assert_eq!(eval("(2+3)*4", 0.0), 20.0);
        assert_eq!(eval("2^3^2", 0.0), 512.0);
        assert_eq!(eval("8/4/2", 0.0), 1.0);
        assert_eq!(eval("1-2-3", 0.0), -4.0);
        assert_eq!(eval("-2^2", 0.0), -4.0);
        assert_eq!(eval("(-2)^2", 0.0), 4.0);
        assert_eq!(eval("2^-1", 0.0), 0.5);
        assert_eq!(eval("2^-1^2", 0.0), 0.5);
    }

    #[test]
    fn implicit_multiplication() {
        assert_eq!(eval("2x", 5.0), 10.0);
        assert_eq!(eval("23", 5.0), 23.0);
        assert_eq!(eval("2(x+1)", 2.0), 6.0);
        assert_eq!(eval("x(x+1)", 2.0), 6.0);
        assert_eq!(eval("(x)(x)", 3.0), 9.0);
        assert_eq!(eval("xx", 3.0), 9.0);
        assert_eq!(eval("2x^2", 3.0), 18.0);
        assert_eq!(eval("6/2x", 3.0), 9.0);
    }

    #[test]
    fn unary_minus_chains() {
        assert_eq!(eval("-x", 7.0), -7.0);
        assert_eq!(eval("--x", 7.0), 7.0);
        assert_eq!(eval("---x", 7.0), -7.0);
        assert_eq!(eval("x--x", 7.0), 14.0);
        assert_eq!(eval("2*-x", 7.0), -14.0);
    }

    #[test]
    fn numbers() {
        assert_eq!(eval("1.5", 0.0), 1.5);
        assert_eq!(eval("007.250", 0.0), 7.25);
        assert_eq!(eval("0.1+0.2", 0.0), 0.1 + 0.2);
    }

    #[test]
    fn division_by_zero_is_not_an_error() {
        assert_eq!(eval("1/0", 0.0), f64::INFINITY);
        assert_eq!(eval("-1/0", 0.0), f64::NEG_INFINITY);
        assert!(eval("0/0", 0.0).is_nan());
        assert_eq!(eval("1/x", 0.0), f64::INFINITY);
        assert_eq!(eval("1/x", -0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn fractional_power_of_negative_base_is_nan() {
        assert!(eval("(-8)^(1/3)", 0.0).is_nan());
        assert!(eval("x^0.5", -4.0).is_nan());
        assert_eq!(eval("x^0.5", 4.0), 2.0);
    }

    #[test]
    fn evaluation_is_repeatable() {
        let parsed = crate::parse("(x^3 - 2x)/(x + 0.3)").unwrap();
        for x in [-2.5, -0.3, 0.0, 1.0 / 3.0, 17.0] {
            assert_eq!(parsed.evaluate(x).to_bits(), parsed.evaluate(x).to_bits());
        }
    }

    #[test]
    fn evaluate_many_matches_pointwise() {
        let parsed = crate::parse("x^2 - 3x + 1/x").unwrap();
        let xs: Vec<f64> = (-50..=50).map(|i| i as f64 * 0.25).collect();
        let output = parsed.evaluate_many(&xs);
        assert_eq!(output.len(), xs.len());
        for (x, y) in xs.iter().zip(&output) {
            assert_eq!(y.to_bits(), parsed.evaluate(*x).to_bits());
        }
    }

    #[test]
    fn evaluate_into_reuses_buffer() {
        let parsed = crate::parse("2x").unwrap();
        let mut output = vec![99.0; 10];
        parsed.evaluate_into(&[1.0, 2.0, 3.0], &mut output);
        assert_eq!(output, [2.0, 4.0, 6.0]);
        parsed.evaluate_into(&[], &mut output);
        assert!(output.is_empty());
    }

    #[test]
    fn single_precision() {
        let parsed = Expression::<f32>::parse("x^2 + 0.5").unwrap();
        assert_eq!(parsed.evaluate(2.0), 4.5);
    }
}
