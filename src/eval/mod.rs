//! Expression evaluation and result formatting.
//!
//! The calculator core never talks to an evaluation library directly; it
//! hands a sanitized ASCII expression to the [`Evaluator`] trait. The
//! default implementation wraps fasteval.

use std::collections::BTreeMap;

use thiserror::Error;

/// Why an expression could not be turned into a result.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum EvalError {
    /// The expression does not parse.
    #[error("malformed expression")]
    Malformed,
    /// The expression parsed but did not produce a finite number,
    /// division by zero included.
    #[error("result is not a finite number")]
    NotFinite,
}

/// Anything that can resolve a sanitized arithmetic expression.
pub trait Evaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError>;
}

/// Map the display glyphs to the operator syntax evaluators understand.
pub fn sanitize(expression: &str) -> String {
    expression
        .replace('×', "*")
        .replace('÷', "/")
        .replace('−', "-")
}

/// The fasteval-backed evaluator used by the application.
#[derive(Clone, Copy, Debug, Default)]
pub struct FastevalEvaluator;

impl Evaluator for FastevalEvaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        // No variables or custom functions, plain arithmetic only.
        let mut namespace = BTreeMap::<String, f64>::new();
        let value =
            fasteval::ez_eval(expression, &mut namespace).map_err(|_| EvalError::Malformed)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NotFinite)
        }
    }
}

/// Format a computed value for the result line and the history.
///
/// Integral values print without a decimal part; everything else is
/// rounded to ten fractional digits with trailing zeros stripped.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let rounded = format!("{value:.10}");
        let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
        // Values rounding to zero from below would otherwise print "-0".
        if trimmed == "-0" {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        let eval = FastevalEvaluator;
        assert_eq!(eval.evaluate("2+2"), Ok(4.0));
        assert_eq!(eval.evaluate("10-4"), Ok(6.0));
        assert_eq!(eval.evaluate("6*7"), Ok(42.0));
        assert_eq!(eval.evaluate("9/2"), Ok(4.5));
    }

    #[test]
    fn test_modulo() {
        let eval = FastevalEvaluator;
        assert_eq!(eval.evaluate("10%3"), Ok(1.0));
    }

    #[test]
    fn test_division_by_zero_is_not_finite() {
        let eval = FastevalEvaluator;
        assert_eq!(eval.evaluate("5/0"), Err(EvalError::NotFinite));
    }

    #[test]
    fn test_malformed_expression() {
        let eval = FastevalEvaluator;
        assert_eq!(eval.evaluate("5+"), Err(EvalError::Malformed));
        assert_eq!(eval.evaluate("2+*2"), Err(EvalError::Malformed));
    }

    #[test]
    fn test_parentheses_accepted() {
        // The assembler never produces them, but the evaluator does not
        // need to reject them either.
        let eval = FastevalEvaluator;
        assert_eq!(eval.evaluate("(2+3)*4"), Ok(20.0));
    }

    #[test]
    fn test_sanitize_maps_display_glyphs() {
        assert_eq!(sanitize("5×3"), "5*3");
        assert_eq!(sanitize("8÷2"), "8/2");
        assert_eq!(sanitize("9−1"), "9-1");
        assert_eq!(sanitize("1+2%3.5"), "1+2%3.5");
    }

    #[test]
    fn test_format_integral_values() {
        assert_eq!(format_value(8.0), "8");
        assert_eq!(format_value(-3.0), "-3");
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(-0.0), "0");
    }

    #[test]
    fn test_format_fractional_values() {
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_value(-0.125), "-0.125");
    }

    #[test]
    fn test_format_strips_float_noise() {
        // 0.1 + 0.2 famously lands a hair above 0.3.
        assert_eq!(format_value(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_format_tiny_negative_rounds_to_plain_zero() {
        assert_eq!(format_value(-1e-12), "0");
    }
}
