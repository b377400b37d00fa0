//! The numeric-evaluation capability.

use crate::errors::SolverError;

/// External capability that computes an arithmetic expression containing no
/// variables. Kept behind a trait so pipelines can be exercised with a
/// scripted evaluator.
pub trait Evaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, SolverError>;
}

/// Default evaluator backed by `meval`.
#[derive(Debug, Default, Clone)]
pub struct MevalEvaluator;

impl Evaluator for MevalEvaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, SolverError> {
        meval::eval_str(expression).map_err(|e| SolverError::Evaluation(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluates_expression() {
        let evaluator = MevalEvaluator;
        assert_eq!(evaluator.evaluate("5 + 3 * 2").unwrap(), 11.0);
        assert_eq!(evaluator.evaluate("1 + 5").unwrap(), 6.0);
    }

    #[test]
    fn test_rejects_invalid_expression() {
        let evaluator = MevalEvaluator;
        let err = evaluator.evaluate("5 +").unwrap_err();
        assert!(matches!(err, SolverError::Evaluation(_)));
    }

    #[test]
    fn test_result_renders_without_trailing_zero() {
        let evaluator = MevalEvaluator;
        assert_eq!(evaluator.evaluate("5 + 3 * 2").unwrap().to_string(), "11");
    }
}
