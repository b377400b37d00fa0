//! The explained-calculation pipeline: prompt the model for an expression
//! plus a point-wise description, extract and de-variable the expression,
//! evaluate it, and assemble the report.

use log::info;

use crate::errors::SolverError;
use crate::evaluator::Evaluator;
use crate::models::model_traits::Model;
use crate::models::types::Message;
use crate::parsing::{extract_expression, substitute_variables};
use crate::prompts::{format_question, CALCULATION_PROMPT};
use crate::report::AnswerReport;

/// Produces a full [`AnswerReport`] for a single question using only the
/// calculator capability. No lookup, no agent routing.
#[derive(Debug, Clone)]
pub struct ExplainedCalculation<M: Model, E: Evaluator> {
    model: M,
    evaluator: E,
}

impl<M: Model, E: Evaluator> ExplainedCalculation<M, E> {
    pub fn new(model: M, evaluator: E) -> Self {
        ExplainedCalculation { model, evaluator }
    }

    /// Runs the pipeline end to end. Never fails outward: the model call,
    /// extraction, and evaluation each degrade into a well-formed report.
    pub fn run(&self, question: &str) -> AnswerReport {
        let prompt = format_question(CALCULATION_PROMPT, question);
        let completion = match self
            .model
            .run(vec![Message::user(prompt)], None, None)
            .and_then(|response| response.get_response())
        {
            Ok(completion) => completion,
            Err(e) => return AnswerReport::model_failed(question, e.message()),
        };

        let Some(expression) = extract_expression(&completion) else {
            let err = SolverError::Extraction(format!(
                "No numerical expression found in the completion for: {}",
                question
            ));
            info!("Error: {}", err);
            return AnswerReport::extraction_failed(question);
        };
        let (expression, assumption) = substitute_variables(&expression);

        match self.evaluator.evaluate(&expression) {
            Ok(value) => AnswerReport::solved(question, expression, completion, assumption, value),
            Err(e) => {
                info!("Error: {}", e);
                AnswerReport::evaluation_failed(question, &expression, &completion, e.message())
            }
        }
    }
}
