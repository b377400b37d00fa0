//! Session context, response normalization, and the caller-facing entry
//! point.

use std::fmt::Debug;

use crate::agents::{Agent, Step, ToolCallingAgent};
use crate::chain::ExplainedCalculation;
use crate::errors::SolverError;
use crate::evaluator::{Evaluator, MevalEvaluator};
use crate::models::groq::GroqServerModel;
use crate::models::model_traits::Model;
use crate::report::AnswerReport;
use crate::tools::{AnyTool, CalculatorTool, ReasoningTool, WikipediaTool};

pub const PROMPT_FOR_QUESTION: &str = "Please enter a question.";
pub const PROMPT_FOR_API_KEY: &str = "Please provide a GROQ API key.";

/// Construction-time knobs for a Groq-backed solver session.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    pub api_key: Option<String>,
    pub model_id: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub max_steps: Option<usize>,
}

/// A solver session: the long-lived model handle, the registered tools, and
/// the direct calculation pipeline the normalizer falls back to. Owns no
/// shared mutable state across questions beyond its own step logs.
pub struct Solver<M, E>
where
    M: Model + Clone + Debug + 'static,
    E: Evaluator + Clone + Debug + 'static,
{
    agent: ToolCallingAgent<M>,
    chain: ExplainedCalculation<M, E>,
}

impl Solver<GroqServerModel, MevalEvaluator> {
    /// Builds a Groq-backed session. Fails fast when no API key is
    /// available.
    pub fn from_config(config: SolverConfig) -> Result<Self, SolverError> {
        let model = GroqServerModel::new(
            config.base_url.as_deref(),
            config.model_id.as_deref(),
            config.temperature,
            config.api_key,
        )?;
        Ok(Solver::new(model, MevalEvaluator, config.max_steps))
    }
}

impl<M, E> Solver<M, E>
where
    M: Model + Clone + Debug + 'static,
    E: Evaluator + Clone + Debug + 'static,
{
    pub fn new(model: M, evaluator: E, max_steps: Option<usize>) -> Self {
        let chain = ExplainedCalculation::new(model.clone(), evaluator);
        let tools: Vec<Box<dyn AnyTool>> = vec![
            Box::new(WikipediaTool::new()),
            Box::new(CalculatorTool::new(chain.clone())),
            Box::new(ReasoningTool::new(model.clone())),
        ];
        let agent = ToolCallingAgent::new(model, tools, None, max_steps);
        Solver { agent, chain }
    }

    /// Answers one question start to finish. Always produces a report;
    /// failures degrade into explicit marker text.
    pub fn answer(&mut self, question: &str) -> AnswerReport {
        if question.trim().is_empty() {
            return AnswerReport::notice(question, PROMPT_FOR_QUESTION);
        }
        match self.agent.run(question, true) {
            Ok(text) => self.normalize(question, text),
            Err(e) => AnswerReport::error(question, e.message()),
        }
    }

    /// Last-chance quality gate: router output without the structured
    /// description marker is discarded in favor of a direct calculation.
    fn normalize(&self, question: &str, text: String) -> AnswerReport {
        if text.contains("Description:") {
            AnswerReport::delivered(question, text)
        } else {
            self.chain.run(question)
        }
    }

    /// Step logs of the most recent questions, for diagnostics dumping.
    pub fn logs_mut(&mut self) -> &mut Vec<Step> {
        self.agent.get_logs_mut()
    }
}

/// Caller-facing convenience entry: builds a Groq-backed session for one
/// question and returns the rendered report body. Blank inputs short-circuit
/// to fixed prompts without invoking any capability.
pub fn respond(question: &str, api_key: &str) -> String {
    if api_key.trim().is_empty() {
        return PROMPT_FOR_API_KEY.to_string();
    }
    if question.trim().is_empty() {
        return PROMPT_FOR_QUESTION.to_string();
    }
    let config = SolverConfig {
        api_key: Some(api_key.to_string()),
        ..SolverConfig::default()
    };
    match Solver::from_config(config) {
        Ok(mut solver) => solver.answer(question).body().to_string(),
        Err(e) => format!("Error: {}", e.message()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::testing::ScriptedModel;
    use crate::parsing::ASSUMPTION_NOTE;

    fn solver_with(model: &ScriptedModel) -> Solver<ScriptedModel, MevalEvaluator> {
        Solver::new(model.clone(), MevalEvaluator, None)
    }

    #[test]
    fn test_blank_question_invokes_nothing() {
        let model = ScriptedModel::default();
        let mut solver = solver_with(&model);
        let report = solver.answer("   ");
        assert_eq!(report.body(), PROMPT_FOR_QUESTION);
        assert_eq!(model.call_count(), 0);
    }

    #[test]
    fn test_structured_router_output_is_delivered_unchanged() {
        let routed = "Thought: done.\nFinal Answer: Numerical Expression: 2 + 2\nDescription:\n- Step 1: Add.\nFinal Result: 4";
        let model = ScriptedModel::new([routed]);
        let mut solver = solver_with(&model);
        let report = solver.answer("What is 2 + 2?");
        assert!(report.body().contains("Description:"));
        assert_eq!(report.final_result, "4");
        assert_eq!(model.call_count(), 1);
    }

    #[test]
    fn test_unstructured_router_output_falls_back_to_calculation() {
        let model = ScriptedModel::new([
            // Router short-circuits with bare prose.
            "Final Answer: 4",
            // Consumed by the fallback calculation pipeline.
            "Numerical Expression: 2 + 2\nDescription:\n- Step 1: Add the numbers.\nFinal Result: <result>",
        ]);
        let mut solver = solver_with(&model);
        let report = solver.answer("What is 2 + 2?");
        assert!(report.body().contains("Description:"));
        assert_eq!(report.body().lines().last().unwrap(), "Final Result: 4");
        assert_eq!(model.call_count(), 2);
    }

    #[test]
    fn test_variable_question_fallback_adds_assumption() {
        let model = ScriptedModel::new([
            "Final Answer: about six",
            "Numerical Expression: k + 5\nDescription:\n- Step 1: Assume k.\n- Step 2: Add 5.\nFinal Result: <result>",
        ]);
        let mut solver = solver_with(&model);
        let report = solver.answer("What is k + 5 if k=2?");
        assert!(report.body().contains(ASSUMPTION_NOTE));
        assert_eq!(report.body().lines().last().unwrap(), "Final Result: 6");
    }

    #[test]
    fn test_router_failure_degrades_to_error_report() {
        let model = ScriptedModel::new(Vec::<String>::new());
        let mut solver = solver_with(&model);
        let report = solver.answer("What is 2 + 2?");
        assert!(report.body().starts_with("Error: "));
        assert_eq!(report.final_result, "N/A");
    }

    #[test]
    fn test_respond_guards_blank_inputs() {
        assert_eq!(respond("What is 2 + 2?", ""), PROMPT_FOR_API_KEY);
        assert_eq!(respond("", "gsk-test"), PROMPT_FOR_QUESTION);
        assert_eq!(respond("   ", "gsk-test"), PROMPT_FOR_QUESTION);
    }
}
