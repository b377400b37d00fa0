//! The calculator capability: wraps the explained-calculation pipeline so
//! the router can invoke it by name.

use schemars::JsonSchema;
use serde::Deserialize;

use super::base::BaseTool;
use super::tool_traits::Tool;
use crate::chain::ExplainedCalculation;
use crate::evaluator::Evaluator;
use crate::models::model_traits::Model;
use anyhow::Result;

#[derive(Deserialize, JsonSchema)]
#[schemars(title = "CalculatorToolParams")]
pub struct CalculatorToolParams {
    #[schemars(description = "The math question to solve")]
    question: String,
}

#[derive(Debug, Clone)]
pub struct CalculatorTool<M: Model, E: Evaluator> {
    pub tool: BaseTool,
    chain: ExplainedCalculation<M, E>,
}

impl<M: Model, E: Evaluator> CalculatorTool<M, E> {
    pub fn new(chain: ExplainedCalculation<M, E>) -> Self {
        CalculatorTool {
            tool: BaseTool {
                name: "calculator",
                description: "Solves math questions with step-by-step explanations.",
            },
            chain,
        }
    }
}

impl<M, E> Tool for CalculatorTool<M, E>
where
    M: Model + std::fmt::Debug,
    E: Evaluator + std::fmt::Debug,
{
    type Params = CalculatorToolParams;

    fn name(&self) -> &'static str {
        self.tool.name
    }

    fn description(&self) -> &'static str {
        self.tool.description
    }

    // The pipeline degrades failures into report text, so this always
    // observes successfully.
    fn forward(&self, params: CalculatorToolParams) -> Result<String> {
        Ok(self.chain.run(&params.question).body().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::MevalEvaluator;
    use crate::models::testing::ScriptedModel;
    use crate::tools::tool_traits::AnyTool;
    use serde_json::json;

    #[test]
    fn test_calculator_tool_forwards_report_body() {
        let model = ScriptedModel::new([
            "Numerical Expression: 2 + 2\nDescription:\n- Step 1: Add the numbers.\nFinal Result: <result>",
        ]);
        let tool = CalculatorTool::new(ExplainedCalculation::new(model, MevalEvaluator));
        let out = tool
            .forward_json(json!({ "question": "What is 2 + 2?" }))
            .unwrap();
        assert!(out.contains("Description:"));
        assert!(out.ends_with("Final Result: 4"));
    }

    #[test]
    fn test_calculator_tool_rejects_malformed_arguments() {
        let model = ScriptedModel::new(Vec::<String>::new());
        let tool = CalculatorTool::new(ExplainedCalculation::new(model, MevalEvaluator));
        let err = tool.forward_json(json!({ "q": "2 + 2" })).unwrap_err();
        assert!(matches!(err, crate::errors::SolverError::Parsing(_)));
    }
}
