//! The bare reasoning capability: a plain completion with the reasoning
//! template, no tool invocation downstream.

use schemars::JsonSchema;
use serde::Deserialize;

use super::base::BaseTool;
use super::tool_traits::Tool;
use crate::models::model_traits::Model;
use crate::models::types::Message;
use crate::prompts::{format_question, REASONING_PROMPT};
use anyhow::Result;

#[derive(Deserialize, JsonSchema)]
#[schemars(title = "ReasoningToolParams")]
pub struct ReasoningToolParams {
    #[schemars(description = "The math question to reason through")]
    question: String,
}

#[derive(Debug, Clone)]
pub struct ReasoningTool<M: Model> {
    pub tool: BaseTool,
    model: M,
}

impl<M: Model> ReasoningTool<M> {
    pub fn new(model: M) -> Self {
        ReasoningTool {
            tool: BaseTool {
                name: "reasoning",
                description: "Answers math questions with step-by-step explanations.",
            },
            model,
        }
    }
}

impl<M: Model + std::fmt::Debug> Tool for ReasoningTool<M> {
    type Params = ReasoningToolParams;

    fn name(&self) -> &'static str {
        self.tool.name
    }

    fn description(&self) -> &'static str {
        self.tool.description
    }

    fn forward(&self, params: ReasoningToolParams) -> Result<String> {
        let prompt = format_question(REASONING_PROMPT, &params.question);
        let completion = self
            .model
            .run(vec![Message::user(prompt)], None, None)
            .and_then(|response| response.get_response())
            .map_err(anyhow::Error::new)?;
        Ok(completion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::testing::ScriptedModel;
    use crate::tools::tool_traits::AnyTool;
    use serde_json::json;

    #[test]
    fn test_reasoning_tool_returns_completion() {
        let model = ScriptedModel::new(["Numerical Expression: 1 + 1\nDescription:\n- Step 1: Add.\nFinal Result: 2"]);
        let tool = ReasoningTool::new(model);
        let out = tool
            .forward_json(json!({ "question": "What is 1 + 1?" }))
            .unwrap();
        assert!(out.contains("Description:"));
    }

    #[test]
    fn test_reasoning_tool_surfaces_model_failure() {
        let model = ScriptedModel::new(Vec::<String>::new());
        let tool = ReasoningTool::new(model);
        let err = tool
            .forward_json(json!({ "question": "What is 1 + 1?" }))
            .unwrap_err();
        assert!(matches!(err, crate::errors::SolverError::Generation(_)));
    }
}
