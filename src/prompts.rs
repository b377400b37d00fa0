//! Fixed prompt templates for the solver's capabilities.

/// Prompt used by the explained-calculation pipeline. The model fills the
/// expression, the point-wise description, and the result placeholder.
pub const CALCULATION_PROMPT: &str = r#"You are a mathematical assistant. For the given question, provide a numerical expression (no variables) and a detailed, point-wise explanation of how to solve it. If the question contains variables, assume reasonable numerical values (e.g., k=1) and state your assumption:
Question: {question}
Numerical Expression: <expression>
Description:
- Step 1: [First step]
- Step 2: [Second step]
- ... [Continue as needed]
Final Result: <result>"#;

/// Prompt used by the bare reasoning capability. Textually the same shape
/// as the calculation prompt; no tool invocation happens downstream.
pub const REASONING_PROMPT: &str = r#"You are an agent tasked with solving the user's mathematical question. Provide a numerical expression (no variables) and a detailed, point-wise explanation. If variables are present, assume reasonable values (e.g., k=1) and note the assumption:
Question: {question}
Numerical Expression: <expression>
Description:
- Step 1: [First step]
- Step 2: [Second step]
- ... [Continue as needed]
Final Result: <result>"#;

/// System prompt for the agent router. `{{tool_descriptions}}` and
/// `{{tool_names}}` are filled from the registered tool set.
pub const REACT_SYSTEM_PROMPT: &str = r#"Answer the user's math question as best you can. You have access to the following tools:

{{tool_descriptions}}

Use the following format:

Question: the input question you must answer
Thought: you should always think about what to do
Action: the action to take, must be one of [{{tool_names}}]
Action Input: the input to the action
Observation: the result of the action
... (this Thought/Action/Action Input/Observation can repeat N times)
Thought: I now know the final answer
Final Answer: the final answer to the original input question

Begin!"#;

/// Fills the `{question}` placeholder of a template.
pub fn format_question(template: &str, question: &str) -> String {
    template.replace("{question}", question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_question() {
        let prompt = format_question(CALCULATION_PROMPT, "What is 2 + 2?");
        assert!(prompt.contains("Question: What is 2 + 2?"));
        assert!(!prompt.contains("{question}"));
    }
}
