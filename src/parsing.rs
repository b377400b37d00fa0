//! Parsers for the semi-structured text the model emits.
//!
//! Completions are expected to follow a labelled-line template but never
//! guaranteed to. Every parser here returns a typed optional result or a
//! recoverable [`SolverError`]; absence of a label is a first-class outcome,
//! not an empty string.

use regex::Regex;
use serde::Serialize;

use crate::errors::SolverError;

/// Note attached to a report whenever symbolic variables were replaced.
pub const ASSUMPTION_NOTE: &str =
    "Assumption: Any variables (e.g., k) set to 1 unless specified.";

/// Captures the rest of the line following `label:`, trimmed.
///
/// Grammar: label, colon, rest-of-line. A missing label or an empty value
/// both parse to `None`.
pub fn labeled_value(text: &str, label: &str) -> Option<String> {
    let pattern = format!(r"{}:[ \t]*(.*)", regex::escape(label));
    let re = Regex::new(&pattern).ok()?;
    let value = re.captures(text)?.get(1)?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Extracts the expression from a completion that follows the
/// `Numerical Expression: <expr>` template line.
pub fn extract_expression(completion: &str) -> Option<String> {
    labeled_value(completion, "Numerical Expression")
}

/// Replaces every letter in `expression` with the digit `1` and attaches the
/// assumption note. Letter-free expressions pass through unchanged with no
/// note.
///
/// Each letter is replaced on its own, so a two-letter name like `ab`
/// becomes `11`. That is compatibility behavior; tests pin it.
pub fn substitute_variables(expression: &str) -> (String, Option<String>) {
    if !expression.chars().any(|c| c.is_ascii_alphabetic()) {
        return (expression.to_string(), None);
    }
    let substituted = expression
        .chars()
        .map(|c| if c.is_ascii_alphabetic() { '1' } else { c })
        .collect();
    (substituted, Some(ASSUMPTION_NOTE.to_string()))
}

/// A capability invocation recovered from a reasoning trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentAction {
    pub tool: String,
    pub input: String,
}

/// Returns the text after a `Final Answer:` marker, spanning to the end of
/// the trace, if the marker is present.
pub fn parse_final_answer(trace: &str) -> Option<String> {
    let re = Regex::new(r"(?s)Final Answer:\s*(.*)").ok()?;
    let answer = re.captures(trace)?.get(1)?.as_str().trim();
    if answer.is_empty() {
        None
    } else {
        Some(answer.to_string())
    }
}

/// Parses `Action:` / `Action Input:` lines out of a reasoning trace.
///
/// Failure is recoverable: the agent records it and the model retries within
/// its step budget.
pub fn parse_action(trace: &str) -> Result<AgentAction, SolverError> {
    let tool = labeled_value(trace, "Action").ok_or_else(|| {
        SolverError::Parsing(format!(
            "Could not find an `Action:` line in the reasoning trace:\n{}",
            trace
        ))
    })?;
    let input = labeled_value(trace, "Action Input").ok_or_else(|| {
        SolverError::Parsing(format!(
            "Found `Action: {}` but no `Action Input:` line in the reasoning trace",
            tool
        ))
    })?;
    Ok(AgentAction { tool, input })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_expression() {
        let completion =
            "Question: What is 5 + 3 * 2?\nNumerical Expression:  5 + 3 * 2 \nDescription:\n- Step 1: Multiply.\nFinal Result: <result>";
        assert_eq!(extract_expression(completion).unwrap(), "5 + 3 * 2");
    }

    #[test]
    fn test_extract_expression_missing_label() {
        assert_eq!(extract_expression("The answer is 11."), None);
    }

    #[test]
    fn test_extract_expression_empty_value() {
        assert_eq!(extract_expression("Numerical Expression:\nDescription:"), None);
    }

    #[test]
    fn test_substitute_variables() {
        let (expr, note) = substitute_variables("k + 5");
        assert_eq!(expr, "1 + 5");
        assert_eq!(note.unwrap(), ASSUMPTION_NOTE);
        assert!(!expr.chars().any(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn test_substitute_variables_noop_without_letters() {
        let (expr, note) = substitute_variables("5 + 3 * 2");
        assert_eq!(expr, "5 + 3 * 2");
        assert!(note.is_none());
    }

    #[test]
    fn test_substitute_variables_idempotent() {
        let (once, _) = substitute_variables("k + 5");
        let (twice, note) = substitute_variables(&once);
        assert_eq!(once, twice);
        assert!(note.is_none());
    }

    #[test]
    fn test_substitute_variables_per_character() {
        // Multi-letter names collapse letter by letter.
        let (expr, note) = substitute_variables("ab + 2");
        assert_eq!(expr, "11 + 2");
        assert!(note.is_some());
    }

    #[test]
    fn test_parse_action() {
        let trace = "Thought: I should calculate this.\nAction: calculator\nAction Input: What is 2 + 2?";
        let action = parse_action(trace).unwrap();
        assert_eq!(action.tool, "calculator");
        assert_eq!(action.input, "What is 2 + 2?");
    }

    #[test]
    fn test_parse_action_unparseable_trace() {
        let err = parse_action("I have no idea what to do next.").unwrap_err();
        assert!(matches!(err, SolverError::Parsing(_)));
    }

    #[test]
    fn test_parse_final_answer() {
        let trace = "Thought: I now know the final answer.\nFinal Answer: The result is 11.";
        assert_eq!(parse_final_answer(trace).unwrap(), "The result is 11.");
        assert_eq!(parse_final_answer("Action: calculator\nAction Input: 2 + 2"), None);
    }
}
