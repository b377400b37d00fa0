//! The composite answer artifact returned to the caller.

use serde::Serialize;

use crate::parsing::labeled_value;

/// Placeholder used wherever a numeric result could not be produced.
pub const NOT_AVAILABLE: &str = "N/A";

/// The final artifact of every question: the original question, the
/// (possibly substituted) expression, the step-wise description text, an
/// optional assumption note, and a final result that is either a numeric
/// value rendered as text or `N/A`.
///
/// A report is always produced; failures degrade into explicit marker text
/// instead of propagating. The rendered body is what the caller-facing
/// entry point delivers.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerReport {
    pub question: String,
    pub expression: Option<String>,
    pub description: String,
    pub assumption: Option<String>,
    pub final_result: String,
    body: String,
}

impl AnswerReport {
    /// Successful calculation: the completion text, the assumption note if
    /// variables were substituted, and a trailing result line.
    pub fn solved(
        question: &str,
        expression: String,
        completion: String,
        assumption: Option<String>,
        value: f64,
    ) -> Self {
        let final_result = value.to_string();
        let mut body = completion.clone();
        if let Some(note) = &assumption {
            body.push('\n');
            body.push_str(note);
        }
        body.push_str(&format!("\nFinal Result: {}", final_result));
        AnswerReport {
            question: question.to_string(),
            expression: Some(expression),
            description: completion,
            assumption,
            final_result,
            body,
        }
    }

    /// No expression line was found in the completion.
    pub fn extraction_failed(question: &str) -> Self {
        let description = format!(
            "Question: {}\nError: No valid numerical expression provided\nDescription:\n- Step 1: Failed to parse a numerical expression",
            question
        );
        let body = format!("{}\nFinal Result: {}", description, NOT_AVAILABLE);
        AnswerReport {
            question: question.to_string(),
            expression: None,
            description,
            assumption: None,
            final_result: NOT_AVAILABLE.to_string(),
            body,
        }
    }

    /// The evaluator rejected the extracted expression. The description is
    /// the original completion plus an error line.
    pub fn evaluation_failed(
        question: &str,
        expression: &str,
        completion: &str,
        detail: &str,
    ) -> Self {
        let description = format!("{}\nError: {}", completion, detail);
        let body = format!("{}\nFinal Result: {}", description, NOT_AVAILABLE);
        AnswerReport {
            question: question.to_string(),
            expression: Some(expression.to_string()),
            description,
            assumption: None,
            final_result: NOT_AVAILABLE.to_string(),
            body,
        }
    }

    /// The model call itself failed before any expression was seen.
    pub fn model_failed(question: &str, detail: &str) -> Self {
        let description = format!(
            "Question: {}\nNumerical Expression: {}\nDescription:\n- Error: {}",
            question, NOT_AVAILABLE, detail
        );
        let body = format!("{}\nFinal Result: {}", description, NOT_AVAILABLE);
        AnswerReport {
            question: question.to_string(),
            expression: None,
            description,
            assumption: None,
            final_result: NOT_AVAILABLE.to_string(),
            body,
        }
    }

    /// Unrecoverable agent failure: error text in place of the body.
    pub fn error(question: &str, detail: &str) -> Self {
        let body = format!("Error: {}", detail);
        AnswerReport {
            question: question.to_string(),
            expression: None,
            description: body.clone(),
            assumption: None,
            final_result: NOT_AVAILABLE.to_string(),
            body,
        }
    }

    /// Router output delivered verbatim. The result field is recovered from
    /// the text when a `Final Result:` line is present.
    pub fn delivered(question: &str, text: String) -> Self {
        let final_result =
            labeled_value(&text, "Final Result").unwrap_or_else(|| NOT_AVAILABLE.to_string());
        AnswerReport {
            question: question.to_string(),
            expression: labeled_value(&text, "Numerical Expression"),
            description: text.clone(),
            assumption: None,
            final_result,
            body: text,
        }
    }

    /// Fixed prompt-for-input message; no capability was invoked.
    pub fn notice(question: &str, message: &str) -> Self {
        AnswerReport {
            question: question.to_string(),
            expression: None,
            description: message.to_string(),
            assumption: None,
            final_result: NOT_AVAILABLE.to_string(),
            body: message.to_string(),
        }
    }

    /// The rendered text delivered to the caller.
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl std::fmt::Display for AnswerReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::ASSUMPTION_NOTE;

    #[test]
    fn test_solved_report_body() {
        let completion = "Numerical Expression: 5 + 3 * 2\nDescription:\n- Step 1: Multiply 3 by 2.\n- Step 2: Add 5.".to_string();
        let report = AnswerReport::solved("What is 5 + 3 * 2?", "5 + 3 * 2".to_string(), completion, None, 11.0);
        assert_eq!(report.final_result, "11");
        assert_eq!(report.body().lines().last().unwrap(), "Final Result: 11");
    }

    #[test]
    fn test_solved_report_includes_assumption() {
        let completion = "Numerical Expression: k + 5\nDescription:\n- Step 1: Add.".to_string();
        let report = AnswerReport::solved(
            "What is k + 5?",
            "1 + 5".to_string(),
            completion,
            Some(ASSUMPTION_NOTE.to_string()),
            6.0,
        );
        assert!(report.body().contains(ASSUMPTION_NOTE));
        assert_eq!(report.body().lines().last().unwrap(), "Final Result: 6");
    }

    #[test]
    fn test_extraction_failed_report() {
        let report = AnswerReport::extraction_failed("What is love?");
        assert!(report.body().contains("Failed to parse a numerical expression"));
        assert!(report.body().ends_with("Final Result: N/A"));
        assert_eq!(report.final_result, NOT_AVAILABLE);
    }

    #[test]
    fn test_evaluation_failed_report() {
        let report = AnswerReport::evaluation_failed(
            "What is 1 / siesta?",
            "1 / 11111",
            "Numerical Expression: 1 / siesta\nDescription:\n- Step 1: Divide.",
            "unknown function",
        );
        assert!(report.body().contains("Error: unknown function"));
        assert!(report.body().ends_with("Final Result: N/A"));
    }

    #[test]
    fn test_delivered_report_recovers_result() {
        let text = "Numerical Expression: 2 + 2\nDescription:\n- Step 1: Add.\nFinal Result: 4".to_string();
        let report = AnswerReport::delivered("What is 2 + 2?", text.clone());
        assert_eq!(report.body(), text);
        assert_eq!(report.final_result, "4");
        assert_eq!(report.expression.as_deref(), Some("2 + 2"));
    }
}
