use serde::Serialize;

/// Failure taxonomy for the solver. Every variant carries a human-readable
/// detail string; all of them degrade into report text rather than crossing
/// the caller-facing entry point.
#[derive(Debug, Clone, Serialize)]
pub enum SolverError {
    /// No expression line was found in a completion.
    Extraction(String),
    /// The numeric evaluator rejected an expression.
    Evaluation(String),
    /// The knowledge-lookup capability failed.
    Lookup(String),
    /// Network or provider error from the model capability.
    Generation(String),
    /// The agent's reasoning trace did not yield a recognizable action.
    /// Recoverable: the loop records it and retries within the step budget.
    Parsing(String),
    /// The step budget ran out before a final answer was emitted.
    MaxSteps(String),
}

impl std::error::Error for SolverError {}

impl SolverError {
    pub fn message(&self) -> &str {
        match self {
            Self::Extraction(msg) => msg,
            Self::Evaluation(msg) => msg,
            Self::Lookup(msg) => msg,
            Self::Generation(msg) => msg,
            Self::Parsing(msg) => msg,
            Self::MaxSteps(msg) => msg,
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
