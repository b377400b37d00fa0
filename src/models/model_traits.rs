use crate::errors::SolverError;
use crate::models::types::Message;

/// A parsed provider response.
pub trait ModelResponse {
    fn get_response(&self) -> Result<String, SolverError>;
}

/// The text-completion capability. The solver treats it as an opaque
/// network-reached collaborator; implementations block for the full
/// round trip.
pub trait Model {
    fn run(
        &self,
        input_messages: Vec<Message>,
        max_tokens: Option<usize>,
        stop_sequences: Option<Vec<String>>,
    ) -> Result<Box<dyn ModelResponse>, SolverError>;
}
