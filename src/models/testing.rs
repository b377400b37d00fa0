//! Scripted model double for pipeline and agent tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::errors::SolverError;
use crate::models::model_traits::{Model, ModelResponse};
use crate::models::types::Message;

/// Replays a fixed sequence of completions. Clones share the script, so a
/// solver and the tools it hands the model to consume from one queue.
#[derive(Debug, Clone, Default)]
pub struct ScriptedModel {
    responses: Rc<RefCell<VecDeque<String>>>,
    calls: Rc<RefCell<usize>>,
}

impl ScriptedModel {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedModel {
            responses: Rc::new(RefCell::new(
                responses.into_iter().map(Into::into).collect(),
            )),
            calls: Rc::new(RefCell::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.borrow()
    }
}

struct ScriptedResponse(String);

impl ModelResponse for ScriptedResponse {
    fn get_response(&self) -> Result<String, SolverError> {
        Ok(self.0.clone())
    }
}

impl Model for ScriptedModel {
    fn run(
        &self,
        _input_messages: Vec<Message>,
        _max_tokens: Option<usize>,
        _stop_sequences: Option<Vec<String>>,
    ) -> Result<Box<dyn ModelResponse>, SolverError> {
        *self.calls.borrow_mut() += 1;
        match self.responses.borrow_mut().pop_front() {
            Some(text) => Ok(Box::new(ScriptedResponse(text))),
            None => Err(SolverError::Generation(
                "Scripted model ran out of responses".to_string(),
            )),
        }
    }
}
