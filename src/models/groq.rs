//! Blocking client for the Groq OpenAI-compatible chat-completions API.

use crate::errors::SolverError;
use crate::models::model_traits::{Model, ModelResponse};
use crate::models::types::Message;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL_ID: &str = "gemma2-9b-it";

#[derive(Debug, Deserialize)]
pub struct GroqResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

impl ModelResponse for GroqResponse {
    fn get_response(&self) -> Result<String, SolverError> {
        Ok(self
            .choices
            .first()
            .ok_or_else(|| {
                SolverError::Generation("No message returned from Groq".to_string())
            })?
            .message
            .content
            .clone()
            .unwrap_or_default())
    }
}

/// Long-lived handle to the Groq completion capability. Constructed once per
/// session and treated as read-only afterwards.
#[derive(Debug, Clone)]
pub struct GroqServerModel {
    pub base_url: String,
    pub model_id: String,
    pub client: Client,
    pub temperature: f32,
    api_key: String,
}

impl GroqServerModel {
    /// Fails fast when no API key is supplied and `GROQ_API_KEY` is unset,
    /// rather than surfacing the problem on the first request.
    pub fn new(
        base_url: Option<&str>,
        model_id: Option<&str>,
        temperature: Option<f32>,
        api_key: Option<String>,
    ) -> Result<Self, SolverError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("GROQ_API_KEY").ok())
            .ok_or_else(|| {
                SolverError::Generation(
                    "No API key provided and GROQ_API_KEY is not set".to_string(),
                )
            })?;
        Ok(GroqServerModel {
            base_url: base_url.unwrap_or(DEFAULT_BASE_URL).to_string(),
            model_id: model_id.unwrap_or(DEFAULT_MODEL_ID).to_string(),
            client: Client::new(),
            temperature: temperature.unwrap_or(0.5),
            api_key,
        })
    }
}

impl Model for GroqServerModel {
    fn run(
        &self,
        input_messages: Vec<Message>,
        max_tokens: Option<usize>,
        stop_sequences: Option<Vec<String>>,
    ) -> Result<Box<dyn ModelResponse>, SolverError> {
        let mut body = json!({
            "model": self.model_id,
            "messages": input_messages,
            "temperature": self.temperature,
            "max_tokens": max_tokens.unwrap_or(1500),
        });
        if let Some(stop) = stop_sequences {
            body["stop"] = json!(stop);
        }

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .map_err(|e| {
                SolverError::Generation(format!("Failed to get response from Groq: {}", e))
            })?;

        if response.status().is_success() {
            let parsed = response.json::<GroqResponse>().map_err(|e| {
                SolverError::Generation(format!("Failed to decode Groq response: {}", e))
            })?;
            Ok(Box::new(parsed))
        } else {
            Err(SolverError::Generation(format!(
                "Failed to get response from Groq: {}",
                response.text().unwrap_or_default()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_requires_api_key() {
        std::env::remove_var("GROQ_API_KEY");
        let err = GroqServerModel::new(None, None, None, None).unwrap_err();
        assert!(matches!(err, SolverError::Generation(_)));
        let err = GroqServerModel::new(None, None, None, Some("   ".to_string())).unwrap_err();
        assert!(matches!(err, SolverError::Generation(_)));
    }

    #[test]
    fn test_construction_defaults() {
        let model =
            GroqServerModel::new(None, None, None, Some("gsk-test".to_string())).unwrap();
        assert_eq!(model.base_url, DEFAULT_BASE_URL);
        assert_eq!(model.model_id, DEFAULT_MODEL_ID);
        assert_eq!(model.temperature, 0.5);
    }
}
