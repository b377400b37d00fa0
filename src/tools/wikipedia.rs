//! The knowledge-lookup capability, backed by the Wikipedia REST summary
//! endpoint.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::base::BaseTool;
use super::tool_traits::Tool;
use anyhow::Result;

#[derive(Deserialize, JsonSchema)]
#[schemars(title = "WikipediaToolParams")]
pub struct WikipediaToolParams {
    #[schemars(description = "The term to look up on Wikipedia")]
    query: String,
}

#[derive(Debug, Serialize, Default, Clone)]
pub struct WikipediaTool {
    pub tool: BaseTool,
}

impl WikipediaTool {
    pub fn new() -> Self {
        WikipediaTool {
            tool: BaseTool {
                name: "wikipedia",
                description: "A tool for searching Wikipedia to assist with math problems.",
            },
        }
    }

    fn forward(&self, query: &str) -> Result<String> {
        let url = format!(
            "https://en.wikipedia.org/api/rest_v1/page/summary/{}",
            query.trim().replace(' ', "%20")
        );
        let response = reqwest::blocking::get(url)?;
        if !response.status().is_success() {
            anyhow::bail!(
                "Wikipedia returned HTTP {} for \"{}\"",
                response.status(),
                query
            );
        }
        let value: serde_json::Value = response.json()?;
        if let Some(extract) = value.get("extract").and_then(|v| v.as_str()) {
            Ok(extract.to_string())
        } else if let Some(detail) = value.get("detail").and_then(|v| v.as_str()) {
            Ok(detail.to_string())
        } else {
            anyhow::bail!("No summary available for \"{}\"", query)
        }
    }
}

impl Tool for WikipediaTool {
    type Params = WikipediaToolParams;

    fn name(&self) -> &'static str {
        self.tool.name
    }

    fn description(&self) -> &'static str {
        self.tool.description
    }

    fn forward(&self, params: WikipediaToolParams) -> Result<String> {
        self.forward(&params.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore]
    fn test_wikipedia_lookup() {
        let tool = WikipediaTool::new();
        let params = WikipediaToolParams {
            query: "Pythagorean theorem".to_string(),
        };
        let out = <WikipediaTool as Tool>::forward(&tool, params).unwrap();
        assert!(out.to_lowercase().contains("triangle"));
    }
}
