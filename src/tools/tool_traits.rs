//! This module contains the traits for the capabilities an agent can call.

use anyhow::Result;
use schemars::gen::SchemaSettings;
use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Debug;

use crate::errors::SolverError;

/// A trait for parameters that can be passed to a tool.
pub trait Parameters: DeserializeOwned + JsonSchema {}

impl<P> Parameters for P where P: DeserializeOwned + JsonSchema {}

/// A callable capability with a narrow, typed input contract.
pub trait Tool: Debug {
    type Params: Parameters;
    /// The name of the tool.
    fn name(&self) -> &'static str;
    /// The description of the tool.
    fn description(&self) -> &'static str;
    /// The function to call when the tool is used.
    fn forward(&self, arguments: Self::Params) -> Result<String>;
}

/// Schema-carrying description of a tool, used to render tool listings for
/// the router prompt.
#[derive(Serialize, Debug)]
pub struct ToolInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: RootSchema,
}

impl ToolInfo {
    pub fn new<P: Parameters, T: AnyTool>(tool: &T) -> Self {
        let mut settings = SchemaSettings::draft07();
        settings.inline_subschemas = true;
        let generator = settings.into_generator();

        ToolInfo {
            name: tool.name(),
            description: tool.description(),
            parameters: generator.into_root_schema_for::<P>(),
        }
    }

    pub fn get_parameter_names(&self) -> Vec<String> {
        if let Some(schema) = &self.parameters.schema.object {
            return schema.properties.keys().cloned().collect();
        }
        Vec::new()
    }
}

/// Object-safe wrapper over [`Tool`], blanket-implemented for every tool
/// with typed parameters.
pub trait AnyTool: Debug {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn forward_json(&self, json_args: Value) -> Result<String, SolverError>;
    fn tool_info(&self) -> ToolInfo;
}

impl<T: Tool + 'static> AnyTool for T {
    fn name(&self) -> &'static str {
        Tool::name(self)
    }

    fn description(&self) -> &'static str {
        Tool::description(self)
    }

    fn forward_json(&self, json_args: Value) -> Result<String, SolverError> {
        let params = serde_json::from_value::<T::Params>(json_args.clone()).map_err(|e| {
            SolverError::Parsing(format!(
                "Error when invoking tool {} with arguments {:?}: {}",
                self.name(),
                json_args,
                e
            ))
        })?;
        Tool::forward(self, params).map_err(|e| match e.downcast::<SolverError>() {
            Ok(err) => err,
            // Failures without a typed cause come from external lookups.
            Err(e) => SolverError::Lookup(format!("{} failed: {}", Tool::name(self), e)),
        })
    }

    fn tool_info(&self) -> ToolInfo {
        ToolInfo::new::<T::Params, T>(self)
    }
}

/// Dispatch over a registered tool set.
pub trait ToolGroup: Debug {
    fn call(&self, name: &str, arguments: Value) -> Result<String, SolverError>;
    /// Maps a single free-text input onto the tool's first declared
    /// parameter, the shape a reasoning trace provides.
    fn call_with_text(&self, name: &str, input: &str) -> Result<String, SolverError>;
    fn tool_info(&self) -> Vec<ToolInfo>;
}

impl ToolGroup for Vec<Box<dyn AnyTool>> {
    fn call(&self, name: &str, arguments: Value) -> Result<String, SolverError> {
        let tool = find_tool(self, name)?;
        tool.forward_json(arguments)
    }

    fn call_with_text(&self, name: &str, input: &str) -> Result<String, SolverError> {
        let tool = find_tool(self, name)?;
        let parameter = tool
            .tool_info()
            .get_parameter_names()
            .into_iter()
            .next()
            .ok_or_else(|| {
                SolverError::Parsing(format!("Tool {} takes no inputs", tool.name()))
            })?;
        let mut arguments = serde_json::Map::new();
        arguments.insert(parameter, Value::String(input.to_string()));
        tool.forward_json(Value::Object(arguments))
    }

    fn tool_info(&self) -> Vec<ToolInfo> {
        self.iter().map(|tool| tool.tool_info()).collect()
    }
}

fn find_tool<'a>(
    tools: &'a [Box<dyn AnyTool>],
    name: &str,
) -> Result<&'a dyn AnyTool, SolverError> {
    tools
        .iter()
        .find(|tool| tool.name().eq_ignore_ascii_case(name))
        .map(|tool| tool.as_ref())
        .ok_or_else(|| {
            SolverError::Parsing(format!(
                "Unknown tool: {}. Available tools: {}",
                name,
                tools
                    .iter()
                    .map(|tool| tool.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))
        })
}
