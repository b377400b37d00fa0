//! The agent router: a bounded reason-then-act loop that lets the model
//! choose among the registered capabilities to answer a question.

use crate::errors::SolverError;
use crate::models::model_traits::Model;
use crate::models::types::Message;
use crate::parsing::{parse_action, parse_final_answer, AgentAction};
use crate::prompts::REACT_SYSTEM_PROMPT;
use crate::tools::{AnyTool, ToolGroup, ToolInfo};

use log::info;
use serde::Serialize;
use serde_json::json;

const DEFAULT_TOOL_DESCRIPTION_TEMPLATE: &str = r#"
{{ tool.name }}: {{ tool.description }}
    Takes inputs: {{tool.inputs}}
"#;

const DEFAULT_MAX_STEPS: usize = 10;

/// Observations longer than this are truncated before they re-enter the
/// model's context.
const MAX_OBSERVATION_CHARS: usize = 3000;

pub fn get_tool_description_with_args(tool: &ToolInfo) -> String {
    let mut description = DEFAULT_TOOL_DESCRIPTION_TEMPLATE.to_string();
    description = description.replace("{{ tool.name }}", tool.name);
    description = description.replace("{{ tool.description }}", tool.description);
    description = description.replace(
        "{{tool.inputs}}",
        json!(&tool.parameters.schema)["properties"].to_string().as_str(),
    );
    description
}

pub fn get_tool_descriptions(tools: &[ToolInfo]) -> Vec<String> {
    tools.iter().map(get_tool_description_with_args).collect()
}

pub fn format_prompt_with_tools(tools: Vec<ToolInfo>, prompt_template: &str) -> String {
    let tool_descriptions = get_tool_descriptions(&tools);
    let mut prompt = prompt_template.to_string();
    prompt = prompt.replace("{{tool_descriptions}}", &tool_descriptions.join("\n"));
    if prompt.contains("{{tool_names}}") {
        let tool_names: Vec<String> = tools.iter().map(|tool| tool.name.to_string()).collect();
        prompt = prompt.replace("{{tool_names}}", &tool_names.join(", "));
    }
    prompt
}

/// One recorded entry of the agent's loop.
#[derive(Debug, Serialize)]
pub enum Step {
    SystemPromptStep(String),
    TaskStep(String),
    ActionStep(AgentStep),
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentStep {
    pub llm_output: Option<String>,
    pub action: Option<AgentAction>,
    pub observations: Option<String>,
    pub error: Option<SolverError>,
    step: usize,
}

impl AgentStep {
    fn new(step: usize) -> Self {
        AgentStep {
            llm_output: None,
            action: None,
            observations: None,
            error: None,
            step,
        }
    }
}

pub trait Agent {
    fn name(&self) -> &'static str;
    fn get_max_steps(&self) -> usize;
    fn get_step_number(&self) -> usize;
    fn increment_step_number(&mut self);
    fn get_logs_mut(&mut self) -> &mut Vec<Step>;
    fn set_task(&mut self, task: &str);
    fn get_system_prompt(&self) -> &str;

    /// Perform one reason-then-act step: think, act, observe.
    ///
    /// Returns `None` while the loop should continue, `Some(answer)` once
    /// the model emits its final-answer marker.
    fn step(&mut self, log_entry: &mut Step) -> Result<Option<String>, SolverError>;

    /// Drives `step` until a final answer is produced or the step budget is
    /// exhausted. On exhaustion the last seen completion is returned.
    fn direct_run(&mut self, _task: &str) -> Result<String, SolverError> {
        let mut final_answer: Option<String> = None;
        let mut last_completion = String::new();
        while final_answer.is_none() && self.get_step_number() < self.get_max_steps() {
            let mut step_log = Step::ActionStep(AgentStep::new(self.get_step_number()));
            final_answer = self.step(&mut step_log)?;
            if let Step::ActionStep(log) = &step_log {
                if let Some(output) = &log.llm_output {
                    last_completion = output.clone();
                }
            }
            self.get_logs_mut().push(step_log);
            self.increment_step_number();
        }

        match final_answer {
            Some(answer) => {
                info!("Final answer: {}", answer);
                Ok(answer)
            }
            None if !last_completion.is_empty() => {
                info!("Final answer: {}", last_completion);
                Ok(last_completion)
            }
            None => Err(SolverError::MaxSteps(format!(
                "No completion was produced within {} steps",
                self.get_max_steps()
            ))),
        }
    }

    fn run(&mut self, task: &str, reset: bool) -> Result<String, SolverError> {
        self.set_task(task);

        let system_prompt_step = Step::SystemPromptStep(self.get_system_prompt().to_string());
        if reset {
            self.get_logs_mut().clear();
            self.get_logs_mut().push(system_prompt_step);
        } else if self.get_logs_mut().is_empty() {
            self.get_logs_mut().push(system_prompt_step);
        } else {
            self.get_logs_mut()[0] = system_prompt_step;
        }
        self.get_logs_mut().push(Step::TaskStep(task.to_string()));
        self.direct_run(task)
    }

    /// Rebuilds the model's message memory from the step logs.
    fn write_inner_memory_from_logs(&mut self) -> Vec<Message> {
        let mut memory = Vec::new();
        for log in self.get_logs_mut() {
            match log {
                Step::SystemPromptStep(prompt) => {
                    memory.push(Message::system(prompt.clone()));
                }
                Step::TaskStep(task) => {
                    memory.push(Message::user(format!("Question: {}", task)));
                }
                Step::ActionStep(step_log) => {
                    if let Some(output) = &step_log.llm_output {
                        memory.push(Message::assistant(output.clone()));
                    }
                    if let Some(error) = &step_log.error {
                        memory.push(Message::user(format!(
                            "Error: {}\nNow let's retry: take care not to repeat previous errors!",
                            error.message()
                        )));
                    } else if let Some(observations) = &step_log.observations {
                        memory.push(Message::user(format!("Observation: {}", observations)));
                    }
                }
            }
        }
        memory
    }
}

/// A ReAct-style agent: the model emits which capability to invoke and with
/// what input, observes the result, and iterates until it emits a final
/// answer or the step budget runs out.
pub struct ToolCallingAgent<M: Model> {
    pub model: M,
    pub tools: Vec<Box<dyn AnyTool>>,
    system_prompt: String,
    name: &'static str,
    max_steps: usize,
    step_number: usize,
    pub task: String,
    logs: Vec<Step>,
}

impl<M: Model> ToolCallingAgent<M> {
    pub fn new(
        model: M,
        tools: Vec<Box<dyn AnyTool>>,
        system_prompt: Option<&str>,
        max_steps: Option<usize>,
    ) -> Self {
        let template = system_prompt.unwrap_or(REACT_SYSTEM_PROMPT);
        let system_prompt = format_prompt_with_tools(tools.tool_info(), template);
        ToolCallingAgent {
            model,
            tools,
            system_prompt,
            name: "ToolCallingAgent",
            max_steps: max_steps.unwrap_or(DEFAULT_MAX_STEPS),
            step_number: 0,
            task: String::new(),
            logs: Vec::new(),
        }
    }
}

impl<M: Model> Agent for ToolCallingAgent<M> {
    fn name(&self) -> &'static str {
        self.name
    }
    fn get_max_steps(&self) -> usize {
        self.max_steps
    }
    fn get_step_number(&self) -> usize {
        self.step_number
    }
    fn increment_step_number(&mut self) {
        self.step_number += 1;
    }
    fn get_logs_mut(&mut self) -> &mut Vec<Step> {
        &mut self.logs
    }
    fn set_task(&mut self, task: &str) {
        self.task = task.to_string();
    }
    fn get_system_prompt(&self) -> &str {
        &self.system_prompt
    }

    fn step(&mut self, log_entry: &mut Step) -> Result<Option<String>, SolverError> {
        let Step::ActionStep(step_log) = log_entry else {
            return Ok(None);
        };

        let memory = self.write_inner_memory_from_logs();
        let response = self
            .model
            .run(memory, None, Some(vec!["Observation:".to_string()]))?
            .get_response()?;
        step_log.llm_output = Some(response.clone());

        if let Some(answer) = parse_final_answer(&response) {
            return Ok(Some(answer));
        }

        match parse_action(&response) {
            Ok(action) => {
                info!(
                    "Executing tool call: {} with input: {}",
                    action.tool, action.input
                );
                step_log.action = Some(action.clone());
                match self.tools.call_with_text(&action.tool, &action.input) {
                    Ok(observation) => {
                        info!("Observation: {}", observation.trim());
                        step_log.observations =
                            Some(observation.chars().take(MAX_OBSERVATION_CHARS).collect());
                    }
                    Err(e) => {
                        info!("Error: {}", e);
                        step_log.error = Some(e);
                    }
                }
            }
            Err(e) => {
                info!("Error: {}", e);
                step_log.error = Some(e);
            }
        }
        Ok(None)
    }
}
