use serde::Serialize;

/// Name and description shared by every concrete tool.
#[derive(Debug, Serialize, Default, Clone)]
pub struct BaseTool {
    pub name: &'static str,
    pub description: &'static str,
}
