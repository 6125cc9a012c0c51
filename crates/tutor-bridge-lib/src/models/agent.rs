// Agent Template Models
// Deployment template document (s4d-bundle) and tool specifications

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Root of the `template.yml` document.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleDoc {
    #[serde(rename = "s4d-bundle")]
    pub bundle: Bundle,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bundle {
    pub agents: Vec<AgentEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentEntry {
    pub agent: AgentDefinition,
}

/// Mutable base record for one deployment. Loaded from the template, then
/// overridden with caller-supplied values before the create call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDefinition {
    pub name: String,
    pub description: String,
    /// Path of the runbook file, or the runbook text itself.
    #[serde(rename = "system-prompt")]
    pub system_prompt: String,
    /// Path of the retrieval prompt file. No literal-text fallback.
    #[serde(rename = "retrieval-prompt")]
    pub retrieval_prompt: String,
    pub model: String,
    #[serde(default)]
    pub tools: Vec<Value>,
    #[serde(default)]
    pub files: Vec<String>,
}

/// One `{tool_name, port}` pair from a deploy request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionServerRef {
    pub tool_name: String,
    pub port: u16,
}

/// Tool config exposing one local action server to a new assistant.
pub fn action_server_tool(action_name: &str, port: u16) -> Value {
    json!({
        "type": "action_server_by_sema4ai",
        "name": "Action Server by Sema4.ai",
        "description": "Run AI actions with [Sema4.ai Action Server](https://github.com/Sema4AI/actions).",
        "config": {
            "url": format!("http://localhost:{}", port),
            "api_key": "APIKEY",
            "name": action_name,
            "isBundled": "false",
        },
    })
}
