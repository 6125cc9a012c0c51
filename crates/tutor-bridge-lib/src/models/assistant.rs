// Assistant Service Models
// Wire types for the local assistant-management REST service

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Summary entry from `GET /assistants/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssistantSummary {
    pub assistant_id: String,
    pub name: String,
}

/// Entry from `GET /threads/`. `updated_at` stays a raw string here; only
/// threads that match a lookup get their timestamp parsed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThreadInfo {
    pub thread_id: String,
    pub assistant_id: Option<String>,
    pub updated_at: String,
}

/// One turn inside a thread history snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: Value,
    #[serde(default)]
    pub tool_calls: Vec<Value>,
    #[serde(default)]
    pub name: String,
}

/// Identifiers produced by a successful deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeployedAgent {
    pub assistant_id: String,
    pub thread_id: String,
}
