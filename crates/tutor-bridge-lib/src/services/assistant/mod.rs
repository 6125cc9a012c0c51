// Assistant Management Client
// High-level operations over the local assistant-management service

pub mod api;

use reqwest::Client;
use serde_json::Value;

use crate::config::Config;
use crate::error::{BridgeError, BridgeResult};
use crate::models::{AssistantSummary, ThreadInfo};

/// Key of the runbook inside an assistant's configurable map.
pub const SYSTEM_MESSAGE_KEY: &str = "type==agent/system_message";

pub struct AssistantClient {
    client: Client,
    base_url: String,
}

impl AssistantClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        AssistantClient {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        AssistantClient::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn create_assistant(&self, payload: &Value) -> BridgeResult<String> {
        api::create_assistant(&self.client, &self.base_url, payload).await
    }

    pub async fn get_assistant(&self, assistant_id: &str) -> BridgeResult<Value> {
        api::get_assistant(&self.client, &self.base_url, assistant_id).await
    }

    pub async fn list_assistants(&self) -> BridgeResult<Vec<AssistantSummary>> {
        api::list_assistants(&self.client, &self.base_url).await
    }

    pub async fn ingest_file(
        &self,
        assistant_id: &str,
        filename: &str,
        content: Vec<u8>,
        mime_type: &str,
    ) -> BridgeResult<()> {
        api::ingest_file(
            &self.client,
            &self.base_url,
            assistant_id,
            filename,
            content,
            mime_type,
        )
        .await
    }

    pub async fn create_thread(
        &self,
        name: &str,
        assistant_id: &str,
        starting_message: &str,
    ) -> BridgeResult<String> {
        api::create_thread(&self.client, &self.base_url, name, assistant_id, starting_message)
            .await
    }

    pub async fn list_threads(&self) -> BridgeResult<Vec<ThreadInfo>> {
        api::list_threads(&self.client, &self.base_url).await
    }

    pub async fn thread_history(&self, thread_id: &str) -> BridgeResult<Vec<Value>> {
        api::thread_history(&self.client, &self.base_url, thread_id).await
    }

    /// The runbook of one assistant, or `None` when the fetched document has
    /// no runbook where one is expected. Transport failures stay errors.
    pub async fn runbook(&self, assistant_id: &str) -> BridgeResult<Option<String>> {
        log::debug!("Fetching runbook for assistant {}", assistant_id);
        let assistant = self.get_assistant(assistant_id).await?;
        Ok(extract_runbook(&assistant))
    }

    /// Replace an assistant's runbook in place, keeping everything else in
    /// its retrieved config untouched.
    pub async fn update_runbook(&self, assistant_id: &str, new_runbook: &str) -> BridgeResult<()> {
        let assistant = self.get_assistant(assistant_id).await?;
        let payload = build_runbook_update(&assistant, new_runbook)?;
        log::info!("Updating runbook for assistant {}", assistant_id);
        api::update_assistant(&self.client, &self.base_url, assistant_id, &payload).await
    }
}

fn extract_runbook(assistant: &Value) -> Option<String> {
    assistant["config"]["configurable"][SYSTEM_MESSAGE_KEY]
        .as_str()
        .map(|s| s.to_string())
}

/// The PUT payload for a runbook change: the assistant's own name, public
/// flag, and config, with only the runbook swapped out.
fn build_runbook_update(assistant: &Value, new_runbook: &str) -> BridgeResult<Value> {
    let name = assistant
        .get("name")
        .cloned()
        .ok_or_else(|| BridgeError::Parse {
            message: "no name in assistant document".to_string(),
        })?;
    let public = assistant
        .get("public")
        .cloned()
        .ok_or_else(|| BridgeError::Parse {
            message: "no public flag in assistant document".to_string(),
        })?;
    let mut config = assistant
        .get("config")
        .cloned()
        .ok_or_else(|| BridgeError::Parse {
            message: "no config in assistant document".to_string(),
        })?;

    match config.get_mut("configurable").and_then(Value::as_object_mut) {
        Some(configurable) => {
            configurable.insert(
                SYSTEM_MESSAGE_KEY.to_string(),
                Value::String(new_runbook.to_string()),
            );
        }
        None => {
            return Err(BridgeError::Parse {
                message: "no configurable map in assistant config".to_string(),
            })
        }
    }

    Ok(serde_json::json!({
        "name": name,
        "config": config,
        "public": public,
    }))
}
