// Assistant Query and Update Handlers
// Listing, runbook lookup, and runbook replacement

use serde_json::Value;

use crate::config::Config;
use crate::error::{BridgeError, BridgeResult};
use crate::models::AssistantSummary;
use crate::services::AssistantClient;

/// Returned when a runbook lookup fails for any reason.
pub const NO_RUNBOOK: &str = "Did not find the runbook";

/// Rendered listing of all assistants with their IDs, one per line.
pub async fn get_all_agents(config: &Config) -> BridgeResult<String> {
    let client = AssistantClient::from_config(config);
    let agents = client.list_assistants().await?;
    Ok(render_agent_listing(&agents))
}

fn render_agent_listing(agents: &[AssistantSummary]) -> String {
    let mut listing = String::from("Available agents are:\n");
    for agent in agents {
        listing.push_str(&format!(
            "Name: {}, ID: {}\n",
            agent.name, agent.assistant_id
        ));
    }
    listing
}

/// The assistant's runbook, or a fixed "not found" line. Every failure
/// cause collapses into that line; callers cannot tell them apart.
pub async fn get_agent_runbook(config: &Config, assistant_id: &str) -> String {
    let client = AssistantClient::from_config(config);
    match client.runbook(assistant_id).await {
        Ok(Some(runbook)) => runbook,
        Ok(None) => NO_RUNBOOK.to_string(),
        Err(err) => {
            log::debug!("Runbook lookup for {} failed: {}", assistant_id, err);
            NO_RUNBOOK.to_string()
        }
    }
}

/// Replace an assistant's runbook wholesale. A non-200 from the service
/// becomes a failure line carrying the status and body, not an error.
pub async fn update_agent_runbook(
    config: &Config,
    assistant_id: &str,
    new_runbook: &str,
) -> BridgeResult<String> {
    let client = AssistantClient::from_config(config);
    match client.update_runbook(assistant_id, new_runbook).await {
        Ok(()) => Ok("Successfully updated!".to_string()),
        Err(BridgeError::Api { status, body }) => Ok(format_update_failure(status, &body)),
        Err(err) => Err(err),
    }
}

fn format_update_failure(status: u16, body: &str) -> String {
    // Parsed body when the service sent JSON, raw text otherwise
    let message = serde_json::from_str::<Value>(body)
        .map(|value| value.to_string())
        .unwrap_or_else(|_| body.to_string());
    format!("Failed with status code: {}, message is {}", status, message)
}
