// Thread Summary Handler
// Renders an assistant's most recent conversation

use crate::config::Config;
use crate::error::BridgeResult;
use crate::services::{summary, AssistantClient};

/// Returned when the assistant has no threads.
pub const NO_THREADS: &str = "Did not find threads";

/// Transcript of the assistant's most recently updated thread, or a fixed
/// line when it has none.
pub async fn get_latest_thread(config: &Config, assistant_id: &str) -> BridgeResult<String> {
    let client = AssistantClient::from_config(config);
    let transcript = summary::latest_thread_transcript(&client, assistant_id).await?;
    Ok(transcript.unwrap_or_else(|| NO_THREADS.to_string()))
}
