// Thread Summarizer Service
// Selects an assistant's most recent thread and renders its transcript

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};
use crate::models::{ThreadInfo, ThreadMessage};
use crate::services::assistant::AssistantClient;

/// Tool responses are clipped to this many characters in a transcript.
const TOOL_RESPONSE_PREVIEW_CHARS: usize = 100;

/// Render the most recently updated thread of one assistant, or `None`
/// when the assistant has no threads at all.
pub async fn latest_thread_transcript(
    client: &AssistantClient,
    assistant_id: &str,
) -> BridgeResult<Option<String>> {
    let threads = client.list_threads().await?;
    let latest = match select_latest_thread(&threads, assistant_id)? {
        Some(thread) => thread,
        None => return Ok(None),
    };

    log::info!("Reading thread {}", latest.thread_id);
    let history = client.thread_history(&latest.thread_id).await?;
    let messages = extract_messages(&history)?;
    Ok(Some(render_transcript(&messages)))
}

/// The matching thread with the greatest `updated_at`, independent of list
/// order. Ties keep the first one encountered. A malformed timestamp on any
/// matching thread fails the lookup; non-matching threads are never parsed.
pub fn select_latest_thread(
    threads: &[ThreadInfo],
    assistant_id: &str,
) -> BridgeResult<Option<ThreadInfo>> {
    let mut latest: Option<(DateTime<FixedOffset>, &ThreadInfo)> = None;
    for thread in threads
        .iter()
        .filter(|t| t.assistant_id.as_deref() == Some(assistant_id))
    {
        let updated_at = parse_timestamp(&thread.updated_at)?;
        match &latest {
            Some((current, _)) if updated_at <= *current => {}
            _ => latest = Some((updated_at, thread)),
        }
    }
    Ok(latest.map(|(_, thread)| thread.clone()))
}

// ISO-8601 with a trailing Z treated as UTC; timestamps without an offset
// are taken as UTC too.
fn parse_timestamp(raw: &str) -> BridgeResult<DateTime<FixedOffset>> {
    let normalized = raw.replace('Z', "+00:00");
    DateTime::parse_from_rfc3339(&normalized)
        .or_else(|_| {
            normalized
                .parse::<NaiveDateTime>()
                .map(|naive| naive.and_utc().fixed_offset())
        })
        .map_err(|_| BridgeError::Parse {
            message: format!("invalid thread timestamp: {}", raw),
        })
}

/// Messages of the first history snapshot.
fn extract_messages(history: &[Value]) -> BridgeResult<Vec<ThreadMessage>> {
    let first = history.first().ok_or_else(|| BridgeError::Parse {
        message: "empty thread history".to_string(),
    })?;
    serde_json::from_value(first["values"]["messages"].clone()).map_err(|e| BridgeError::Parse {
        message: format!("thread messages: {}", e),
    })
}

/// Render a transcript: AI turns without tool calls, human turns, and tool
/// results with a clipped response. Everything else is dropped.
pub fn render_transcript(messages: &[ThreadMessage]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for message in messages {
        match message.kind.as_str() {
            "ai" if message.tool_calls.is_empty() => {
                lines.push(format!("AI: {}", content_text(&message.content)));
            }
            "human" => {
                lines.push(format!("Human: {}", content_text(&message.content)));
            }
            "tool" => {
                let preview: String = content_text(&message.content)
                    .chars()
                    .take(TOOL_RESPONSE_PREVIEW_CHARS)
                    .collect();
                lines.push(format!("Tool: {}\n  Response: {}", message.name, preview));
            }
            _ => {}
        }
    }
    lines.join("\n\n")
}

fn content_text(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
