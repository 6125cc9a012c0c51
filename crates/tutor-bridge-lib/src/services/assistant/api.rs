// Assistant Service API Operations
// Low-level calls against the local assistant-management REST service

use reqwest::multipart;
use reqwest::Client;
use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};
use crate::models::{AssistantSummary, ThreadInfo};

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Create an assistant. Returns the new `assistant_id`.
pub async fn create_assistant(
    client: &Client,
    base_url: &str,
    payload: &Value,
) -> BridgeResult<String> {
    let response = client
        .post(endpoint(base_url, "/assistants"))
        .json(payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BridgeError::Api {
            status: status.as_u16(),
            body,
        });
    }

    let data: Value = response.json().await.map_err(|e| BridgeError::Parse {
        message: format!("assistant creation response: {}", e),
    })?;
    data["assistant_id"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| BridgeError::Parse {
            message: "no assistant_id in creation response".to_string(),
        })
}

/// Fetch one assistant document. The body is parsed, not status-checked;
/// callers decide what a missing assistant means.
pub async fn get_assistant(
    client: &Client,
    base_url: &str,
    assistant_id: &str,
) -> BridgeResult<Value> {
    let response = client
        .get(endpoint(base_url, &format!("/assistants/{}", assistant_id)))
        .send()
        .await?;

    response.json().await.map_err(|e| BridgeError::Parse {
        message: format!("assistant response: {}", e),
    })
}

/// Replace an assistant's name/config/public document. Anything but a 200
/// comes back as `Api` with the raw body.
pub async fn update_assistant(
    client: &Client,
    base_url: &str,
    assistant_id: &str,
    payload: &Value,
) -> BridgeResult<()> {
    let response = client
        .put(endpoint(base_url, &format!("/assistants/{}", assistant_id)))
        .json(payload)
        .send()
        .await?;

    let status = response.status();
    if status.as_u16() == 200 {
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(BridgeError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

/// List all assistants.
pub async fn list_assistants(
    client: &Client,
    base_url: &str,
) -> BridgeResult<Vec<AssistantSummary>> {
    let response = client
        .get(endpoint(base_url, "/assistants/"))
        .send()
        .await?;

    response.json().await.map_err(|e| BridgeError::Parse {
        message: format!("assistant listing: {}", e),
    })
}

/// Attach one reference file to an assistant via the ingestion endpoint.
pub async fn ingest_file(
    client: &Client,
    base_url: &str,
    assistant_id: &str,
    filename: &str,
    content: Vec<u8>,
    mime_type: &str,
) -> BridgeResult<()> {
    let part = multipart::Part::bytes(content)
        .file_name(filename.to_string())
        .mime_str(mime_type)?;
    let form = multipart::Form::new()
        .part("files", part)
        .text("config", ingest_config_field(assistant_id)?);

    let response = client
        .post(endpoint(base_url, "/ingest"))
        .header("accept", "application/json")
        .multipart(form)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BridgeError::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(())
}

// Reference files attach to the assistant, not the welcome thread; the
// service accepts one or the other, never both.
fn ingest_config_field(assistant_id: &str) -> BridgeResult<String> {
    let config = serde_json::json!({
        "configurable": { "assistant_id": assistant_id }
    });
    Ok(serde_json::to_string(&config)?)
}

/// Create a thread. Returns the new `thread_id`.
pub async fn create_thread(
    client: &Client,
    base_url: &str,
    name: &str,
    assistant_id: &str,
    starting_message: &str,
) -> BridgeResult<String> {
    let payload = serde_json::json!({
        "name": name,
        "assistant_id": assistant_id,
        "starting_message": starting_message,
    });

    let response = client
        .post(endpoint(base_url, "/threads"))
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(BridgeError::Api {
            status: status.as_u16(),
            body,
        });
    }

    let data: Value = response.json().await.map_err(|e| BridgeError::Parse {
        message: format!("thread creation response: {}", e),
    })?;
    data["thread_id"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| BridgeError::Parse {
            message: "no thread_id in creation response".to_string(),
        })
}

/// List all threads across all assistants.
pub async fn list_threads(client: &Client, base_url: &str) -> BridgeResult<Vec<ThreadInfo>> {
    let response = client
        .get(endpoint(base_url, "/threads/"))
        .send()
        .await?;

    response.json().await.map_err(|e| BridgeError::Parse {
        message: format!("thread listing: {}", e),
    })
}

/// Fetch a thread's history snapshots.
pub async fn thread_history(
    client: &Client,
    base_url: &str,
    thread_id: &str,
) -> BridgeResult<Vec<Value>> {
    let response = client
        .get(endpoint(base_url, &format!("/threads/{}/history", thread_id)))
        .send()
        .await?;

    response.json().await.map_err(|e| BridgeError::Parse {
        message: format!("thread history: {}", e),
    })
}
