// Tutor Bridge Error Types
// Shared error taxonomy for registry, deployment, and assistant operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Non-success response from the assistant service, with the raw body.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type BridgeResult<T> = Result<T, BridgeError>;

// The MCP tool boundary surfaces domain failures as plain strings
impl From<BridgeError> for String {
    fn from(error: BridgeError) -> Self {
        error.to_string()
    }
}
