// Agent Deployment Orchestrator
// Builds an assistant from the bundled template and opens its welcome thread

pub mod template;

use std::path::Path;

use crate::config::Config;
use crate::error::BridgeResult;
use crate::models::{action_server_tool, ActionServerRef, AgentDefinition, DeployedAgent};
use crate::services::assistant::AssistantClient;
use crate::utils::paths;

/// Name of the thread opened for every new agent.
const WELCOME_THREAD_NAME: &str = "Welcome";

/// Opening message of the welcome thread.
const WELCOME_STARTING_MESSAGE: &str = "Hi! How can I help you with today?";

pub struct AgentDeployer {
    client: AssistantClient,
    config: Config,
}

impl AgentDeployer {
    pub fn new(config: Config) -> Self {
        AgentDeployer {
            client: AssistantClient::from_config(&config),
            config,
        }
    }

    /// Deploy a new agent from the bundled template: apply the caller's
    /// name, description, and runbook, expose the given action servers as
    /// its tools, then run the create/upload/thread sequence.
    pub async fn deploy(
        &self,
        name: &str,
        description: &str,
        system_prompt: &str,
        action_servers: &[ActionServerRef],
    ) -> BridgeResult<DeployedAgent> {
        let base = template::load_agent_template(&self.config.template_path())?;
        let agent = apply_overrides(base, name, description, system_prompt, action_servers);
        self.deploy_agent(agent).await
    }

    /// Run the deployment sequence for a fully resolved agent record. The
    /// three remote calls have no rollback: a late failure leaves the
    /// created assistant behind without its welcome thread.
    pub async fn deploy_agent(&self, agent: AgentDefinition) -> BridgeResult<DeployedAgent> {
        log::info!("Deploying agent: {}", agent.name);

        let assistant_id = self.create_assistant(&agent).await?;
        self.upload_reference_files(&agent, &assistant_id).await;
        let thread_id = self.open_welcome_thread(&assistant_id).await?;

        Ok(DeployedAgent {
            assistant_id,
            thread_id,
        })
    }

    /// Step 1: Resolve prompts and tools, then create the assistant.
    async fn create_assistant(&self, agent: &AgentDefinition) -> BridgeResult<String> {
        let system_prompt =
            template::resolve_system_prompt(&self.config.action_root, &agent.system_prompt);
        let retrieval_prompt =
            template::resolve_retrieval_prompt(&self.config.action_root, &agent.retrieval_prompt)?;
        let tools = template::normalize_tools(&agent.tools);

        let payload = template::assistant_payload(agent, &system_prompt, &retrieval_prompt, &tools);
        let assistant_id = self.client.create_assistant(&payload).await?;
        log::info!("Assistant created with ID {}", assistant_id);
        Ok(assistant_id)
    }

    /// Step 2: Best-effort reference file uploads. Failures are logged and
    /// skipped; the deployment continues.
    async fn upload_reference_files(&self, agent: &AgentDefinition, assistant_id: &str) {
        if agent.files.is_empty() {
            return;
        }
        log::info!("Uploading files for agent: {}", agent.name);
        for file_path in &agent.files {
            if let Err(err) = self.upload_one(file_path, assistant_id).await {
                log::warn!("Skipping reference file {}: {}", file_path, err);
            }
        }
    }

    async fn upload_one(&self, file_path: &str, assistant_id: &str) -> BridgeResult<()> {
        let filename = file_basename(file_path);
        log::info!("Uploading file: {}", filename);
        let content = paths::read_binary_file(&self.config.action_root, file_path)?;
        let mime_type = paths::guess_mime_type(file_path);
        self.client
            .ingest_file(assistant_id, filename, content, mime_type)
            .await
    }

    /// Step 3: Open the welcome thread and hand back its ID.
    async fn open_welcome_thread(&self, assistant_id: &str) -> BridgeResult<String> {
        let thread_id = self
            .client
            .create_thread(WELCOME_THREAD_NAME, assistant_id, WELCOME_STARTING_MESSAGE)
            .await?;
        log::info!("Welcome thread created with ID {}", thread_id);
        Ok(thread_id)
    }
}

/// The template agent with caller overrides applied and its tool list
/// replaced by action-server configs.
fn apply_overrides(
    mut agent: AgentDefinition,
    name: &str,
    description: &str,
    system_prompt: &str,
    action_servers: &[ActionServerRef],
) -> AgentDefinition {
    agent.name = name.to_string();
    agent.description = description.to_string();
    agent.system_prompt = system_prompt.to_string();
    agent.tools = action_servers
        .iter()
        .map(|server| action_server_tool(&server.tool_name, server.port))
        .collect();
    agent
}

fn file_basename(file_path: &str) -> &str {
    Path::new(file_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn template_agent() -> AgentDefinition {
        AgentDefinition {
            name: "Base Agent".to_string(),
            description: "Starting point".to_string(),
            system_prompt: "prompts/runbook.md".to_string(),
            retrieval_prompt: "prompts/retrieval.md".to_string(),
            model: "GPT 3.5 Turbo".to_string(),
            tools: vec![json!("ddg_search")],
            files: vec!["docs/reference.md".to_string()],
        }
    }

    #[test]
    fn test_apply_overrides_replaces_identity_and_tools() {
        let servers = vec![
            ActionServerRef {
                tool_name: "Google Sheets".to_string(),
                port: 8806,
            },
            ActionServerRef {
                tool_name: "Mail".to_string(),
                port: 8807,
            },
        ];
        let agent = apply_overrides(
            template_agent(),
            "Invoice Helper",
            "Handles invoices",
            "Always reconcile totals.",
            &servers,
        );

        assert_eq!(agent.name, "Invoice Helper");
        assert_eq!(agent.description, "Handles invoices");
        assert_eq!(agent.system_prompt, "Always reconcile totals.");
        // Template tools are replaced, not appended to
        assert_eq!(agent.tools.len(), 2);
        assert_eq!(agent.tools[0]["config"]["url"], "http://localhost:8806");
        assert_eq!(agent.tools[1]["config"]["name"], "Mail");
        // Everything else from the template survives
        assert_eq!(agent.model, "GPT 3.5 Turbo");
        assert_eq!(agent.files, vec!["docs/reference.md".to_string()]);
    }

    #[test]
    fn test_apply_overrides_with_no_servers_clears_tools() {
        let agent = apply_overrides(template_agent(), "A", "B", "C", &[]);
        assert!(agent.tools.is_empty());
    }

    #[test]
    fn test_file_basename() {
        assert_eq!(file_basename("docs/reference.md"), "reference.md");
        assert_eq!(file_basename("reference.md"), "reference.md");
        assert_eq!(file_basename("/abs/path/data.csv"), "data.csv");
    }
}
