// Agent Deployment Handler
// Deploys a new agent from the bundled template

use crate::config::Config;
use crate::error::{BridgeError, BridgeResult};
use crate::models::{ActionServerRef, DeployedAgent};
use crate::services::AgentDeployer;

/// Deploy a new agent to the desktop. `tool_names` is a JSON-encoded list
/// of `{tool_name, port}` pairs, with ports taken from a prior action
/// listing. Returns the new assistant and welcome thread IDs.
pub async fn deploy_agent_to_desktop(
    config: &Config,
    name: &str,
    description: &str,
    system_prompt: &str,
    tool_names: &str,
) -> BridgeResult<DeployedAgent> {
    let action_servers = parse_tool_names(tool_names)?;
    AgentDeployer::new(config.clone())
        .deploy(name, description, system_prompt, &action_servers)
        .await
}

fn parse_tool_names(tool_names: &str) -> BridgeResult<Vec<ActionServerRef>> {
    serde_json::from_str(tool_names).map_err(|err| BridgeError::Parse {
        message: format!("tool_names is not a list of {{tool_name, port}} pairs: {}", err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tool_names() {
        let refs = parse_tool_names(
            r#"[{"tool_name": "Google Sheets", "port": 8806}, {"tool_name": "Mail", "port": 8807}]"#,
        )
        .unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].tool_name, "Google Sheets");
        assert_eq!(refs[0].port, 8806);
        assert_eq!(refs[1].tool_name, "Mail");
    }

    #[test]
    fn test_parse_tool_names_empty_list() {
        assert!(parse_tool_names("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_tool_names_rejects_malformed_input() {
        let err = parse_tool_names("not json").unwrap_err();
        assert!(matches!(err, BridgeError::Parse { .. }));

        let err = parse_tool_names(r#"[{"tool_name": "Mail"}]"#).unwrap_err();
        assert!(matches!(err, BridgeError::Parse { .. }));
    }
}
