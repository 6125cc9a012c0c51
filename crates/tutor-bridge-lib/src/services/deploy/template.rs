// Deployment Template Handling
// Bundle loading, prompt resolution, and tool normalization

use std::path::Path;

use serde_json::{json, Value};

use crate::error::{BridgeError, BridgeResult};
use crate::models::{AgentDefinition, BundleDoc};
use crate::utils::paths;

/// Load the bundle document and take its first agent as the mutable base
/// record for a deployment.
pub fn load_agent_template(template_path: &Path) -> BridgeResult<AgentDefinition> {
    log::info!("Loading agent bundle: {}", template_path.display());
    let raw = std::fs::read_to_string(template_path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => BridgeError::NotFound {
            message: format!("{} does not exist", template_path.display()),
        },
        _ => BridgeError::Io(err),
    })?;
    let doc: BundleDoc = serde_yaml::from_str(&raw).map_err(|err| BridgeError::Parse {
        message: format!("{}: {}", template_path.display(), err),
    })?;
    doc.bundle
        .agents
        .into_iter()
        .next()
        .map(|entry| entry.agent)
        .ok_or_else(|| BridgeError::Parse {
            message: format!("{}: bundle has no agents", template_path.display()),
        })
}

/// Runbook text for a deployment: the file's contents when the value points
/// at a readable file, otherwise the value itself as literal prompt text.
pub fn resolve_system_prompt(action_root: &Path, system_prompt: &str) -> String {
    match paths::read_text_file(action_root, system_prompt) {
        Ok(content) => content,
        Err(_) => system_prompt.to_string(),
    }
}

/// Retrieval prompt text. Unlike the runbook there is no literal fallback;
/// an unreadable file fails the deployment.
pub fn resolve_retrieval_prompt(action_root: &Path, retrieval_prompt: &str) -> BridgeResult<String> {
    paths::read_text_file(action_root, retrieval_prompt)
}

/// Title casing where every run of letters starts uppercase and continues
/// lowercase; digits and punctuation break runs ("ddg_search" ->
/// "Ddg_Search"), matching how the desktop host names bare tools.
pub fn title_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut prev_was_letter = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if prev_was_letter {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            prev_was_letter = true;
        } else {
            result.push(ch);
            prev_was_letter = false;
        }
    }
    result
}

/// Normalize a tool list: entries already in object form pass through
/// unchanged, bare names expand to a minimal tool config.
pub fn normalize_tools(tools: &[Value]) -> Vec<Value> {
    let mut normalized = Vec::with_capacity(tools.len());
    for tool in tools {
        log::debug!("Adding tool: {}", tool);
        match tool.as_str() {
            Some(name) => {
                let title = title_case(name);
                normalized.push(json!({
                    "config": { "name": title },
                    "type": name,
                    "name": title,
                }));
            }
            None => normalized.push(tool.clone()),
        }
    }
    normalized
}

/// Assistant creation payload: the agent's identity plus the configurable
/// map the assistant service expects.
pub fn assistant_payload(
    agent: &AgentDefinition,
    system_prompt: &str,
    retrieval_prompt: &str,
    tools: &[Value],
) -> Value {
    json!({
        "name": agent.name,
        "config": {
            "configurable": {
                "type==agent/retrieval_description": retrieval_prompt,
                "type==agent/agent_type": agent.model,
                "type==agent/system_message": system_prompt,
                "type==agent/tools": tools,
                "type": "agent",
                "type==agent/interrupt_before_action": false,
                "type==agent/description": agent.description,
            }
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const TEMPLATE: &str = r#"
s4d-bundle:
  agents:
    - agent:
        name: Base Agent
        description: Starting point
        system-prompt: You are helpful.
        retrieval-prompt: prompts/retrieval.md
        model: GPT 3.5 Turbo
"#;

    #[test]
    fn test_load_agent_template() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("template.yml");
        fs::write(&path, TEMPLATE).unwrap();

        let agent = load_agent_template(&path).unwrap();
        assert_eq!(agent.name, "Base Agent");
        assert_eq!(agent.model, "GPT 3.5 Turbo");
        assert!(agent.tools.is_empty());
    }

    #[test]
    fn test_load_agent_template_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_agent_template(&dir.path().join("template.yml")).unwrap_err();
        assert!(matches!(err, BridgeError::NotFound { .. }));
    }

    #[test]
    fn test_load_agent_template_malformed_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("template.yml");
        fs::write(&path, "s4d-bundle: [unclosed").unwrap();
        let err = load_agent_template(&path).unwrap_err();
        assert!(matches!(err, BridgeError::Parse { .. }));
    }

    #[test]
    fn test_load_agent_template_no_agents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("template.yml");
        fs::write(&path, "s4d-bundle:\n  agents: []\n").unwrap();
        let err = load_agent_template(&path).unwrap_err();
        assert!(matches!(err, BridgeError::Parse { .. }));
    }

    #[test]
    fn test_system_prompt_reads_existing_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("runbook.md"), "Step one.").unwrap();
        assert_eq!(resolve_system_prompt(dir.path(), "runbook.md"), "Step one.");
    }

    #[test]
    fn test_system_prompt_falls_back_to_literal_text() {
        let dir = TempDir::new().unwrap();
        let literal = "You are a careful invoicing agent.\nAlways double check.";
        assert_eq!(resolve_system_prompt(dir.path(), literal), literal);
    }

    #[test]
    fn test_retrieval_prompt_has_no_fallback() {
        let dir = TempDir::new().unwrap();
        let err = resolve_retrieval_prompt(dir.path(), "missing.md").unwrap_err();
        assert!(matches!(err, BridgeError::NotFound { .. }));
    }

    #[test]
    fn test_title_case_single_word() {
        assert_eq!(title_case("search"), "Search");
        assert_eq!(title_case("ALL"), "All");
    }

    #[test]
    fn test_title_case_breaks_on_non_letters() {
        assert_eq!(title_case("ddg_search"), "Ddg_Search");
        assert_eq!(title_case("google sheets"), "Google Sheets");
        assert_eq!(title_case("foo2bar"), "Foo2Bar");
        assert_eq!(title_case("they're"), "They'Re");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_normalize_tools_expands_bare_names() {
        let tools = vec![Value::String("search".to_string())];
        let normalized = normalize_tools(&tools);
        assert_eq!(
            normalized,
            vec![json!({
                "config": { "name": "Search" },
                "type": "search",
                "name": "Search",
            })]
        );
    }

    #[test]
    fn test_normalize_tools_passes_objects_through() {
        let inline = json!({"type": "custom", "name": "Custom", "config": {"name": "Custom", "extra": 1}});
        let tools = vec![inline.clone(), Value::String("ddg_search".to_string())];
        let normalized = normalize_tools(&tools);
        assert_eq!(normalized[0], inline);
        assert_eq!(normalized[1]["name"], "Ddg_Search");
    }

    #[test]
    fn test_assistant_payload_configurable_keys() {
        let agent = AgentDefinition {
            name: "Invoice Helper".to_string(),
            description: "Handles invoices".to_string(),
            system_prompt: "ignored".to_string(),
            retrieval_prompt: "ignored".to_string(),
            model: "GPT 4".to_string(),
            tools: vec![],
            files: vec![],
        };
        let tools = vec![json!({"type": "search"})];
        let payload = assistant_payload(&agent, "Runbook text", "Retrieval text", &tools);

        assert_eq!(payload["name"], "Invoice Helper");
        let configurable = payload["config"]["configurable"].as_object().unwrap();
        assert_eq!(configurable.len(), 7);
        assert_eq!(configurable["type"], "agent");
        assert_eq!(configurable["type==agent/agent_type"], "GPT 4");
        assert_eq!(configurable["type==agent/system_message"], "Runbook text");
        assert_eq!(configurable["type==agent/retrieval_description"], "Retrieval text");
        assert_eq!(configurable["type==agent/description"], "Handles invoices");
        assert_eq!(configurable["type==agent/interrupt_before_action"], false);
        assert_eq!(configurable["type==agent/tools"], json!(tools));
    }
}
