// Action Registry Models
// Desktop registry documents and the filtered listing returned to callers

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One registered action server with its parsed API specification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionPackage {
    pub name: String,
    pub port: u16,
    /// Parsed `metadata.json` of the package, passed through verbatim.
    pub api_spec: Value,
}

/// Listing of action servers available on the desktop host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ActionPackages {
    pub actions: Vec<ActionPackage>,
}

/// Names of action packages to hide from a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct InternalActionPackages {
    pub names: Vec<String>,
}

impl InternalActionPackages {
    pub fn new(names: Vec<String>) -> Self {
        InternalActionPackages { names }
    }

    /// The packages backing the Runbook Tutor itself. Callers pass this in
    /// explicitly; the registry never applies it on its own.
    pub fn runbook_tutor() -> Self {
        InternalActionPackages {
            names: vec![
                "Sema4 Desktop Action Getter".to_string(),
                "Thread Monitor".to_string(),
                "Agent Deployer".to_string(),
                // Spelled as the deployed package spells it
                "Retreival".to_string(),
            ],
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

/// Registry document at `<install_home>/sema4ai-desktop/config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct DesktopConfig {
    #[serde(rename = "ActionPackageMapping")]
    pub action_package_mapping: Vec<ActionPackageMapping>,
}

/// One registered package entry in the desktop registry.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionPackageMapping {
    pub name: String,
    pub path: PathBuf,
    #[serde(rename = "actionServerPort")]
    pub action_server_port: u16,
}
