// Tutor Bridge Configuration
// Explicit runtime settings resolved once from the environment

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{BridgeError, BridgeResult};

/// Default base URL of the local assistant-management service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8100";

/// Environment variable naming the desktop host's home directory.
pub const INSTALL_HOME_ENV: &str = "ROBOCORP_HOME";

/// Optional override for the assistant-management service base URL.
pub const BASE_URL_ENV: &str = "TUTOR_BRIDGE_URL";

/// Optional override for the directory holding template.yml and prompts.
pub const ACTION_ROOT_ENV: &str = "TUTOR_BRIDGE_ROOT";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for all assistant-management endpoints.
    pub base_url: String,
    /// Desktop host installation home, from `ROBOCORP_HOME`. Left unset when
    /// the variable is absent; registry operations fail at the call site.
    pub install_home: Option<PathBuf>,
    /// Directory that relative template/prompt/upload paths resolve against.
    pub action_root: PathBuf,
}

impl Config {
    /// Builds a config from the process environment. Loads `devdata/.env`
    /// from the action root first so local development credentials apply,
    /// matching how the desktop host launches action packages.
    pub fn from_env() -> Self {
        let action_root = env::var(ACTION_ROOT_ENV)
            .map(PathBuf::from)
            .or_else(|_| env::current_dir())
            .unwrap_or_else(|_| PathBuf::from("."));

        // Best effort: a missing .env file is the normal production case
        let _ = dotenvy::from_path(action_root.join("devdata").join(".env"));

        let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let install_home = env::var(INSTALL_HOME_ENV).ok().map(PathBuf::from);

        Config {
            base_url,
            install_home,
            action_root,
        }
    }

    /// The installation home, or a configuration error when `ROBOCORP_HOME`
    /// was not set.
    pub fn install_home(&self) -> BridgeResult<&Path> {
        self.install_home
            .as_deref()
            .ok_or_else(|| BridgeError::Configuration {
                message: format!("{} is not set", INSTALL_HOME_ENV),
            })
    }

    /// Path of the desktop host's registry document.
    pub fn desktop_config_path(&self) -> BridgeResult<PathBuf> {
        Ok(self
            .install_home()?
            .join("sema4ai-desktop")
            .join("config.json"))
    }

    /// Path of the deployment template bundled with the action package.
    pub fn template_path(&self) -> PathBuf {
        self.action_root.join("template.yml")
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: DEFAULT_BASE_URL.to_string(),
            install_home: None,
            action_root: PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let config = Config::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8100");
    }

    #[test]
    fn test_desktop_config_path_requires_install_home() {
        let config = Config::default();
        let err = config.desktop_config_path().unwrap_err();
        assert!(err.to_string().contains("ROBOCORP_HOME"));
    }

    #[test]
    fn test_desktop_config_path_joins_under_install_home() {
        let config = Config {
            install_home: Some(PathBuf::from("/home/user/.robocorp")),
            ..Config::default()
        };
        let path = config.desktop_config_path().unwrap();
        assert_eq!(
            path,
            PathBuf::from("/home/user/.robocorp/sema4ai-desktop/config.json")
        );
    }

    #[test]
    fn test_template_path_under_action_root() {
        let config = Config {
            action_root: PathBuf::from("/opt/tutor"),
            ..Config::default()
        };
        assert_eq!(config.template_path(), PathBuf::from("/opt/tutor/template.yml"));
    }
}
