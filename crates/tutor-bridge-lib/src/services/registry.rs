// Action Registry Service
// Lists action servers registered with the local desktop host

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::config::Config;
use crate::error::{BridgeError, BridgeResult};
use crate::models::{ActionPackage, ActionPackages, DesktopConfig, InternalActionPackages};

pub struct ActionRegistry {
    config: Config,
}

impl ActionRegistry {
    pub fn new(config: Config) -> Self {
        ActionRegistry { config }
    }

    /// Registered action servers whose names are not in `exclude`, each with
    /// its parsed API specification. Every call re-reads disk; nothing is
    /// cached. One unreadable package fails the whole listing.
    pub fn list_actions(
        &self,
        exclude: &InternalActionPackages,
    ) -> BridgeResult<ActionPackages> {
        let config_path = self.config.desktop_config_path()?;
        log::debug!("Reading desktop registry: {}", config_path.display());

        let desktop: DesktopConfig = read_json_file(&config_path)?;

        let mut actions = Vec::new();
        for mapping in &desktop.action_package_mapping {
            // Metadata is read before the exclusion check, so a broken
            // package surfaces even when the caller excludes it
            let metadata_path = mapping.path.join("metadata.json");
            let api_spec: Value = read_json_file(&metadata_path)?;

            if exclude.contains(&mapping.name) {
                continue;
            }
            actions.push(ActionPackage {
                name: mapping.name.clone(),
                port: mapping.action_server_port,
                api_spec,
            });
        }

        log::info!("Listed {} action servers", actions.len());
        Ok(ActionPackages { actions })
    }
}

fn read_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> BridgeResult<T> {
    let raw = fs::read_to_string(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => BridgeError::NotFound {
            message: format!("{} does not exist", path.display()),
        },
        _ => BridgeError::Io(err),
    })?;
    serde_json::from_str(&raw).map_err(|err| BridgeError::Parse {
        message: format!("{}: {}", path.display(), err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_package(dir: &TempDir, name: &str, metadata: &str) -> PathBuf {
        let package_dir = dir.path().join(name.to_lowercase().replace(' ', "-"));
        fs::create_dir_all(&package_dir).unwrap();
        fs::write(package_dir.join("metadata.json"), metadata).unwrap();
        package_dir
    }

    fn write_registry(home: &TempDir, entries: &[(&str, &Path, u16)]) {
        let desktop_dir = home.path().join("sema4ai-desktop");
        fs::create_dir_all(&desktop_dir).unwrap();
        let mapping: Vec<Value> = entries
            .iter()
            .map(|(name, path, port)| {
                serde_json::json!({
                    "name": name,
                    "path": path,
                    "actionServerPort": port,
                })
            })
            .collect();
        let config = serde_json::json!({ "ActionPackageMapping": mapping });
        fs::write(
            desktop_dir.join("config.json"),
            serde_json::to_string_pretty(&config).unwrap(),
        )
        .unwrap();
    }

    fn registry_for(home: &TempDir) -> ActionRegistry {
        ActionRegistry::new(Config {
            install_home: Some(home.path().to_path_buf()),
            ..Config::default()
        })
    }

    #[test]
    fn test_lists_registered_packages_in_order() {
        let home = TempDir::new().unwrap();
        let packages_dir = TempDir::new().unwrap();
        let sheets = write_package(&packages_dir, "Google Sheets", r#"{"openapi": "3.0.0"}"#);
        let mail = write_package(&packages_dir, "Mail", r#"{"openapi": "3.1.0"}"#);
        write_registry(
            &home,
            &[
                ("Google Sheets", sheets.as_path(), 8806),
                ("Mail", mail.as_path(), 8807),
            ],
        );

        let listing = registry_for(&home)
            .list_actions(&InternalActionPackages::default())
            .unwrap();

        assert_eq!(listing.actions.len(), 2);
        assert_eq!(listing.actions[0].name, "Google Sheets");
        assert_eq!(listing.actions[0].port, 8806);
        assert_eq!(listing.actions[0].api_spec["openapi"], "3.0.0");
        assert_eq!(listing.actions[1].name, "Mail");
    }

    #[test]
    fn test_excludes_by_exact_name_only() {
        let home = TempDir::new().unwrap();
        let packages_dir = TempDir::new().unwrap();
        let sheets = write_package(&packages_dir, "Google Sheets", "{}");
        let monitor = write_package(&packages_dir, "Thread Monitor", "{}");
        write_registry(
            &home,
            &[
                ("Google Sheets", sheets.as_path(), 8806),
                ("Thread Monitor", monitor.as_path(), 8808),
            ],
        );

        let exclude = InternalActionPackages::new(vec!["Thread Monitor".to_string()]);
        let listing = registry_for(&home).list_actions(&exclude).unwrap();

        assert_eq!(listing.actions.len(), 1);
        assert_eq!(listing.actions[0].name, "Google Sheets");
    }

    #[test]
    fn test_internal_names_are_not_implicitly_excluded() {
        // "Thread Monitor" is on the well-known internal list, but only an
        // explicit exclusion hides it
        let home = TempDir::new().unwrap();
        let packages_dir = TempDir::new().unwrap();
        let monitor = write_package(&packages_dir, "Thread Monitor", "{}");
        write_registry(&home, &[("Thread Monitor", monitor.as_path(), 8808)]);

        let listing = registry_for(&home)
            .list_actions(&InternalActionPackages::default())
            .unwrap();
        assert_eq!(listing.actions.len(), 1);
    }

    #[test]
    fn test_missing_install_home_is_configuration_error() {
        let registry = ActionRegistry::new(Config::default());
        let err = registry
            .list_actions(&InternalActionPackages::default())
            .unwrap_err();
        assert!(matches!(err, BridgeError::Configuration { .. }));
    }

    #[test]
    fn test_missing_registry_file_is_not_found() {
        let home = TempDir::new().unwrap();
        let err = registry_for(&home)
            .list_actions(&InternalActionPackages::default())
            .unwrap_err();
        assert!(matches!(err, BridgeError::NotFound { .. }));
    }

    #[test]
    fn test_malformed_registry_is_parse_error() {
        let home = TempDir::new().unwrap();
        let desktop_dir = home.path().join("sema4ai-desktop");
        fs::create_dir_all(&desktop_dir).unwrap();
        fs::write(desktop_dir.join("config.json"), "not json").unwrap();

        let err = registry_for(&home)
            .list_actions(&InternalActionPackages::default())
            .unwrap_err();
        assert!(matches!(err, BridgeError::Parse { .. }));
    }

    #[test]
    fn test_bad_metadata_fails_even_for_excluded_package() {
        let home = TempDir::new().unwrap();
        let packages_dir = TempDir::new().unwrap();
        let broken_dir = packages_dir.path().join("broken");
        fs::create_dir_all(&broken_dir).unwrap();
        // No metadata.json inside
        write_registry(&home, &[("Broken Package", broken_dir.as_path(), 8809)]);

        let exclude = InternalActionPackages::new(vec!["Broken Package".to_string()]);
        let err = registry_for(&home).list_actions(&exclude).unwrap_err();
        assert!(matches!(err, BridgeError::NotFound { .. }));
    }

    #[test]
    fn test_malformed_metadata_fails_whole_listing() {
        let home = TempDir::new().unwrap();
        let packages_dir = TempDir::new().unwrap();
        let good = write_package(&packages_dir, "Good", "{}");
        let bad = write_package(&packages_dir, "Bad", "{broken");
        write_registry(
            &home,
            &[("Good", good.as_path(), 8810), ("Bad", bad.as_path(), 8811)],
        );

        let err = registry_for(&home)
            .list_actions(&InternalActionPackages::default())
            .unwrap_err();
        assert!(matches!(err, BridgeError::Parse { .. }));
    }
}
