//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use crate::schema::{NavigationTrigger, TetherConfig};
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_parse_error() {
    let result = load_from_path(Path::new("/tmp/nonexistent_tether_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, tether_common::ConfigError::ParseError(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[bridge]
namespace = "ShopBridge"

[navigation]
handled_triggers = ["user_click", "form_submission"]
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.bridge.namespace, "ShopBridge");
    assert_eq!(
        config.navigation.handled_triggers,
        vec![NavigationTrigger::UserClick, NavigationTrigger::FormSubmission]
    );
    // Defaults preserved
    assert_eq!(config.bridge.page_finished_handler, "pageFinished");
    assert!(config.navigation.fragment_is_history);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, tether_common::ConfigError::ParseError(_)));
}

#[test]
fn load_with_invalid_values_returns_parsed_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[bridge]\nnamespace = \"1bad\"\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.bridge.namespace, "1bad");
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tether").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.bridge.namespace, "NativeBridge");
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;

    let config: TetherConfig = toml::from_str(&default_config_toml()).unwrap();
    assert_eq!(config.bridge.namespace, "NativeBridge");
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn env_override_wins_over_config_dir() {
    use super::paths::resolve_config_path;
    use std::path::PathBuf;

    let dir = Some(PathBuf::from("/home/u/.config"));
    assert_eq!(
        resolve_config_path(Some("/etc/tether.toml".into()), dir.clone()).unwrap(),
        PathBuf::from("/etc/tether.toml")
    );
    assert_eq!(
        resolve_config_path(Some("".into()), dir.clone()).unwrap(),
        PathBuf::from("/home/u/.config/tether/config.toml")
    );
    assert_eq!(
        resolve_config_path(None, dir).unwrap(),
        PathBuf::from("/home/u/.config/tether/config.toml")
    );
    assert!(resolve_config_path(None, None).is_err());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("tether"));
        assert!(path_str.ends_with("config.toml"));
    }
}
