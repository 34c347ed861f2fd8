//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    let config = TetherConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_namespace_with_space() {
    let mut config = TetherConfig::default();
    config.bridge.namespace = "Native Bridge".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("bridge.namespace"));
}

#[test]
fn catches_namespace_starting_with_digit() {
    let mut config = TetherConfig::default();
    config.bridge.namespace = "9lives".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("bridge.namespace"));
}

#[test]
fn catches_bad_page_finished_handler() {
    let mut config = TetherConfig::default();
    config.bridge.page_finished_handler = "on-finish".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("bridge.page_finished_handler"));
}

#[test]
fn catches_blank_user_agent() {
    let mut config = TetherConfig::default();
    config.bridge.user_agent = Some("   ".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("bridge.user_agent"));
}

#[test]
fn catches_overlapping_trigger_sets() {
    let mut config = TetherConfig::default();
    config.navigation.handled_triggers.push(NavigationTrigger::HistoryPop);
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("HistoryPop"));
}

#[test]
fn catches_history_trigger_in_handled_triggers() {
    let mut config = TetherConfig::default();
    config.navigation.history_triggers = vec![NavigationTrigger::HistoryPop];
    config.navigation.handled_triggers =
        vec![NavigationTrigger::UserClick, NavigationTrigger::HistoryPush];
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("navigation.handled_triggers"));
    assert!(err.contains("HistoryPush"));
}

#[test]
fn overlap_outside_history_triggers_is_caught() {
    let mut config = TetherConfig::default();
    config.navigation.history_triggers.push(NavigationTrigger::Reload);
    config.navigation.handled_triggers.push(NavigationTrigger::Reload);
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("Reload"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = TetherConfig::default();
    config.bridge.namespace = "".into();
    config.bridge.page_finished_handler = "a.b".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("bridge.namespace"));
    assert!(err.contains("bridge.page_finished_handler"));
    assert!(err.contains("; "));
}

#[test]
fn identifier_accepts_dollar_and_underscore() {
    assert!(is_js_identifier("$bridge"));
    assert!(is_js_identifier("_private"));
    assert!(is_js_identifier("NativeBridge2"));
    assert!(!is_js_identifier(""));
    assert!(!is_js_identifier("window.bridge"));
}
