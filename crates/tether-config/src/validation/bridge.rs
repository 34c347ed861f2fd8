//! Bridge section validation.

use crate::schema::TetherConfig;

use super::helpers::validate_identifier;

pub(crate) fn validate_bridge(errors: &mut Vec<String>, config: &TetherConfig) {
    validate_identifier(errors, "bridge.namespace", &config.bridge.namespace);
    validate_identifier(
        errors,
        "bridge.page_finished_handler",
        &config.bridge.page_finished_handler,
    );

    if let Some(ua) = &config.bridge.user_agent {
        if ua.trim().is_empty() {
            errors.push("bridge.user_agent must not be blank when set".into());
        }
    }
}
