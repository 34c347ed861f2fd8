//! Navigation section validation: history triggers are never pushed, and
//! the pushed and history trigger sets must be disjoint.

use crate::schema::{NavigationTrigger, TetherConfig};

pub(crate) fn validate_navigation(errors: &mut Vec<String>, config: &TetherConfig) {
    let nav = &config.navigation;
    for trigger in &nav.handled_triggers {
        if matches!(
            trigger,
            NavigationTrigger::HistoryPush | NavigationTrigger::HistoryPop
        ) {
            errors.push(format!(
                "navigation.handled_triggers may not contain history trigger {trigger:?}"
            ));
        } else if nav.history_triggers.contains(trigger) {
            errors.push(format!(
                "navigation trigger {trigger:?} is listed in both handled_triggers and history_triggers"
            ));
        }
    }
}
