//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Tether Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[bridge]
# namespace = "NativeBridge"          # script global holding every capability
# page_finished_handler = "pageFinished"
# user_agent = "MyApp/1.0"

[navigation]
# Full-load triggers pushed as a new page instead of loading in place.
# user_click, form_submission, back_forward, reload, programmatic
# handled_triggers = ["user_click"]
# Triggers that move within the page's own history (script context is kept).
# history_triggers = ["history_push", "history_pop"]
# fragment_is_history = true

[share]
# default_item_order = "message_first"  # message_first, url_first

[logging]
# level = "INFO"                        # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
