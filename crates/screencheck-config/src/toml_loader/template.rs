//! Default TOML config template with inline documentation comments.

pub(crate) fn default_config_toml() -> &'static str {
    r##"# screencheck configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[capture]
# frame_rate_ideal = 30      # 1-120
# event_capacity = 64        # 1-4096

[classification]
# A permission refusal whose message contains one of these words
# (case-insensitive) is reported as "cancelled" instead of "denied".
# permission_cancel_keywords = ["cancel"]

[logging]
# level = "info"             # trace, debug, info, warn, error
"##
}
