//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Aegis Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[app]
name = "Aegis App"
title = "Aegis App"
# version = "1.0.0"
main = "index.html"

[window]
# width = 1200           # 100-16384
# height = 800           # 100-16384
# resizable = true
# frame = true           # false = frameless, drag via window.startDrag
# devtools = false
# context_menu = true

[capabilities]
# Actions page script may call. Entries are action names ("dialog.open"),
# namespaces ("dialog" allows every dialog.* action) or "*".
# An empty list allows everything -- list only what the app needs.
# Set default_open = false to make an empty list deny everything instead.
allow = [
    "read",
    "write",
    "exists",
    "mkdir",
    "dialog",
    "app",
    "window",
]
# default_open = true
# allow_remote_content = false

[bridge]
# max_workers = 4              # concurrent async actions, 1-64
# queue_capacity = 256         # pending responses, 1-65536
# download_timeout_secs = 30   # 1-3600
"##
    .to_string()
}
