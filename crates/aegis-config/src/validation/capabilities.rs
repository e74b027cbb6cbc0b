use std::sync::LazyLock;

use regex::Regex;

use crate::schema::AegisConfig;

/// `*`, a namespace, or a dotted action name such as `app.getPath`.
static CAPABILITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\*|[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)*)$").unwrap()
});

pub(crate) fn is_valid_capability(entry: &str) -> bool {
    CAPABILITY_RE.is_match(entry)
}

/// Validate the shape of every allow-list entry.
pub(crate) fn validate_capabilities(errors: &mut Vec<String>, config: &AegisConfig) {
    for entry in &config.capabilities.allow {
        if !is_valid_capability(entry) {
            errors.push(format!("capabilities.allow entry {entry:?} is not an action name"));
        }
    }
}
