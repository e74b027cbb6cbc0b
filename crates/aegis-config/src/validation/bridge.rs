use crate::schema::AegisConfig;

use super::helpers::{validate_range, validate_range_u64};

/// Validate worker pool and queue sizing.
pub(crate) fn validate_bridge(errors: &mut Vec<String>, config: &AegisConfig) {
    validate_range(errors, "bridge.max_workers", config.bridge.max_workers, 1, 64);
    validate_range(
        errors,
        "bridge.queue_capacity",
        config.bridge.queue_capacity,
        1,
        65536,
    );
    validate_range_u64(
        errors,
        "bridge.download_timeout_secs",
        config.bridge.download_timeout_secs,
        1,
        3600,
    );
    if config.bridge.user_agent.trim().is_empty() {
        errors.push("bridge.user_agent must not be empty".into());
    }
}
