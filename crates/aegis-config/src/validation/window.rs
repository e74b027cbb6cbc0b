use crate::schema::AegisConfig;

use super::helpers::validate_range;

/// Validate window dimensions.
pub(crate) fn validate_window(errors: &mut Vec<String>, config: &AegisConfig) {
    validate_range(errors, "window.width", config.window.width, 100, 16384);
    validate_range(errors, "window.height", config.window.height, 100, 16384);
}
