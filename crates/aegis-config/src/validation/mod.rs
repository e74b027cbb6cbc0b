//! Full configuration validation.
//!
//! Each section has its own submodule; this orchestrator calls them all and
//! collects errors into a single `ConfigError`.

mod bridge;
mod capabilities;
mod helpers;
mod window;


use crate::schema::AegisConfig;
use aegis_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AegisConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    window::validate_window(&mut errors, config);
    capabilities::validate_capabilities(&mut errors, config);
    bridge::validate_bridge(&mut errors, config);

    if config.app.main.trim().is_empty() {
        errors.push("app.main must not be empty".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
