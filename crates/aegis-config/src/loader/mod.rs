//! Config file loading and creation.

mod file;
mod paths;
mod template;


pub use file::load_from_path;
pub use paths::{create_default_config, find_config_file, CONFIG_FILE_NAME, LEGACY_CONFIG_FILE_NAME};
