//! Built-in synchronous actions.

pub mod env;
pub mod fs;
pub mod paths;
pub mod process;
pub mod window;

#[cfg(test)]
pub(crate) mod test_host;

use std::path::PathBuf;
use std::sync::Arc;

use aegis_common::{Action, BridgeError, Payload};
use serde_json::Value;

use crate::host::WindowHost;
use crate::worker::CancelRegistry;

/// State shared by the built-in handlers.
pub struct Builtins {
    pub(crate) host: Arc<dyn WindowHost>,
    pub(crate) app_dir: PathBuf,
    pub(crate) cancels: CancelRegistry,
}

impl Builtins {
    pub fn new(host: Arc<dyn WindowHost>, app_dir: PathBuf, cancels: CancelRegistry) -> Self {
        Self {
            host,
            app_dir,
            cancels,
        }
    }

    /// Run a built-in action inline.
    pub fn call(&self, action: Action, payload: &Payload) -> Result<Value, BridgeError> {
        let host = self.host.as_ref();
        match action {
            Action::Read => fs::read(payload),
            Action::Write => fs::write(payload),
            Action::Exists => fs::exists(payload),
            Action::Mkdir => fs::mkdir(payload),
            Action::Remove => fs::remove(payload),
            Action::Copy => fs::copy(payload),
            Action::Move => fs::move_path(payload),
            Action::Env => env::env(payload),
            Action::Run => process::run(payload),
            Action::Cancel => self.cancels.cancel_from_payload(payload),
            Action::DialogOpen => window::dialog_open(host, payload),
            Action::DialogSave => window::dialog_save(host, payload),
            Action::DialogMessage => window::dialog_message(host, payload),
            Action::AppQuit => window::app_quit(host),
            Action::AppMinimize => window::app_minimize(host),
            Action::AppMaximize => window::app_maximize(host),
            Action::AppGetPath => paths::get_path(payload, &self.app_dir),
            Action::WindowStartDrag => window::start_drag(host),
            Action::WindowResize => window::start_resize(host, payload),
            Action::WindowSetSize => window::set_size(host, payload),
            Action::WindowGetSize => window::get_size(host),
            Action::WindowSetPosition => window::set_position(host, payload),
            Action::WindowGetPosition => window::get_position(host),
            Action::RunAsync | Action::Download | Action::CopyAsync => {
                Err(BridgeError::InvalidRequest(format!(
                    "'{}' runs asynchronously and needs a callbackId",
                    action.name()
                )))
            }
        }
    }
}
