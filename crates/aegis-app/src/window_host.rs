//! `WindowHost` backed by the winit window and `rfd` dialogs.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use aegis_bridge::host::{
    DialogFilter, MessageButtons, MessageDialog, MessageKind, OpenDialog, SaveDialog, WindowHost,
};
use aegis_common::{HostError, WindowEdge};
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::window::{ResizeDirection, Window};

pub struct WinitHost {
    window: Arc<Window>,
    quit: AtomicBool,
}

impl WinitHost {
    pub fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            quit: AtomicBool::new(false),
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::SeqCst)
    }

    fn file_dialog(&self, title: &str, filters: &[DialogFilter]) -> rfd::FileDialog {
        let mut dialog = rfd::FileDialog::new().set_parent(self.window.as_ref());
        if !title.is_empty() {
            dialog = dialog.set_title(title);
        }
        for filter in filters {
            dialog = dialog.add_filter(&filter.name, filter.extensions.as_slice());
        }
        dialog
    }
}

impl WindowHost for WinitHost {
    fn open_dialog(&self, opts: &OpenDialog) -> Result<Option<Vec<PathBuf>>, HostError> {
        let dialog = self.file_dialog(&opts.title, &opts.filters);
        let picked = match (opts.directory, opts.multiple) {
            (true, true) => dialog.pick_folders(),
            (true, false) => dialog.pick_folder().map(|p| vec![p]),
            (false, true) => dialog.pick_files(),
            (false, false) => dialog.pick_file().map(|p| vec![p]),
        };
        Ok(picked)
    }

    fn save_dialog(&self, opts: &SaveDialog) -> Result<Option<PathBuf>, HostError> {
        let mut dialog = self.file_dialog(&opts.title, &opts.filters);
        if !opts.default_name.is_empty() {
            dialog = dialog.set_file_name(&opts.default_name);
        }
        Ok(dialog.save_file())
    }

    fn message_dialog(&self, opts: &MessageDialog) -> Result<bool, HostError> {
        let result = rfd::MessageDialog::new()
            .set_parent(self.window.as_ref())
            .set_title(&opts.title)
            .set_description(&opts.message)
            .set_level(message_level(opts.kind))
            .set_buttons(message_buttons(opts.buttons))
            .show();
        Ok(matches!(
            result,
            rfd::MessageDialogResult::Ok | rfd::MessageDialogResult::Yes
        ))
    }

    fn quit(&self) {
        tracing::info!("Quit requested by page");
        self.quit.store(true, Ordering::SeqCst);
    }

    fn minimize(&self) -> Result<(), HostError> {
        self.window.set_minimized(true);
        Ok(())
    }

    fn toggle_maximize(&self) -> Result<(), HostError> {
        self.window.set_maximized(!self.window.is_maximized());
        Ok(())
    }

    fn start_drag(&self) -> Result<(), HostError> {
        self.window
            .drag_window()
            .map_err(|e| HostError::Window(e.to_string()))
    }

    fn start_resize(&self, edge: WindowEdge) -> Result<(), HostError> {
        self.window
            .drag_resize_window(resize_direction(edge))
            .map_err(|e| HostError::Window(e.to_string()))
    }

    fn set_size(&self, width: u32, height: u32) -> Result<(), HostError> {
        let _ = self
            .window
            .request_inner_size(LogicalSize::new(width, height));
        Ok(())
    }

    fn size(&self) -> Result<(u32, u32), HostError> {
        let size: LogicalSize<u32> = self
            .window
            .inner_size()
            .to_logical(self.window.scale_factor());
        Ok((size.width, size.height))
    }

    fn set_position(&self, x: i32, y: i32) -> Result<(), HostError> {
        self.window.set_outer_position(LogicalPosition::new(x, y));
        Ok(())
    }

    fn position(&self) -> Result<(i32, i32), HostError> {
        let pos: LogicalPosition<i32> = self
            .window
            .outer_position()
            .map_err(|e| HostError::NotSupported(e.to_string()))?
            .to_logical(self.window.scale_factor());
        Ok((pos.x, pos.y))
    }
}

fn resize_direction(edge: WindowEdge) -> ResizeDirection {
    match edge {
        WindowEdge::N => ResizeDirection::North,
        WindowEdge::S => ResizeDirection::South,
        WindowEdge::E => ResizeDirection::East,
        WindowEdge::W => ResizeDirection::West,
        WindowEdge::Ne => ResizeDirection::NorthEast,
        WindowEdge::Nw => ResizeDirection::NorthWest,
        WindowEdge::Se => ResizeDirection::SouthEast,
        WindowEdge::Sw => ResizeDirection::SouthWest,
    }
}

fn message_level(kind: MessageKind) -> rfd::MessageLevel {
    match kind {
        MessageKind::Info | MessageKind::Question => rfd::MessageLevel::Info,
        MessageKind::Warning => rfd::MessageLevel::Warning,
        MessageKind::Error => rfd::MessageLevel::Error,
    }
}

fn message_buttons(buttons: MessageButtons) -> rfd::MessageButtons {
    match buttons {
        MessageButtons::Ok => rfd::MessageButtons::Ok,
        MessageButtons::OkCancel => rfd::MessageButtons::OkCancel,
        MessageButtons::YesNo => rfd::MessageButtons::YesNo,
    }
}
