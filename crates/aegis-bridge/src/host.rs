//! Collaborators the bridge calls back into: the native window with its
//! dialogs, and the UI loop waker.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use aegis_common::{HostError, WindowEdge};

/// One entry of a file dialog filter, e.g. `Images: png, jpg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenDialog {
    pub title: String,
    pub directory: bool,
    pub multiple: bool,
    pub filters: Vec<DialogFilter>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveDialog {
    pub title: String,
    pub default_name: String,
    pub filters: Vec<DialogFilter>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageKind {
    #[default]
    Info,
    Warning,
    Error,
    Question,
}

impl MessageKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "warning" => Self::Warning,
            "error" => Self::Error,
            "question" => Self::Question,
            _ => Self::Info,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MessageButtons {
    #[default]
    Ok,
    OkCancel,
    YesNo,
}

impl MessageButtons {
    pub fn parse(s: &str) -> Self {
        match s {
            "okcancel" => Self::OkCancel,
            "yesno" => Self::YesNo,
            _ => Self::Ok,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageDialog {
    pub title: String,
    pub message: String,
    pub kind: MessageKind,
    pub buttons: MessageButtons,
}

/// Native window and dialog operations.
///
/// Every method is invoked on the UI thread from a synchronous handler.
pub trait WindowHost: Send + Sync {
    /// `None` when the user cancelled the dialog.
    fn open_dialog(&self, opts: &OpenDialog) -> Result<Option<Vec<PathBuf>>, HostError>;
    fn save_dialog(&self, opts: &SaveDialog) -> Result<Option<PathBuf>, HostError>;
    /// `true` when the user confirmed (OK or Yes).
    fn message_dialog(&self, opts: &MessageDialog) -> Result<bool, HostError>;

    /// Ask the UI loop to exit after the current iteration.
    fn quit(&self);
    fn minimize(&self) -> Result<(), HostError>;
    fn toggle_maximize(&self) -> Result<(), HostError>;
    fn start_drag(&self) -> Result<(), HostError>;
    fn start_resize(&self, edge: WindowEdge) -> Result<(), HostError>;

    fn set_size(&self, width: u32, height: u32) -> Result<(), HostError>;
    fn size(&self) -> Result<(u32, u32), HostError>;
    fn set_position(&self, x: i32, y: i32) -> Result<(), HostError>;
    fn position(&self) -> Result<(i32, i32), HostError>;
}

/// Host with no window: window and dialog actions fail with
/// [`HostError::NoWindow`]; `quit` only records the request.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    quit_requested: AtomicBool,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested.load(Ordering::SeqCst)
    }
}

impl WindowHost for HeadlessHost {
    fn open_dialog(&self, _opts: &OpenDialog) -> Result<Option<Vec<PathBuf>>, HostError> {
        Err(HostError::NoWindow)
    }

    fn save_dialog(&self, _opts: &SaveDialog) -> Result<Option<PathBuf>, HostError> {
        Err(HostError::NoWindow)
    }

    fn message_dialog(&self, _opts: &MessageDialog) -> Result<bool, HostError> {
        Err(HostError::NoWindow)
    }

    fn quit(&self) {
        self.quit_requested.store(true, Ordering::SeqCst);
    }

    fn minimize(&self) -> Result<(), HostError> {
        Err(HostError::NoWindow)
    }

    fn toggle_maximize(&self) -> Result<(), HostError> {
        Err(HostError::NoWindow)
    }

    fn start_drag(&self) -> Result<(), HostError> {
        Err(HostError::NoWindow)
    }

    fn start_resize(&self, _edge: WindowEdge) -> Result<(), HostError> {
        Err(HostError::NoWindow)
    }

    fn set_size(&self, _width: u32, _height: u32) -> Result<(), HostError> {
        Err(HostError::NoWindow)
    }

    fn size(&self) -> Result<(u32, u32), HostError> {
        Err(HostError::NoWindow)
    }

    fn set_position(&self, _x: i32, _y: i32) -> Result<(), HostError> {
        Err(HostError::NoWindow)
    }

    fn position(&self) -> Result<(i32, i32), HostError> {
        Err(HostError::NoWindow)
    }
}

/// Wakes the UI loop so it drains the response queue.
pub trait UiWaker: Send + Sync {
    fn wake(&self);
}

impl<F> UiWaker for F
where
    F: Fn() + Send + Sync,
{
    fn wake(&self) {
        self()
    }
}
