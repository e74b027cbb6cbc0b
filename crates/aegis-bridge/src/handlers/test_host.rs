use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use aegis_common::{HostError, WindowEdge};

use crate::host::{MessageDialog, OpenDialog, SaveDialog, WindowHost};

/// In-memory window that records what it was asked to do.
pub(crate) struct RecordingHost {
    open_result: Mutex<Option<Vec<PathBuf>>>,
    last_open: Mutex<Option<OpenDialog>>,
    last_message: Mutex<Option<MessageDialog>>,
    size: Mutex<(u32, u32)>,
    position: Mutex<(i32, i32)>,
    resizes: Mutex<Vec<WindowEdge>>,
    maximized: AtomicBool,
    quit: AtomicBool,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            open_result: Mutex::new(Some(vec![PathBuf::from("/picked.txt")])),
            last_open: Mutex::new(None),
            last_message: Mutex::new(None),
            size: Mutex::new((800, 600)),
            position: Mutex::new((0, 0)),
            resizes: Mutex::new(Vec::new()),
            maximized: AtomicBool::new(false),
            quit: AtomicBool::new(false),
        }
    }
}

impl RecordingHost {
    pub fn set_open_result(&self, result: Option<Vec<PathBuf>>) {
        *self.open_result.lock().unwrap() = result;
    }

    pub fn last_open(&self) -> Option<OpenDialog> {
        self.last_open.lock().unwrap().clone()
    }

    pub fn last_message(&self) -> Option<MessageDialog> {
        self.last_message.lock().unwrap().clone()
    }

    pub fn resizes(&self) -> Vec<WindowEdge> {
        self.resizes.lock().unwrap().clone()
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized.load(Ordering::SeqCst)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::SeqCst)
    }
}

impl WindowHost for RecordingHost {
    fn open_dialog(&self, opts: &OpenDialog) -> Result<Option<Vec<PathBuf>>, HostError> {
        *self.last_open.lock().unwrap() = Some(opts.clone());
        Ok(self.open_result.lock().unwrap().clone())
    }

    fn save_dialog(&self, opts: &SaveDialog) -> Result<Option<PathBuf>, HostError> {
        Ok(Some(PathBuf::from("/saved").join(&opts.default_name)))
    }

    fn message_dialog(&self, opts: &MessageDialog) -> Result<bool, HostError> {
        *self.last_message.lock().unwrap() = Some(opts.clone());
        Ok(true)
    }

    fn quit(&self) {
        self.quit.store(true, Ordering::SeqCst);
    }

    fn minimize(&self) -> Result<(), HostError> {
        Ok(())
    }

    fn toggle_maximize(&self) -> Result<(), HostError> {
        self.maximized.fetch_xor(true, Ordering::SeqCst);
        Ok(())
    }

    fn start_drag(&self) -> Result<(), HostError> {
        Ok(())
    }

    fn start_resize(&self, edge: WindowEdge) -> Result<(), HostError> {
        self.resizes.lock().unwrap().push(edge);
        Ok(())
    }

    fn set_size(&self, width: u32, height: u32) -> Result<(), HostError> {
        *self.size.lock().unwrap() = (width, height);
        Ok(())
    }

    fn size(&self) -> Result<(u32, u32), HostError> {
        Ok(*self.size.lock().unwrap())
    }

    fn set_position(&self, x: i32, y: i32) -> Result<(), HostError> {
        *self.position.lock().unwrap() = (x, y);
        Ok(())
    }

    fn position(&self) -> Result<(i32, i32), HostError> {
        Ok(*self.position.lock().unwrap())
    }
}
