use serde::{Deserialize, Serialize};

/// Every built-in native capability the bridge exposes to page script.
///
/// Incoming action names are resolved to this enum once, so dispatch is an
/// exhaustive `match` rather than a string lookup. Application-defined
/// actions live in the registry under free-form names and never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    // -- Filesystem --
    Read,
    Write,
    Exists,
    Mkdir,
    Remove,
    Copy,
    Move,

    // -- Environment / process --
    Env,
    Run,

    // -- Long-running --
    RunAsync,
    Download,
    CopyAsync,
    Cancel,

    // -- Dialogs --
    DialogOpen,
    DialogSave,
    DialogMessage,

    // -- App --
    AppQuit,
    AppMinimize,
    AppMaximize,
    AppGetPath,

    // -- Window --
    WindowStartDrag,
    WindowResize,
    WindowSetSize,
    WindowGetSize,
    WindowSetPosition,
    WindowGetPosition,
}
