use super::Action;

const ALL: &[Action] = &[
    Action::Read,
    Action::Write,
    Action::Exists,
    Action::Mkdir,
    Action::Remove,
    Action::Copy,
    Action::Move,
    Action::Env,
    Action::Run,
    Action::RunAsync,
    Action::Download,
    Action::CopyAsync,
    Action::Cancel,
    Action::DialogOpen,
    Action::DialogSave,
    Action::DialogMessage,
    Action::AppQuit,
    Action::AppMinimize,
    Action::AppMaximize,
    Action::AppGetPath,
    Action::WindowStartDrag,
    Action::WindowResize,
    Action::WindowSetSize,
    Action::WindowGetSize,
    Action::WindowSetPosition,
    Action::WindowGetPosition,
];

impl Action {
    /// Wire name used by page script.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Read => "read",
            Action::Write => "write",
            Action::Exists => "exists",
            Action::Mkdir => "mkdir",
            Action::Remove => "remove",
            Action::Copy => "copy",
            Action::Move => "move",
            Action::Env => "env",
            Action::Run => "run",
            Action::RunAsync => "run.async",
            Action::Download => "download",
            Action::CopyAsync => "copy.async",
            Action::Cancel => "cancel",
            Action::DialogOpen => "dialog.open",
            Action::DialogSave => "dialog.save",
            Action::DialogMessage => "dialog.message",
            Action::AppQuit => "app.quit",
            Action::AppMinimize => "app.minimize",
            Action::AppMaximize => "app.maximize",
            Action::AppGetPath => "app.getPath",
            Action::WindowStartDrag => "window.startDrag",
            Action::WindowResize => "window.resize",
            Action::WindowSetSize => "window.setSize",
            Action::WindowGetSize => "window.getSize",
            Action::WindowSetPosition => "window.setPosition",
            Action::WindowGetPosition => "window.getPosition",
        }
    }

    /// Resolve a wire name to a built-in action.
    pub fn from_name(name: &str) -> Option<Action> {
        ALL.iter().copied().find(|a| a.name() == name)
    }

    /// All built-in actions.
    pub fn all() -> &'static [Action] {
        ALL
    }

    /// Actions executed on the worker pool with progress events.
    pub fn is_async(&self) -> bool {
        matches!(self, Action::RunAsync | Action::Download | Action::CopyAsync)
    }

    /// Actions that execute arbitrary commands on the host.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Action::Run | Action::RunAsync)
    }

    /// Segment before the first `.`, or the whole name.
    pub fn namespace(&self) -> &'static str {
        let name = self.name();
        name.split('.').next().unwrap_or(name)
    }
}
