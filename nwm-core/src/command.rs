use crate::models::{MonitorId, WorkspaceId};
use serde::{Deserialize, Serialize};

/// Everything a keybinding or a client request can ask the manager to do.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub enum Command {
    Execute(String),
    CloseWindow,
    FocusNext,
    FocusPrev,
    SwapNext,
    SwapPrev,
    /// Grow (positive) or shrink (negative) the master column by this many pixels.
    ResizeMaster(i32),
    ScrollLeft,
    ScrollRight,
    ToggleLayout,
    ToggleGap,
    ToggleBar,
    ToggleFloat,
    ToggleFullscreen,
    ToggleScrollMaximize,
    SwitchWorkspace(WorkspaceId),
    MoveToWorkspace(WorkspaceId),
    FocusMonitor(MonitorId),
    SetScrollVisible(i32),
    IncrementScrollVisible,
    DecrementScrollVisible,
    Quit {
        restart: bool,
    },
}
