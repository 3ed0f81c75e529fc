use crate::models::Handle;
use crate::models::Window;
use crate::models::WindowHandle;
use crate::models::WorkspaceId;
use crate::utils::modmask_lookup::Button;

/// These are responses from the Window manager.
/// The display server should act on these actions.
#[allow(clippy::large_enum_variant)]
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayAction<H: Handle> {
    /// Nicely ask a window if it would please close at its convenience.
    KillWindow(WindowHandle<H>),

    /// Get triggered after a new window is discovered and WE are
    /// managing it. The flag tells whether it floats.
    AddedWindow(WindowHandle<H>, bool),

    /// Map a window we decided not to manage and leave it alone.
    MapUnmanaged(WindowHandle<H>),

    /// Makes sure the mouse is over a given point.
    MoveMouseOverPoint((i32, i32)),

    /// Set or clear `_NET_WM_STATE_FULLSCREEN` on a window.
    SetFullscreen(WindowHandle<H>, bool),

    /// Sets the "z-index" order of the windows,
    /// first in the array is bottom most.
    SetWindowOrder(Vec<WindowHandle<H>>),

    /// Tell the DS we no longer care about the this window and other
    /// cleanup.
    DestroyedWindow(WindowHandle<H>),

    /// Tell a window that it is to become focused.
    WindowTakeFocus {
        window: Window<H>,
        previous_window: Option<Window<H>>,
    },

    /// Remove focus on any visible window by focusing the root window.
    Unfocus(Option<WindowHandle<H>>, bool),

    ReplayClick(WindowHandle<H>, Button),

    /// Tell the DM we are ready to resize this window.
    ReadyToResizeWindow(WindowHandle<H>),

    /// Tell the DM we are ready to move this window.
    ReadyToMoveWindow(WindowHandle<H>),

    /// Used to let the WM know of the current displayed workspace changes.
    SetCurrentWorkspace(WorkspaceId),

    /// Used to let the WM know of the workspace for a given window.
    SetWindowWorkspace(WindowHandle<H>, WorkspaceId),

    /// Tell the DM to return to normal mode if it is not (ie resize a
    /// window or moving a window).
    NormalMode,

    /// Configure a xlib window.
    ConfigureXlibWindow(Window<H>),
}
