use crate::Command;
use crate::models::{Handle, Output, Window, WindowHandle, XyhwChange};
use crate::utils::modmask_lookup::{Button, ModMask};

/// What a client asks for with `_NET_WM_STATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateRequest {
    Remove,
    Add,
    Toggle,
}

#[allow(clippy::large_enum_variant)]
#[derive(Debug)]
pub enum DisplayEvent<H: Handle> {
    /// The pointer entered a window at these root coordinates.
    Movement(WindowHandle<H>, i32, i32),
    /// A grabbed key chord was pressed. The key is its keysym name.
    KeyCombo(ModMask, String),
    MouseCombo(ModMask, Button, WindowHandle<H>, i32, i32),
    /// Pointer motion in root coordinates.
    MouseMotion(i32, i32),
    MouseRelease(Button, i32, i32),
    WindowCreate(Window<H>, i32, i32),
    WindowDestroy(WindowHandle<H>),
    WindowTakeFocus(WindowHandle<H>),
    ConfigureRequest(WindowHandle<H>, XyhwChange),
    FullscreenRequest(WindowHandle<H>, StateRequest),
    ActivateRequest(WindowHandle<H>),
    OutputsChanged(Vec<Output>),
    SendCommand(Command),
}
