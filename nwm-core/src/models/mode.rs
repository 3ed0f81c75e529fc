use super::{Handle, WindowHandle, Xyhw};
use crate::utils::modmask_lookup::Button;

/// Snapshot taken when a pointer grab starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Drag<H: Handle> {
    pub handle: WindowHandle<H>,
    pub button: Button,
    /// Root coordinates of the pointer at press time.
    pub pointer: (i32, i32),
    /// Geometry of the window at press time.
    pub origin: Xyhw,
}

/// The interaction state. Being an enum, moving and resizing can never both be active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode<H: Handle> {
    ResizingWindow(Drag<H>),
    MovingWindow(Drag<H>),
    #[default]
    Normal,
}

impl<H: Handle> Mode<H> {
    /// The window being moved or resized, if any.
    pub fn target(&self) -> Option<WindowHandle<H>> {
        match self {
            Self::ResizingWindow(drag) | Self::MovingWindow(drag) => Some(drag.handle),
            Self::Normal => None,
        }
    }
}
