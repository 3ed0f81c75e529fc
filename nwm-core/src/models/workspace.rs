use super::{Handle, Window, WindowHandle, WorkspaceId};
use crate::layouts::LayoutMode;
use std::fmt;

/// One of the fixed set of virtual desktops. The order of `windows` is the tiling order.
#[derive(Clone)]
pub struct Workspace<H: Handle> {
    pub id: WorkspaceId,
    pub label: String,
    pub windows: Vec<Window<H>>,
    pub focused: Option<WindowHandle<H>>,
    /// Pixel offset of the horizontal-scroll row.
    pub scroll_offset: i32,
    pub scroll_maximized: bool,
    /// Layout last chosen while this workspace was shown.
    pub layout: LayoutMode,
}

impl<H: Handle> fmt::Debug for Workspace<H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Workspace {{ id: {}, label: {}, windows: {}, focused: {:?} }}",
            self.id,
            self.label,
            self.windows.len(),
            self.focused
        )
    }
}

impl<H: Handle> Workspace<H> {
    #[must_use]
    pub fn new(id: WorkspaceId, label: String) -> Self {
        Self {
            id,
            label,
            windows: vec![],
            focused: None,
            scroll_offset: 0,
            scroll_maximized: false,
            layout: LayoutMode::default(),
        }
    }

    #[must_use]
    pub fn position(&self, handle: &WindowHandle<H>) -> Option<usize> {
        self.windows.iter().position(|w| &w.handle == handle)
    }

    #[must_use]
    pub fn contains(&self, handle: &WindowHandle<H>) -> bool {
        self.position(handle).is_some()
    }

    #[must_use]
    pub fn find(&self, handle: &WindowHandle<H>) -> Option<&Window<H>> {
        self.windows.iter().find(|w| &w.handle == handle)
    }

    pub fn find_mut(&mut self, handle: &WindowHandle<H>) -> Option<&mut Window<H>> {
        self.windows.iter_mut().find(|w| &w.handle == handle)
    }

    #[must_use]
    pub fn focused_window(&self) -> Option<&Window<H>> {
        self.focused.as_ref().and_then(|h| self.find(h))
    }

    /// Handles of the tiled windows on `monitor`, in tiling order.
    pub fn tiled_on(&self, monitor: usize) -> impl Iterator<Item = &Window<H>> {
        self.windows
            .iter()
            .filter(move |w| w.monitor == monitor && w.is_tiled())
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        !self.windows.is_empty()
    }
}
