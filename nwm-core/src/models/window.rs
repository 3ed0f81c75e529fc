//! Window Information
#![allow(clippy::module_name_repetitions)]

use std::fmt::Debug;
use std::hash::Hash;

use super::{MonitorId, WindowType, WorkspaceId, Xyhw};

/// A trait which backend specific window handles need to implement
pub trait Handle: Debug + Clone + Copy + PartialEq + Eq + Hash + Default + Send + 'static {}

/// A Backend-agnostic handle to a window used to identify it.
///
/// Focus is tracked by handle value, so a handle stays valid across any reordering of the
/// window lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle<H>(pub H)
where
    H: Handle;

/// Handle for testing purposes
#[cfg(test)]
pub type MockHandle = i32;
#[cfg(test)]
impl Handle for MockHandle {}

/// What a window looked like before it went fullscreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavedGeometry {
    pub geometry: Xyhw,
    pub floating: bool,
    pub border: i32,
}

/// Store Window information.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq)]
pub struct Window<H: Handle> {
    pub handle: WindowHandle<H>,
    pub transient: Option<WindowHandle<H>>,
    pub r#type: WindowType,
    pub name: Option<String>,
    pub never_focus: bool,
    /// The client's size hints pin its minimum and maximum size to the same value.
    pub fixed_size: bool,
    pub workspace: WorkspaceId,
    pub monitor: MonitorId,
    pub geometry: Xyhw,
    pub border: i32,
    floating: bool,
    fullscreen: bool,
    saved: Option<SavedGeometry>,
    visible: bool,
}

impl<H: Handle> Window<H> {
    #[must_use]
    pub fn new(h: WindowHandle<H>, name: Option<String>) -> Self {
        Self {
            handle: h,
            transient: None,
            r#type: WindowType::Normal,
            name,
            never_focus: false,
            fixed_size: false,
            workspace: 0,
            monitor: 0,
            geometry: Xyhw::default(),
            border: 0,
            floating: false,
            fullscreen: false,
            saved: None,
            visible: false,
        }
    }

    #[must_use]
    pub const fn is_floating(&self) -> bool {
        self.floating
    }

    #[must_use]
    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Tiled windows are the only ones the layouts place.
    #[must_use]
    pub const fn is_tiled(&self) -> bool {
        !self.floating && !self.fullscreen
    }

    pub fn set_floating(&mut self, value: bool) {
        self.floating = value;
    }

    /// Covers `monitor` with no border, remembering the current geometry.
    pub fn enter_fullscreen(&mut self, monitor: Xyhw) {
        if self.fullscreen {
            return;
        }
        self.saved = Some(SavedGeometry {
            geometry: self.geometry,
            floating: self.floating,
            border: self.border,
        });
        self.fullscreen = true;
        self.geometry = monitor;
        self.border = 0;
    }

    /// Puts back exactly what `enter_fullscreen` saved.
    pub fn exit_fullscreen(&mut self) {
        if !self.fullscreen {
            return;
        }
        self.fullscreen = false;
        if let Some(saved) = self.saved.take() {
            self.geometry = saved.geometry;
            self.floating = saved.floating;
            self.border = saved.border;
        }
    }

    #[must_use]
    pub const fn saved_geometry(&self) -> Option<&SavedGeometry> {
        self.saved.as_ref()
    }

    pub fn set_visible(&mut self, value: bool) {
        self.visible = value;
    }

    #[must_use]
    pub const fn visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub const fn x(&self) -> i32 {
        self.geometry.x
    }

    #[must_use]
    pub const fn y(&self) -> i32 {
        self.geometry.y
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.geometry.w.max(1)
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.geometry.h.max(1)
    }

    #[must_use]
    pub const fn border(&self) -> i32 {
        self.border
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fullscreen_round_trip_restores_the_saved_tuple() {
        let mut window: Window<MockHandle> = Window::new(WindowHandle(1), None);
        window.geometry = Xyhw::new(30, 40, 500, 300);
        window.border = 3;
        window.set_floating(true);

        window.enter_fullscreen(Xyhw::new(0, 0, 1920, 1080));
        assert!(window.is_fullscreen());
        assert!(!window.is_tiled());
        assert_eq!(window.geometry, Xyhw::new(0, 0, 1920, 1080));
        assert_eq!(window.border, 0);

        window.exit_fullscreen();
        assert!(!window.is_fullscreen());
        assert!(window.is_floating());
        assert_eq!(window.geometry, Xyhw::new(30, 40, 500, 300));
        assert_eq!(window.border, 3);
        assert!(window.saved_geometry().is_none());
    }

    #[test]
    fn entering_fullscreen_twice_keeps_the_first_snapshot() {
        let mut window: Window<MockHandle> = Window::new(WindowHandle(1), None);
        window.geometry = Xyhw::new(10, 10, 100, 100);
        window.enter_fullscreen(Xyhw::new(0, 0, 800, 600));
        window.enter_fullscreen(Xyhw::new(0, 0, 1024, 768));
        window.exit_fullscreen();
        assert_eq!(window.geometry, Xyhw::new(10, 10, 100, 100));
    }
}
