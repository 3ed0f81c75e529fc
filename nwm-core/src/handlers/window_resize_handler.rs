#![allow(clippy::wildcard_imports)]

use super::*;
use crate::layouts::LayoutMode;
use crate::models::Drag;
use crate::state::State;

impl<H: Handle> State<H> {
    /// Pointer motion while a window is being resized from its bottom right corner.
    pub fn window_resize_handler(&mut self, drag: &Drag<H>, x: i32, y: i32) -> bool {
        let Some(window) = self.find_window_mut(&drag.handle) else {
            return false;
        };
        window.geometry.w = (drag.origin.w + (x - drag.pointer.0)).max(1);
        window.geometry.h = (drag.origin.h + (y - drag.pointer.1)).max(1);
        true
    }

    /// Turns the final width of a resized master window into the monitor's master factor.
    /// Resizing any other tiled window changes nothing once it is retiled.
    pub(crate) fn resize_master_to(&mut self, handle: &WindowHandle<H>, width: i32) {
        let Some(monitor) = self.workspace().find(handle).map(|w| w.monitor) else {
            return;
        };
        if self.layout_of(monitor) != LayoutMode::MasterStack {
            return;
        }
        let (is_master, has_stack) = {
            let mut tiled = self.workspace().tiled_on(monitor);
            let is_master = tiled.next().is_some_and(|w| &w.handle == handle);
            (is_master, tiled.next().is_some())
        };
        if !is_master || !has_stack {
            return;
        }
        let area = self.tile_area(monitor);
        let g = area.gap;
        let b = area.border;
        let bbox_w = self.monitors[monitor].bbox.w;
        if bbox_w <= 0 {
            return;
        }
        let factor = (width + 2 * b + g + g / 2) as f32 / bbox_w as f32;
        tracing::debug!("Master factor from resize: {}", factor);
        self.monitors[monitor].set_master_factor(factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Output, TestManager, Xyhw};
    use crate::utils::modmask_lookup::{Button, ModMask};

    fn manager() -> TestManager {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.outputs_changed_handler(vec![Output::new("A", Xyhw::new(0, 0, 1920, 1080))]);
        manager.state.settings.gaps_enabled = true;
        manager.state.settings.gap_size = 6;
        manager.state.settings.border_width = 3;
        for handle in 1..=2 {
            manager.window_created_handler(Window::new(WindowHandle(handle), None), 0, 0);
        }
        manager.state.update_windows();
        manager
    }

    fn resize(manager: &mut TestManager, handle: i32, dx: i32) {
        manager.display_event_handler(DisplayEvent::MouseCombo(
            ModMask::Super,
            Button::Button3,
            WindowHandle(handle),
            500,
            500,
        ));
        manager.display_event_handler(DisplayEvent::MouseMotion(500 + dx, 500));
        manager.display_event_handler(DisplayEvent::MouseRelease(Button::Button3, 500 + dx, 500));
    }

    #[test]
    fn resizing_the_master_sets_the_factor_from_its_width() {
        let mut manager = manager();
        resize(&mut manager, 1, 192);
        assert!((manager.state.monitors[0].master_factor - 0.6).abs() < 0.001);
        manager.state.update_windows();
        let master = manager.state.find_window(&WindowHandle(1)).map(|w| w.geometry.w);
        assert_eq!(master, Some(945 + 192));
    }

    #[test]
    fn resizing_a_stack_window_changes_nothing() {
        let mut manager = manager();
        resize(&mut manager, 2, 192);
        assert!((manager.state.monitors[0].master_factor - 0.5).abs() < 0.001);
    }

    #[test]
    fn resizing_a_lone_master_changes_nothing() {
        let mut manager = manager();
        manager.state.remove_window(&WindowHandle(2));
        resize(&mut manager, 1, 192);
        assert!((manager.state.monitors[0].master_factor - 0.5).abs() < 0.001);
    }

    #[test]
    fn resizing_never_collapses_a_window() {
        let mut manager = manager();
        resize(&mut manager, 2, -5000);
        let width = manager.state.find_window(&WindowHandle(2)).map(|w| w.geometry.w);
        assert_eq!(width, Some(1));
    }
}
