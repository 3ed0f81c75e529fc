#![allow(clippy::wildcard_imports)]

use super::*;
use crate::display_action::DisplayAction;
use crate::layouts::{self, LayoutMode};
use crate::models::{Drag, MonitorId};
use crate::state::State;
use crate::utils::modmask_lookup::Button;

impl<H: Handle> State<H> {
    /// Pointer motion while a window is being dragged. The window follows the pointer directly.
    pub fn window_move_handler(&mut self, drag: &Drag<H>, x: i32, y: i32) -> bool {
        let Some(window) = self.find_window_mut(&drag.handle) else {
            return false;
        };
        window.geometry.x = drag.origin.x + (x - drag.pointer.0);
        window.geometry.y = drag.origin.y + (y - drag.pointer.1);
        true
    }

    /// The button of a move or resize went up. Ends the grab and settles the window.
    pub fn mouse_release_handler(&mut self, _button: Button, x: i32, y: i32) -> bool {
        let mode = std::mem::take(&mut self.mode);
        let (drag, moving) = match mode {
            Mode::MovingWindow(drag) => (drag, true),
            Mode::ResizingWindow(drag) => (drag, false),
            Mode::Normal => return false,
        };
        self.actions.push_back(DisplayAction::NormalMode);

        let Some(window) = self.workspace().find(&drag.handle) else {
            return true;
        };
        if window.is_fullscreen() {
            return true;
        }
        let tiled = window.is_tiled();
        let (cx, cy) = window.geometry.center();
        let width = window.geometry.w;

        match (moving, tiled) {
            (true, true) => self.drop_tiled(&drag.handle, x, y),
            (true, false) => {
                let monitor = self.monitor_at(cx, cy);
                if let Some(window) = self.find_window_mut(&drag.handle) {
                    window.monitor = monitor;
                }
            }
            (false, true) => self.resize_master_to(&drag.handle, width),
            (false, false) => {}
        }
        true
    }

    /// Moves a tiled window to the slot under the pointer, on the monitor under the pointer.
    fn drop_tiled(&mut self, handle: &WindowHandle<H>, x: i32, y: i32) {
        let monitor = self.monitor_at(x, y);
        let ws_id = self.active_workspace;
        let Some(index) = self.workspace().position(handle) else {
            return;
        };
        let mut window = self.workspace_mut().windows.remove(index);
        window.monitor = monitor;

        let others: Vec<usize> = self
            .workspace()
            .windows
            .iter()
            .enumerate()
            .filter(|(_, w)| w.monitor == monitor && w.is_tiled())
            .map(|(i, _)| i)
            .collect();
        let count = others.len() + 1;
        let slot = self.slot_at(monitor, count, x, y);
        let insert_at = match others.get(slot) {
            Some(&i) => i,
            None => others.last().map_or(self.workspace().windows.len(), |&i| i + 1),
        };
        tracing::debug!("Dropping {:?} into slot {} on monitor {}", handle, slot, monitor);
        self.workspace_mut().windows.insert(insert_at, window);
        self.clamp_scroll(ws_id, monitor);
    }

    fn slot_at(&self, monitor: MonitorId, count: usize, x: i32, y: i32) -> usize {
        let area = self.tile_area(monitor);
        match self.layout_of(monitor) {
            LayoutMode::MasterStack => layouts::master_stack_slot_at(&area, count, x, y),
            LayoutMode::HorizontalScroll => {
                let row = self.row(self.active_workspace, monitor);
                layouts::slot_at(&area, row, count, x)
            }
        }
    }
}
