#![allow(clippy::wildcard_imports)]

use super::*;
use crate::display_action::DisplayAction;
use crate::layouts::{self, LayoutMode};
use crate::models::MonitorId;
use crate::state::State;

impl<H: Handle> State<H> {
    /// Create a `DisplayAction` to cause this window to become focused.
    ///
    /// Only windows on the active workspace can take the focus. Returns `false` when nothing
    /// changed.
    pub fn focus_window(&mut self, handle: &WindowHandle<H>) -> bool {
        let Some(window) = self.workspace().find(handle).cloned() else {
            return false;
        };
        let previous = self.focused().cloned();
        if previous.as_ref().is_some_and(|p| &p.handle == handle) {
            return false;
        }

        self.workspace_mut().focused = Some(*handle);
        self.active_monitor = window.monitor;
        tracing::debug!("Focusing {:?}", handle);
        self.actions.push_back(DisplayAction::WindowTakeFocus {
            window,
            previous_window: previous,
        });
        true
    }

    /// Drops the focus to the root window.
    pub fn unfocus(&mut self) -> bool {
        let Some(previous) = self.focused().cloned() else {
            return false;
        };
        self.workspace_mut().focused = None;
        self.actions.push_back(DisplayAction::Unfocus(
            Some(previous.handle),
            previous.is_floating(),
        ));
        true
    }

    /// Tells the display server about the focus the active workspace already holds, e.g. after
    /// switching to it.
    pub(crate) fn announce_focus(&mut self, previous: Option<Window<H>>) {
        match self.focused().cloned() {
            Some(window) => {
                self.active_monitor = window.monitor;
                self.actions.push_back(DisplayAction::WindowTakeFocus {
                    window,
                    previous_window: previous,
                });
            }
            None => {
                let floating = previous.as_ref().is_some_and(Window::is_floating);
                self.actions
                    .push_back(DisplayAction::Unfocus(previous.map(|w| w.handle), floating));
            }
        }
    }

    /// Moves the focus `delta` steps through the active workspace, wrapping around.
    ///
    /// While a tiled window (or nothing) has the focus only tiled windows are candidates. From a
    /// floating or fullscreen window every window is.
    pub fn focus_cycle(&mut self, delta: i32) -> bool {
        let ws = self.workspace();
        let from_tiled = self.focused().is_none_or(Window::is_tiled);
        let pool: Vec<WindowHandle<H>> = ws
            .windows
            .iter()
            .filter(|w| !from_tiled || w.is_tiled())
            .map(|w| w.handle)
            .collect();
        if pool.is_empty() {
            return false;
        }
        let next = match ws.focused.and_then(|h| pool.iter().position(|p| p == &h)) {
            Some(index) => (index as i32 + delta).rem_euclid(pool.len() as i32) as usize,
            None => 0,
        };
        let handle = pool[next];
        let changed = self.focus_window(&handle);
        self.scroll_into_view(&handle);
        changed
    }

    /// Makes `monitor` current and focuses its first window on the active workspace.
    pub fn focus_monitor(&mut self, monitor: MonitorId) -> bool {
        let Some(bbox) = self.monitors.get(monitor).map(|m| m.bbox) else {
            return false;
        };
        self.active_monitor = monitor;
        let first = self
            .workspace()
            .windows
            .iter()
            .find(|w| w.monitor == monitor)
            .map(|w| w.handle);
        match first {
            Some(handle) => {
                self.focus_window(&handle);
            }
            None => {
                self.unfocus();
            }
        }
        self.actions
            .push_back(DisplayAction::MoveMouseOverPoint(bbox.center()));
        true
    }

    /// The pointer crossed into a window, or into the root window at `(x, y)`.
    pub fn pointer_entered(&mut self, handle: &WindowHandle<H>, x: i32, y: i32) -> bool {
        if !self.settings.focus_behaviour.is_sloppy() || self.mode != Mode::Normal {
            return false;
        }
        if self.workspace().contains(handle) {
            return self.focus_window(handle);
        }
        if self.is_managed(handle) {
            return false;
        }
        let monitor = self.monitor_at(x, y);
        if monitor == self.current_monitor() {
            return false;
        }
        self.active_monitor = monitor;
        if self.focused().is_some_and(|w| w.monitor != monitor) {
            self.unfocus();
        }
        true
    }

    /// In the horizontal-scroll layout, scrolls the row just enough to show the window whole.
    pub(crate) fn scroll_into_view(&mut self, handle: &WindowHandle<H>) {
        let ws = self.active_workspace;
        let Some(window) = self.workspace().find(handle) else {
            return;
        };
        let monitor = window.monitor;
        if !window.is_tiled() || self.layout_of(monitor) != LayoutMode::HorizontalScroll {
            return;
        }
        let Some(index) = self.workspace().tiled_on(monitor).position(|w| &w.handle == handle)
        else {
            return;
        };
        let count = self.workspace().tiled_on(monitor).count();
        let area = self.tile_area(monitor);
        let row = self.row(ws, monitor);
        let width = layouts::column_width(&area, row, count);
        let left = index as i32 * width;

        let workspace = self.workspace_mut();
        if left < workspace.scroll_offset {
            workspace.scroll_offset = left;
        } else if left + width > workspace.scroll_offset + area.w {
            workspace.scroll_offset = left + width - area.w;
        }
        self.clamp_scroll(ws, monitor);
    }
}
