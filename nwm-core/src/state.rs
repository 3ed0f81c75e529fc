//! The store every handler mutates. Nothing in here talks to the display server; changes that
//! need to reach it are queued as `DisplayAction`s.
use crate::DisplayAction;
use crate::config::{BarPosition, Config};
use crate::layouts::{self, LayoutMode, Row, TileArea};
use crate::models::{
    BarStatus, FocusBehaviour, Handle, Mode, Monitor, MonitorId, Window, WindowHandle, Workspace,
    WorkspaceId, Xyhw,
};
use crate::utils::modmask_lookup::{ModMask, into_modmask};
use std::collections::VecDeque;

/// Global knobs, seeded from the config and changed by toggles.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub gap_size: i32,
    pub gaps_enabled: bool,
    pub border_width: i32,
    pub bar_height: i32,
    pub bar_visible: bool,
    pub bar_position: BarPosition,
    pub scroll_step: i32,
    /// Visible column count given to new monitors.
    pub scroll_visible: i32,
    /// Master factor given to new monitors.
    pub master_factor: f32,
    pub focus_behaviour: FocusBehaviour,
    pub mousekey: ModMask,
    pub status_interval_ms: u64,
}

impl Settings {
    pub fn new(config: &impl Config) -> Self {
        Self {
            gap_size: config.gap_size().max(0),
            gaps_enabled: config.gaps_enabled(),
            border_width: config.border_width().max(0),
            bar_height: config.bar_height().max(0),
            bar_visible: config.bar_visible(),
            bar_position: config.bar_position(),
            scroll_step: config.scroll_step().max(0),
            scroll_visible: config.scroll_visible(),
            master_factor: config.master_factor(),
            focus_behaviour: config.focus_behaviour(),
            mousekey: into_modmask(&config.mousekey()),
            status_interval_ms: config.status_interval_ms().max(1),
        }
    }
}

#[derive(Debug)]
pub struct State<H: Handle> {
    pub settings: Settings,
    /// Never empty. Holds a zero-sized placeholder until outputs are enumerated.
    pub monitors: Vec<Monitor>,
    pub workspaces: Vec<Workspace<H>>,
    pub active_workspace: WorkspaceId,
    pub active_monitor: MonitorId,
    /// Unmanaged always-on-top surfaces.
    pub specials: Vec<WindowHandle<H>>,
    pub mode: Mode<H>,
    pub actions: VecDeque<DisplayAction<H>>,
    /// Set while windows are adopted after a restart, so saved window tags get read back.
    pub restoring: bool,
}

impl<H: Handle> State<H> {
    pub(crate) fn new(config: &impl Config) -> Self {
        let settings = Settings::new(config);
        let mut labels = config.workspace_labels();
        if labels.is_empty() {
            labels.push("1".to_owned());
        }
        let workspaces = labels
            .into_iter()
            .enumerate()
            .map(|(id, label)| Workspace::new(id, label))
            .collect();
        let placeholder = Monitor::new(
            0,
            String::new(),
            Xyhw::default(),
            settings.master_factor,
            settings.scroll_visible,
        );

        Self {
            settings,
            monitors: vec![placeholder],
            workspaces,
            active_workspace: 0,
            active_monitor: 0,
            specials: vec![],
            mode: Mode::default(),
            actions: VecDeque::new(),
            restoring: false,
        }
    }

    #[must_use]
    pub fn workspace(&self) -> &Workspace<H> {
        &self.workspaces[self.active_workspace]
    }

    pub fn workspace_mut(&mut self) -> &mut Workspace<H> {
        &mut self.workspaces[self.active_workspace]
    }

    /// The focused window of the active workspace. This is the global focus.
    #[must_use]
    pub fn focused_window(&self) -> Option<WindowHandle<H>> {
        self.workspace().focused
    }

    #[must_use]
    pub fn focused(&self) -> Option<&Window<H>> {
        self.workspace().focused_window()
    }

    pub fn windows(&self) -> impl Iterator<Item = &Window<H>> {
        self.workspaces.iter().flat_map(|ws| ws.windows.iter())
    }

    #[must_use]
    pub fn workspace_of(&self, handle: &WindowHandle<H>) -> Option<WorkspaceId> {
        self.workspaces
            .iter()
            .find(|ws| ws.contains(handle))
            .map(|ws| ws.id)
    }

    #[must_use]
    pub fn find_window(&self, handle: &WindowHandle<H>) -> Option<&Window<H>> {
        self.workspaces.iter().find_map(|ws| ws.find(handle))
    }

    pub fn find_window_mut(&mut self, handle: &WindowHandle<H>) -> Option<&mut Window<H>> {
        self.workspaces.iter_mut().find_map(|ws| ws.find_mut(handle))
    }

    #[must_use]
    pub fn is_managed(&self, handle: &WindowHandle<H>) -> bool {
        self.workspace_of(handle).is_some()
    }

    /// Adds a window to the end of its workspace's list. A handle already managed elsewhere is
    /// moved, never duplicated.
    pub fn insert_window(&mut self, mut window: Window<H>) {
        if self.is_managed(&window.handle) {
            self.remove_window(&window.handle);
        }
        window.workspace = window.workspace.min(self.workspaces.len() - 1);
        window.monitor = window.monitor.min(self.monitors.len() - 1);
        self.workspaces[window.workspace].windows.push(window);
    }

    /// Takes a window out of its workspace. If it held that workspace's focus, the window that
    /// now sits at its index (or the one before it) inherits the focus.
    pub fn remove_window(&mut self, handle: &WindowHandle<H>) -> Option<Window<H>> {
        let ws_id = self.workspace_of(handle)?;
        let ws = &mut self.workspaces[ws_id];
        let index = ws.position(handle)?;
        let window = ws.windows.remove(index);
        if ws.focused == Some(*handle) {
            let neighbour = index.min(ws.windows.len().saturating_sub(1));
            ws.focused = ws.windows.get(neighbour).map(|w| w.handle);
        }
        self.clamp_scroll(ws_id, window.monitor);
        Some(window)
    }

    /// Moves a window to another workspace, keeping its position at the end of the new list.
    pub fn move_window(&mut self, handle: &WindowHandle<H>, target: WorkspaceId) -> bool {
        if target >= self.workspaces.len() {
            return false;
        }
        let Some(mut window) = self.remove_window(handle) else {
            return false;
        };
        window.workspace = target;
        window.set_visible(target == self.active_workspace);
        self.workspaces[target].windows.push(window);
        true
    }

    #[must_use]
    pub fn tile_area(&self, monitor: MonitorId) -> TileArea {
        let bbox = self.monitors.get(monitor).map(|m| m.bbox).unwrap_or_default();
        TileArea::new(bbox, &self.settings)
    }

    #[must_use]
    pub fn row(&self, ws: WorkspaceId, monitor: MonitorId) -> Row {
        let workspace = &self.workspaces[ws];
        Row {
            visible: self.monitors.get(monitor).map_or(1, |m| m.scroll_visible),
            offset: workspace.scroll_offset,
            maximized: workspace.scroll_maximized,
        }
    }

    /// Brings a workspace's scroll offset back into `[0, content - monitor width]`.
    pub fn clamp_scroll(&mut self, ws: WorkspaceId, monitor: MonitorId) {
        let count = self.workspaces[ws].tiled_on(monitor).count();
        let max = layouts::max_offset(&self.tile_area(monitor), self.row(ws, monitor), count);
        let workspace = &mut self.workspaces[ws];
        workspace.scroll_offset = workspace.scroll_offset.clamp(0, max);
    }

    #[must_use]
    pub fn layout_of(&self, monitor: MonitorId) -> LayoutMode {
        self.monitors.get(monitor).map(|m| m.layout).unwrap_or_default()
    }

    /// What an external status bar should show right now.
    #[must_use]
    pub fn bar_status(&self) -> BarStatus {
        let monitor = self.current_monitor();
        BarStatus {
            labels: self.workspaces.iter().map(|ws| ws.label.clone()).collect(),
            active_workspace: self.active_workspace,
            occupied: self.workspaces.iter().map(Workspace::is_occupied).collect(),
            layout: self.monitors[monitor]
                .layout
                .label(self.monitors[monitor].scroll_visible),
            title: self.focused().and_then(|w| w.name.clone()),
            visible: self.settings.bar_visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Manager, Output, Window, WindowHandle, Xyhw};

    #[test]
    fn a_handle_is_never_in_two_workspaces() {
        let mut manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned()]);
        let mut window = Window::new(WindowHandle(1), None);
        manager.state.insert_window(window.clone());
        window.workspace = 1;
        manager.state.insert_window(window);
        let count = manager
            .state
            .workspaces
            .iter()
            .filter(|ws| ws.contains(&WindowHandle(1)))
            .count();
        assert_eq!(count, 1);
        assert_eq!(manager.state.workspace_of(&WindowHandle(1)), Some(1));
    }

    #[test]
    fn removing_the_focused_window_promotes_a_neighbour() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        for handle in 1..=3 {
            manager.state.insert_window(Window::new(WindowHandle(handle), None));
        }
        manager.state.workspace_mut().focused = Some(WindowHandle(3));
        manager.state.remove_window(&WindowHandle(3));
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(2)));

        manager.state.workspace_mut().focused = Some(WindowHandle(1));
        manager.state.remove_window(&WindowHandle(1));
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(2)));

        manager.state.remove_window(&WindowHandle(2));
        assert_eq!(manager.state.focused_window(), None);
    }

    #[test]
    fn removing_a_window_clamps_the_scroll_offset() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.outputs_changed_handler(vec![Output::new("A", Xyhw::new(0, 0, 1000, 500))]);
        manager.state.monitors[0].scroll_visible = 2;
        for handle in 1..=4 {
            manager.state.insert_window(Window::new(WindowHandle(handle), None));
        }
        manager.state.workspace_mut().scroll_offset = 1000;
        manager.state.remove_window(&WindowHandle(4));
        assert_eq!(manager.state.workspace().scroll_offset, 500);
    }

    #[test]
    fn out_of_range_moves_are_ignored() {
        let mut manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned()]);
        manager.state.insert_window(Window::new(WindowHandle(1), None));
        assert!(!manager.state.move_window(&WindowHandle(1), 7));
        assert_eq!(manager.state.workspace_of(&WindowHandle(1)), Some(0));
    }
}
