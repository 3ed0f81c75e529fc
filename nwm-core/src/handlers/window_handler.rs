#![allow(clippy::wildcard_imports)]

use super::*;
use crate::display_action::DisplayAction;
use crate::display_event::StateRequest;
use crate::display_servers::DisplayServer;
use crate::models::{Placement, XyhwChange, classify};
use crate::persistence::WindowTags;
use crate::state::State;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Adopts a new client: classifies it, then places and focuses it.
    /// Returns true if changes need to be rendered.
    pub fn window_created_handler(&mut self, mut window: Window<H>, x: i32, y: i32) -> bool {
        //don't add the window if the manager already knows about it
        if self.state.is_managed(&window.handle) || self.state.specials.contains(&window.handle) {
            return false;
        }

        let placement = classify(&window);
        tracing::debug!("New window {:?} placed as {:?}", window.handle, placement);
        match placement {
            Placement::Ignored => {
                self.state
                    .actions
                    .push_back(DisplayAction::MapUnmanaged(window.handle));
                return false;
            }
            Placement::Special => {
                self.state.specials.push(window.handle);
                self.state
                    .actions
                    .push_back(DisplayAction::MapUnmanaged(window.handle));
                return true;
            }
            Placement::Floating | Placement::Normal => {}
        }

        // transients follow their parent around
        let parent = window
            .transient
            .and_then(|h| self.state.find_window(&h))
            .map(|p| (p.workspace, p.monitor, p.geometry));
        let (workspace, monitor) = match parent {
            Some((workspace, monitor, _)) => (workspace, monitor),
            None => (
                self.state.active_workspace,
                self.state
                    .focused()
                    .map_or_else(|| self.state.monitor_at(x, y), |w| w.monitor),
            ),
        };
        window.workspace = workspace;
        window.monitor = monitor;
        window.border = self.state.settings.border_width;
        window.set_floating(placement == Placement::Floating);

        let mut fullscreen = false;
        if self.state.restoring {
            let count = self.state.workspaces.len();
            if let Some(tags) = WindowTags::take(&mut self.display_server, window.handle, count) {
                tracing::debug!("Restoring {:?} with {:?}", window.handle, tags);
                window.workspace = tags.workspace;
                window.set_floating(tags.floating);
                fullscreen = tags.fullscreen;
            }
        }

        if window.is_floating() {
            let container = match parent {
                Some((_, _, geometry)) => geometry,
                None => self.state.monitors[window.monitor].bbox,
            };
            let (cx, cy) = window.geometry.center();
            if parent.is_some() || !container.contains_point(cx, cy) {
                window.geometry = window.geometry.centered_in(&container);
            }
        }

        let handle = window.handle;
        let on_active = window.workspace == self.state.active_workspace;
        window.set_visible(on_active);
        let floating = window.is_floating();
        let workspace = window.workspace;
        self.state.insert_window(window);

        //let the DS know we are managing this window
        self.state
            .actions
            .push_back(DisplayAction::AddedWindow(handle, floating));
        //let the DS know the correct desktop to find this window
        self.state
            .actions
            .push_back(DisplayAction::SetWindowWorkspace(handle, workspace));

        if fullscreen {
            self.state.fullscreen_request(&handle, StateRequest::Add);
        }
        if on_active {
            self.state.focus_window(&handle);
            self.state.scroll_into_view(&handle);
        } else if self.state.workspaces[workspace].focused.is_none() {
            self.state.workspaces[workspace].focused = Some(handle);
        }
        true
    }

    /// Forgets a client that was unmapped or destroyed and hands its focus on.
    /// Returns true if changes need to be rendered.
    pub fn window_destroyed_handler(&mut self, handle: &WindowHandle<H>) -> bool {
        if self.state.specials.contains(handle) {
            self.state.specials.retain(|h| h != handle);
            return true;
        }
        if self.state.mode.target() == Some(*handle) {
            self.state.mode = Mode::Normal;
            self.state.actions.push_back(DisplayAction::NormalMode);
        }

        let was_focused = self.state.focused_window() == Some(*handle);
        let Some(window) = self.state.remove_window(handle) else {
            return false;
        };
        self.state
            .actions
            .push_back(DisplayAction::DestroyedWindow(*handle));

        //make sure focus is recalculated if we closed the currently focused window
        if was_focused {
            // If there is a parent we would want to focus it.
            let parent = window
                .transient
                .filter(|h| self.state.workspace().contains(h));
            let next = parent.or(self.state.focused_window());
            self.state.workspace_mut().focused = None;
            match next {
                Some(next) => {
                    self.state.focus_window(&next);
                }
                None => {
                    self.state
                        .actions
                        .push_back(DisplayAction::Unfocus(None, window.is_floating()));
                }
            }
        }
        true
    }

    /// A client asked for a new geometry. Floating windows get it; everyone else is told where
    /// they really are.
    pub fn configure_request_handler(
        &mut self,
        handle: &WindowHandle<H>,
        change: XyhwChange,
    ) -> bool {
        let Some(window) = self.state.find_window_mut(handle) else {
            return false;
        };
        if window.is_floating() && !window.is_fullscreen() {
            return change.update(&mut window.geometry);
        }
        let act = DisplayAction::ConfigureXlibWindow(window.clone());
        self.state.actions.push_back(act);
        false
    }
}

impl<H: Handle> State<H> {
    /// Enters, leaves or toggles fullscreen. Entering saves the current geometry and floating
    /// flag, leaving restores them exactly.
    pub fn fullscreen_request(&mut self, handle: &WindowHandle<H>, request: StateRequest) -> bool {
        let Some(window) = self.find_window(handle) else {
            return false;
        };
        let wanted = match request {
            StateRequest::Add => true,
            StateRequest::Remove => false,
            StateRequest::Toggle => !window.is_fullscreen(),
        };
        if wanted == window.is_fullscreen() {
            return false;
        }
        let bbox = self
            .monitors
            .get(window.monitor)
            .map(|m| m.bbox)
            .unwrap_or_default();
        let ws = window.workspace;
        let monitor = window.monitor;
        if let Some(window) = self.find_window_mut(handle) {
            if wanted {
                window.enter_fullscreen(bbox);
            } else {
                window.exit_fullscreen();
            }
        }
        self.actions
            .push_back(DisplayAction::SetFullscreen(*handle, wanted));
        self.clamp_scroll(ws, monitor);
        true
    }

    /// Moves a window between the tiled and floating sets. Fullscreen windows stay as they are.
    pub fn toggle_float(&mut self, handle: &WindowHandle<H>) -> bool {
        let bbox = match self.find_window(handle) {
            Some(w) if !w.is_fullscreen() => self.monitors.get(w.monitor).map(|m| m.bbox),
            _ => return false,
        };
        let ws = self.active_workspace;
        let Some(window) = self.find_window_mut(handle) else {
            return false;
        };
        let floating = !window.is_floating();
        window.set_floating(floating);
        if floating {
            if let Some(bbox) = bbox {
                // pop out a little smaller than the tile, so it is visibly floating
                window.geometry.w = (window.geometry.w * 3 / 4).max(1);
                window.geometry.h = (window.geometry.h * 3 / 4).max(1);
                window.geometry = window.geometry.centered_in(&bbox);
            }
        }
        let monitor = window.monitor;
        self.clamp_scroll(ws, monitor);
        true
    }

    /// Politely asks the focused window to close.
    pub fn close_window(&mut self) -> bool {
        if let Some(handle) = self.focused_window() {
            self.actions.push_back(DisplayAction::KillWindow(handle));
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Output, TestManager, WindowType, Xyhw};

    fn manager() -> TestManager {
        let mut manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned()]);
        manager.outputs_changed_handler(vec![Output::new("A", Xyhw::new(0, 0, 1920, 1080))]);
        manager
    }

    fn geometry(manager: &TestManager, handle: i32) -> Option<Xyhw> {
        manager.state.find_window(&WindowHandle(handle)).map(|w| w.geometry)
    }

    #[test]
    fn three_windows_in_master_stack_without_gaps() {
        let mut manager = manager();
        for handle in 1..=3 {
            manager.window_created_handler(Window::new(WindowHandle(handle), None), 0, 0);
        }
        manager.state.update_windows();
        assert_eq!(geometry(&manager, 1), Some(Xyhw::new(0, 0, 960, 1080)));
        assert_eq!(geometry(&manager, 2), Some(Xyhw::new(960, 0, 960, 540)));
        assert_eq!(geometry(&manager, 3), Some(Xyhw::new(960, 540, 960, 540)));
    }

    #[test]
    fn toggling_fullscreen_twice_restores_the_tile() {
        let mut manager = manager();
        manager.state.settings.border_width = 2;
        for handle in 1..=2 {
            manager.window_created_handler(Window::new(WindowHandle(handle), None), 0, 0);
        }
        manager.state.update_windows();
        let tiled = geometry(&manager, 2);

        assert!(manager.command_handler(&Command::ToggleFullscreen));
        manager.state.update_windows();
        let window = manager.state.find_window(&WindowHandle(2)).cloned();
        assert_eq!(window.as_ref().map(|w| w.geometry), Some(Xyhw::new(0, 0, 1920, 1080)));
        assert_eq!(window.as_ref().map(|w| w.border), Some(0));
        assert_eq!(
            window.and_then(|w| w.saved_geometry().copied()).map(|s| (s.geometry, s.floating)),
            tiled.map(|g| (g, false))
        );

        assert!(manager.command_handler(&Command::ToggleFullscreen));
        assert_eq!(geometry(&manager, 2), tiled);
        let window = manager.state.find_window(&WindowHandle(2));
        assert_eq!(window.map(|w| (w.border, w.is_floating())), Some((2, false)));
    }

    #[test]
    fn docks_are_mapped_but_not_managed() {
        let mut manager = manager();
        let mut dock = Window::new(WindowHandle(5), None);
        dock.r#type = WindowType::Dock;
        assert!(!manager.window_created_handler(dock, 0, 0));
        assert!(!manager.state.is_managed(&WindowHandle(5)));
        assert_eq!(
            manager.state.actions.back(),
            Some(&DisplayAction::MapUnmanaged(WindowHandle(5)))
        );
    }

    #[test]
    fn notifications_become_specials() {
        let mut manager = manager();
        let mut popup = Window::new(WindowHandle(5), None);
        popup.r#type = WindowType::Notification;
        manager.window_created_handler(popup, 0, 0);
        assert_eq!(manager.state.specials, vec![WindowHandle(5)]);
        assert!(manager.window_destroyed_handler(&WindowHandle(5)));
        assert!(manager.state.specials.is_empty());
    }

    #[test]
    fn transients_float_centered_on_their_parent() {
        let mut manager = manager();
        manager.window_created_handler(Window::new(WindowHandle(1), None), 0, 0);
        manager.state.update_windows();
        let mut dialog = Window::new(WindowHandle(2), None);
        dialog.transient = Some(WindowHandle(1));
        dialog.geometry = Xyhw::new(0, 0, 200, 100);
        manager.window_created_handler(dialog, 0, 0);
        let window = manager.state.find_window(&WindowHandle(2));
        assert_eq!(window.map(Window::is_floating), Some(true));
        assert_eq!(window.map(|w| w.geometry), Some(Xyhw::new(860, 490, 200, 100)));
    }

    #[test]
    fn destroying_the_focused_window_focuses_a_neighbour() {
        let mut manager = manager();
        for handle in 1..=3 {
            manager.window_created_handler(Window::new(WindowHandle(handle), None), 0, 0);
        }
        manager.state.focus_window(&WindowHandle(2));
        assert!(manager.window_destroyed_handler(&WindowHandle(2)));
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(3)));
        assert!(!manager.window_destroyed_handler(&WindowHandle(2)));
    }

    #[test]
    fn manage_and_unmanage_keep_focus_on_the_active_workspace() {
        let mut manager = manager();
        for handle in 1..=6 {
            manager.window_created_handler(Window::new(WindowHandle(handle), None), 0, 0);
            if handle % 2 == 0 {
                manager.command_handler(&Command::MoveToWorkspace(1));
            }
        }
        for handle in [1, 4, 5] {
            manager.window_destroyed_handler(&WindowHandle(handle));
        }
        for handle in 1..=6 {
            let count = manager
                .state
                .workspaces
                .iter()
                .filter(|ws| ws.contains(&WindowHandle(handle)))
                .count();
            assert!(count <= 1);
        }
        if let Some(focused) = manager.state.focused_window() {
            assert!(manager.state.workspace().contains(&focused));
        }
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(3)));
    }

    #[test]
    fn tiled_windows_cannot_configure_themselves() {
        let mut manager = manager();
        manager.window_created_handler(Window::new(WindowHandle(1), None), 0, 0);
        let change = XyhwChange {
            w: Some(10),
            ..XyhwChange::default()
        };
        assert!(!manager.configure_request_handler(&WindowHandle(1), change));
        assert!(matches!(
            manager.state.actions.back(),
            Some(DisplayAction::ConfigureXlibWindow(_))
        ));
        manager.state.toggle_float(&WindowHandle(1));
        assert!(manager.configure_request_handler(&WindowHandle(1), change));
        assert_eq!(geometry(&manager, 1).map(|g| g.w), Some(10));
    }
}
