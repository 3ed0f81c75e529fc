#![allow(clippy::wildcard_imports)]

use super::*;
use crate::display_servers::DisplayServer;
use crate::persistence::{SessionSnapshot, WindowTags};

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Leaves everything needed to pick up where we are in the display server's hands, right
    /// before the process is replaced.
    pub fn save_session(&mut self) {
        SessionSnapshot::capture(&self.state).write(&mut self.display_server);
        for window in self.state.windows() {
            WindowTags::capture(window).write(&mut self.display_server, window.handle);
        }
        tracing::info!("Saved session for {} windows", self.state.windows().count());
    }

    /// Reads back a saved session, if there is one. Windows pick up their own tags later, as
    /// they are adopted.
    pub(crate) fn restore_session(&mut self) {
        let count = self.state.workspaces.len();
        let Some(snapshot) = SessionSnapshot::take(&mut self.display_server, count) else {
            return;
        };
        tracing::info!("Restoring saved session");
        snapshot.apply(&mut self.state);
        self.state.restoring = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::LayoutMode;
    use crate::models::{Output, Xyhw};
    use crate::persistence::{PropertyStore, SessionKey};

    fn output() -> DisplayEvent<i32> {
        DisplayEvent::OutputsChanged(vec![Output::new("A", Xyhw::new(0, 0, 1920, 1080))])
    }

    #[test]
    fn restart_restores_workspace_and_floating_state() {
        let labels: Vec<String> = (1..=5).map(|i| i.to_string()).collect();
        let mut manager = Manager::new_test(labels);
        manager.display_event_handler(output());
        manager.display_event_handler(DisplayEvent::WindowCreate(
            Window::new(WindowHandle(1), None),
            0,
            0,
        ));
        manager.display_event_handler(DisplayEvent::WindowCreate(
            Window::new(WindowHandle(2), None),
            0,
            0,
        ));
        manager.state.focus_window(&WindowHandle(1));
        manager.command_handler(&Command::ToggleFloat);
        manager.command_handler(&Command::MoveToWorkspace(3));
        manager.command_handler(&Command::ToggleLayout);
        manager.command_handler(&Command::ToggleGap);
        manager.command_handler(&Command::SwitchWorkspace(2));
        manager.save_session();

        let mut manager = manager.restarted();
        assert!(manager.state.restoring);
        assert_eq!(manager.state.active_workspace, 2);
        assert!(manager.state.settings.gaps_enabled);
        assert_eq!(manager.state.workspaces[0].layout, LayoutMode::HorizontalScroll);

        manager.display_event_handler(output());
        for handle in [2, 1] {
            manager.display_event_handler(DisplayEvent::WindowCreate(
                Window::new(WindowHandle(handle), None),
                0,
                0,
            ));
        }
        let restored = manager.state.find_window(&WindowHandle(1));
        assert_eq!(restored.map(|w| w.workspace), Some(3));
        assert_eq!(restored.map(Window::is_floating), Some(true));
        assert_eq!(restored.map(Window::is_fullscreen), Some(false));
        assert_eq!(manager.state.workspace_of(&WindowHandle(2)), Some(0));
        assert!(manager.display_server.windows.is_empty());
        assert!(manager.display_server.root.is_empty());
    }

    #[test]
    fn without_a_marker_windows_are_adopted_fresh() {
        let mut manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned()]);
        manager.display_server.write_window(
            WindowHandle(1),
            SessionKey::Workspace,
            &[1],
        );
        let mut manager = manager.restarted();
        assert!(!manager.state.restoring);
        manager.display_event_handler(DisplayEvent::WindowCreate(
            Window::new(WindowHandle(1), None),
            0,
            0,
        ));
        assert_eq!(manager.state.workspace_of(&WindowHandle(1)), Some(0));
    }

    #[test]
    fn fullscreen_survives_a_restart() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.display_event_handler(output());
        manager.display_event_handler(DisplayEvent::WindowCreate(
            Window::new(WindowHandle(1), None),
            0,
            0,
        ));
        manager.command_handler(&Command::ToggleFullscreen);
        manager.save_session();

        let mut manager = manager.restarted();
        manager.display_event_handler(output());
        manager.display_event_handler(DisplayEvent::WindowCreate(
            Window::new(WindowHandle(1), None),
            0,
            0,
        ));
        let window = manager.state.find_window(&WindowHandle(1));
        assert_eq!(window.map(Window::is_fullscreen), Some(true));
        assert_eq!(window.map(|w| w.geometry), Some(Xyhw::new(0, 0, 1920, 1080)));
    }
}
