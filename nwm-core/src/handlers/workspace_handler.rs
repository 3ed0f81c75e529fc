#![allow(clippy::wildcard_imports)]

use super::*;
use crate::display_action::DisplayAction;
use crate::models::WorkspaceId;
use crate::state::State;

impl<H: Handle> State<H> {
    /// Shows workspace `id` and gives its remembered focus back. Switching to the workspace
    /// already shown is a no-op.
    pub fn switch_workspace(&mut self, id: WorkspaceId) -> bool {
        if id >= self.workspaces.len() || id == self.active_workspace {
            return false;
        }
        let monitor = self.current_monitor();
        let previous = self.focused().cloned();
        self.active_workspace = id;

        let layout = self.workspaces[id].layout;
        self.monitors[monitor].layout = layout;
        self.clamp_scroll(id, monitor);

        tracing::debug!("Switched to workspace {}", id);
        self.actions
            .push_back(DisplayAction::SetCurrentWorkspace(id));
        self.announce_focus(previous);
        true
    }

    /// Sends the focused window to workspace `id`. The focus stays on the current workspace.
    pub fn move_to_workspace(&mut self, id: WorkspaceId) -> bool {
        if id >= self.workspaces.len() || id == self.active_workspace {
            return false;
        }
        let Some(previous) = self.focused().cloned() else {
            return false;
        };
        let handle = previous.handle;
        if !self.move_window(&handle, id) {
            return false;
        }
        if self.workspaces[id].focused.is_none() {
            self.workspaces[id].focused = Some(handle);
        }
        self.actions
            .push_back(DisplayAction::SetWindowWorkspace(handle, id));
        self.announce_focus(Some(previous));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::LayoutMode;
    use crate::models::{Output, TestManager, Xyhw};

    fn manager() -> TestManager {
        let mut manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned(), "3".to_owned()]);
        manager.outputs_changed_handler(vec![Output::new("A", Xyhw::new(0, 0, 1920, 1080))]);
        for handle in 1..=3 {
            manager.window_created_handler(Window::new(WindowHandle(handle), None), 0, 0);
        }
        manager.state.update_windows();
        manager
    }

    #[test]
    fn switching_away_and_back_changes_nothing() {
        let mut manager = manager();
        manager.state.focus_window(&WindowHandle(2));
        let before: Vec<Xyhw> = manager.state.windows().map(|w| w.geometry).collect();

        for target in 0..3 {
            manager.state.switch_workspace(target);
            manager.state.update_windows();
            manager.state.switch_workspace(0);
            manager.state.update_windows();
            let after: Vec<Xyhw> = manager.state.windows().map(|w| w.geometry).collect();
            assert_eq!(before, after);
            assert_eq!(manager.state.focused_window(), Some(WindowHandle(2)));
        }
    }

    #[test]
    fn switching_to_the_current_workspace_is_a_noop() {
        let mut manager = manager();
        manager.state.actions.clear();
        assert!(!manager.state.switch_workspace(0));
        assert!(!manager.state.switch_workspace(42));
        assert!(manager.state.actions.is_empty());
    }

    #[test]
    fn workspaces_remember_their_layout() {
        let mut manager = manager();
        manager.command_handler(&Command::ToggleLayout);
        assert_eq!(manager.state.monitors[0].layout, LayoutMode::HorizontalScroll);
        manager.state.switch_workspace(1);
        assert_eq!(manager.state.monitors[0].layout, LayoutMode::MasterStack);
        manager.state.switch_workspace(0);
        assert_eq!(manager.state.monitors[0].layout, LayoutMode::HorizontalScroll);
    }

    #[test]
    fn moved_windows_leave_the_focus_behind() {
        let mut manager = manager();
        assert!(manager.state.move_to_workspace(2));
        assert_eq!(manager.state.workspace_of(&WindowHandle(3)), Some(2));
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(2)));
        assert_eq!(manager.state.workspaces[2].focused, Some(WindowHandle(3)));
        assert!(!manager.state.move_to_workspace(9));
    }
}
