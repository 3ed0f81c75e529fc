#![allow(clippy::wildcard_imports)]

use super::*;
use crate::display_action::DisplayAction;
use crate::models::Drag;
use crate::state::State;
use crate::utils::modmask_lookup::{Button, ModMask};

impl<H: Handle> State<H> {
    /// A button was pressed over a managed window.
    ///
    /// With the mouse modifier held, button 1 starts a move and button 3 a resize. Any other
    /// click focuses the window and is replayed to the client.
    pub fn mouse_combo_handler(
        &mut self,
        modmask: ModMask,
        button: Button,
        handle: WindowHandle<H>,
        x: i32,
        y: i32,
    ) -> bool {
        // a release we never saw leaves the old grab hanging, drop it first
        if self.mode != Mode::Normal {
            tracing::debug!("Dropping stale grab {:?}", self.mode);
            self.mode = Mode::Normal;
            self.actions.push_back(DisplayAction::NormalMode);
        }

        let Some(window) = self.workspace().find(&handle) else {
            return false;
        };
        let origin = window.geometry;
        let fullscreen = window.is_fullscreen();

        let modifier = self.settings.mousekey;
        let mask = modmask.clean();
        let is_mouse_key = mask == modifier || mask == (modifier | ModMask::Shift);
        let drag = Drag {
            handle,
            button,
            pointer: (x, y),
            origin,
        };

        let changed = self.focus_window(&handle);
        match button {
            Button::Button1 if is_mouse_key && !fullscreen => {
                self.mode = Mode::MovingWindow(drag);
                self.actions
                    .push_back(DisplayAction::ReadyToMoveWindow(handle));
                true
            }
            Button::Button3 if is_mouse_key && !fullscreen => {
                self.mode = Mode::ResizingWindow(drag);
                self.actions
                    .push_back(DisplayAction::ReadyToResizeWindow(handle));
                true
            }
            _ => {
                self.actions
                    .push_back(DisplayAction::ReplayClick(handle, button));
                changed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Output, TestManager, Xyhw};

    fn manager() -> TestManager {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.outputs_changed_handler(vec![Output::new("A", Xyhw::new(0, 0, 1920, 1080))]);
        for handle in 1..=2 {
            manager.window_created_handler(Window::new(WindowHandle(handle), None), 0, 0);
        }
        manager.state.update_windows();
        manager
    }

    #[test]
    fn modifier_and_button_one_start_a_move() {
        let mut manager = manager();
        let mask = ModMask::Super | ModMask::NumLock;
        assert!(manager.state.mouse_combo_handler(mask, Button::Button1, WindowHandle(1), 5, 5));
        assert!(matches!(manager.state.mode, Mode::MovingWindow(ref d) if d.handle == WindowHandle(1)));
        assert_eq!(manager.state.focused_window(), Some(WindowHandle(1)));
    }

    #[test]
    fn modifier_and_button_three_start_a_resize() {
        let mut manager = manager();
        manager.state.mouse_combo_handler(ModMask::Super, Button::Button3, WindowHandle(2), 5, 5);
        assert!(matches!(manager.state.mode, Mode::ResizingWindow(_)));
    }

    #[test]
    fn a_new_press_replaces_a_stale_grab() {
        let mut manager = manager();
        manager.state.mouse_combo_handler(ModMask::Super, Button::Button1, WindowHandle(1), 5, 5);
        manager.state.actions.clear();
        manager.state.mouse_combo_handler(ModMask::Super, Button::Button3, WindowHandle(2), 9, 9);
        assert_eq!(manager.state.actions.front(), Some(&DisplayAction::NormalMode));
        assert!(matches!(manager.state.mode, Mode::ResizingWindow(ref d) if d.handle == WindowHandle(2)));
    }

    #[test]
    fn plain_clicks_focus_and_replay() {
        let mut manager = manager();
        assert!(manager.state.mouse_combo_handler(ModMask::Zero, Button::Button1, WindowHandle(1), 5, 5));
        assert_eq!(manager.state.mode, Mode::Normal);
        assert_eq!(
            manager.state.actions.back(),
            Some(&DisplayAction::ReplayClick(WindowHandle(1), Button::Button1))
        );
    }
}
