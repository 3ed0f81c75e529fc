#![allow(clippy::wildcard_imports)]

use super::*;
use crate::display_servers::DisplayServer;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Applies one event from the display server to the manager.
    /// Returns true if changes need to be rendered.
    pub fn display_event_handler(&mut self, event: DisplayEvent<H>) -> bool {
        tracing::trace!("Event: {:?}", event);
        match event {
            DisplayEvent::OutputsChanged(outputs) => self.outputs_changed_handler(outputs),
            DisplayEvent::WindowCreate(w, x, y) => self.window_created_handler(w, x, y),
            DisplayEvent::WindowDestroy(handle) => self.window_destroyed_handler(&handle),
            DisplayEvent::ConfigureRequest(handle, change) => {
                self.configure_request_handler(&handle, change)
            }

            DisplayEvent::WindowTakeFocus(handle) | DisplayEvent::ActivateRequest(handle) => {
                self.state.focus_window(&handle)
            }
            DisplayEvent::FullscreenRequest(handle, request) => {
                self.state.fullscreen_request(&handle, request)
            }

            DisplayEvent::KeyCombo(mod_mask, key) => {
                //look through the keybinds and run the command bound to this chord
                let mask = mod_mask.clean();
                let command = self
                    .keybinds
                    .iter()
                    .find(|k| k.modifier == mask && k.key == key)
                    .map(|k| k.command.clone());
                command.is_some_and(|cmd| self.command_handler(&cmd))
            }
            DisplayEvent::SendCommand(command) => self.command_handler(&command),

            DisplayEvent::MouseCombo(mod_mask, button, handle, x, y) => self
                .state
                .mouse_combo_handler(mod_mask, button, handle, x, y),
            DisplayEvent::MouseMotion(x, y) => match self.state.mode.clone() {
                Mode::MovingWindow(drag) => self.state.window_move_handler(&drag, x, y),
                Mode::ResizingWindow(drag) => self.state.window_resize_handler(&drag, x, y),
                Mode::Normal => false,
            },
            DisplayEvent::MouseRelease(button, x, y) => {
                self.state.mouse_release_handler(button, x, y)
            }
            DisplayEvent::Movement(handle, x, y) => self.state.pointer_entered(&handle, x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Keybind;
    use crate::config::tests::TestConfig;
    use crate::display_event::StateRequest;
    use crate::models::{Output, TestManager, Xyhw};
    use crate::utils::modmask_lookup::ModMask;

    #[test]
    fn key_chords_ignore_lock_modifiers() {
        let config = TestConfig {
            bindings: vec![Keybind {
                modifier: ModMask::Super,
                key: "2".to_owned(),
                command: Command::SwitchWorkspace(1),
            }],
            ..TestConfig::default()
        };
        let mut manager = TestManager::new(config).expect("mock");
        let chord = ModMask::Super | ModMask::Lock | ModMask::NumLock;
        assert!(manager.display_event_handler(DisplayEvent::KeyCombo(chord, "2".to_owned())));
        assert_eq!(manager.state.active_workspace, 1);
        let unbound = DisplayEvent::KeyCombo(ModMask::Shift, "2".to_owned());
        assert!(!manager.display_event_handler(unbound));
    }

    #[test]
    fn clients_can_request_fullscreen() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.display_event_handler(DisplayEvent::OutputsChanged(vec![Output::new(
            "A",
            Xyhw::new(0, 0, 1280, 720),
        )]));
        manager.display_event_handler(DisplayEvent::WindowCreate(
            Window::new(WindowHandle(1), None),
            0,
            0,
        ));
        let request = DisplayEvent::FullscreenRequest(WindowHandle(1), StateRequest::Add);
        assert!(manager.display_event_handler(request));
        let request = DisplayEvent::FullscreenRequest(WindowHandle(1), StateRequest::Add);
        assert!(!manager.display_event_handler(request));
        let fullscreen = manager.state.find_window(&WindowHandle(1)).map(Window::is_fullscreen);
        assert_eq!(fullscreen, Some(true));
    }
}
