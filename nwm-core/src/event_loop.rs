use crate::models::{Handle, Manager, Window};
use crate::{config::Config, display_servers::DisplayServer};
use std::sync::atomic::Ordering;
use std::time::Duration;

/// Why the event loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    /// The session was saved and the caller should replace the process.
    Restart,
}

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Runs until a quit command arrives.
    pub async fn start_event_loop(mut self) -> ExitReason {
        let mut status_tick =
            tokio::time::interval(Duration::from_millis(self.state.settings.status_interval_ms));
        status_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        //existing windows and outputs are reported before anything else
        let mut event_buffer = self.display_server.get_next_events();
        loop {
            self.display_server.flush();

            let mut needs_update = false;
            tokio::select! {
                () = self.display_server.wait_readable(), if event_buffer.is_empty() => {
                    event_buffer.append(&mut self.display_server.get_next_events());
                    continue;
                }
                _ = status_tick.tick(), if event_buffer.is_empty() => {
                    let status = self.state.bar_status();
                    self.display_server.update_bar(&status);
                    continue;
                }
                else => {
                    event_buffer
                        .drain(..)
                        .for_each(|event| needs_update = self.display_event_handler(event) || needs_update);
                }
            }

            // If we need to update the displayed state.
            if needs_update {
                self.render();
            }

            //preform any actions requested by the handler
            while let Some(act) = self.state.actions.pop_front() {
                tracing::trace!("Action: {:?}", act);
                if let Some(event) = self.display_server.execute_action(act) {
                    event_buffer.push(event);
                }
            }

            // saved window tags only apply to windows that existed before the restart
            self.state.restoring = false;

            if self.reap_requested.swap(false, Ordering::SeqCst) {
                self.children.remove_finished_children();
            }

            if let Some(reason) = self.exit {
                if reason == ExitReason::Restart {
                    self.save_session();
                }
                self.display_server.flush();
                tracing::info!("Leaving the event loop: {:?}", reason);
                return reason;
            }
        }
    }

    /// Retiles, restacks and hands the new geometry to the display server.
    fn render(&mut self) {
        match self.state.mode.target() {
            // When (resizing / moving) only deal with the single window.
            Some(handle) => {
                let windows: Vec<&Window<H>> = self
                    .state
                    .windows()
                    .filter(|w| w.handle == handle)
                    .collect();
                self.display_server.update_windows(windows);
                self.state.restack();
            }
            None => {
                self.state.update_windows();
                self.state.restack();
                let windows: Vec<&Window<H>> = self.state.windows().collect();
                self.display_server.update_windows(windows);
                let status = self.state.bar_status();
                self.display_server.update_bar(&status);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_action::DisplayAction;
    use crate::models::{Output, WindowHandle, Xyhw};
    use crate::{Command, DisplayEvent};

    #[tokio::test]
    async fn quit_leaves_the_loop_after_draining_events() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.display_server.events = vec![
            DisplayEvent::OutputsChanged(vec![Output::new("A", Xyhw::new(0, 0, 800, 600))]),
            DisplayEvent::WindowCreate(Window::new(WindowHandle(1), None), 0, 0),
            DisplayEvent::SendCommand(Command::Quit { restart: false }),
        ];
        assert_eq!(manager.start_event_loop().await, ExitReason::Quit);
    }

    #[tokio::test]
    async fn restart_saves_the_session_first() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.display_server.events = vec![
            DisplayEvent::WindowCreate(Window::new(WindowHandle(1), None), 0, 0),
            DisplayEvent::SendCommand(Command::Quit { restart: true }),
        ];
        assert_eq!(manager.start_event_loop().await, ExitReason::Restart);
    }

    #[test]
    fn rendering_tiles_and_restacks_in_one_go() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.outputs_changed_handler(vec![Output::new("A", Xyhw::new(0, 0, 800, 600))]);
        manager.window_created_handler(Window::new(WindowHandle(1), None), 0, 0);
        manager.state.actions.clear();
        manager.render();
        assert_eq!(
            manager.state.actions.back(),
            Some(&DisplayAction::SetWindowOrder(vec![WindowHandle(1)]))
        );
        assert_eq!(
            manager.state.find_window(&WindowHandle(1)).map(|w| w.geometry),
            Some(Xyhw::new(0, 0, 800, 600))
        );
        assert!(manager.display_server.bar.is_some());
    }
}
