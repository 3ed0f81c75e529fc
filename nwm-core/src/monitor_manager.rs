use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::models::{Handle, Manager, Monitor, MonitorId, Output};
use crate::state::State;
use std::collections::HashMap;

impl<H: Handle> State<H> {
    /// Rebuilds the monitor list from the current outputs.
    ///
    /// Monitors keep their layout parameters when an output of the same name is still present.
    /// Windows whose monitor went away move to the primary monitor.
    pub fn enumerate(&mut self, outputs: Vec<Output>) {
        if outputs.is_empty() {
            tracing::warn!("Display server reported no outputs, keeping the current monitors");
            return;
        }

        let mut remap: HashMap<MonitorId, MonitorId> = HashMap::new();
        let monitors: Vec<Monitor> = outputs
            .into_iter()
            .enumerate()
            .map(|(id, output)| {
                let previous = self
                    .monitors
                    .iter()
                    .find(|m| !m.output.is_empty() && m.output == output.name);
                match previous {
                    Some(previous) => {
                        remap.insert(previous.id, id);
                        Monitor {
                            id,
                            bbox: output.bbox,
                            ..previous.clone()
                        }
                    }
                    None => {
                        let mut monitor = Monitor::new(
                            id,
                            output.name,
                            output.bbox,
                            self.settings.master_factor,
                            self.settings.scroll_visible,
                        );
                        monitor.layout = self.workspaces[self.active_workspace].layout;
                        monitor
                    }
                }
            })
            .collect();

        tracing::debug!("Monitors: {:?}", monitors);
        self.monitors = monitors;
        self.active_monitor = remap.get(&self.active_monitor).copied().unwrap_or(0);

        for ws in &mut self.workspaces {
            for window in &mut ws.windows {
                let Some(&monitor) = remap.get(&window.monitor) else {
                    window.monitor = 0;
                    if window.is_floating() {
                        let (x, y) = window.geometry.center();
                        if !self.monitors[0].bbox.contains_point(x, y) {
                            window.geometry = window.geometry.centered_in(&self.monitors[0].bbox);
                        }
                    }
                    continue;
                };
                window.monitor = monitor;
            }
        }
        for ws in 0..self.workspaces.len() {
            self.clamp_scroll(ws, self.active_monitor);
        }
    }

    /// The monitor containing the point, or the primary monitor.
    #[must_use]
    pub fn monitor_at(&self, x: i32, y: i32) -> MonitorId {
        self.monitors
            .iter()
            .position(|m| m.bbox.contains_point(x, y))
            .unwrap_or(0)
    }

    /// The monitor of the focused window, or the active monitor when nothing has focus.
    #[must_use]
    pub fn current_monitor(&self) -> MonitorId {
        self.focused()
            .map_or(self.active_monitor, |w| w.monitor)
            .min(self.monitors.len() - 1)
    }
}

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Outputs appeared, went away or changed size.
    ///
    /// Returns `true` if changes need to be rendered.
    pub fn outputs_changed_handler(&mut self, outputs: Vec<Output>) -> bool {
        self.state.enumerate(outputs);
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::layouts::LayoutMode;
    use crate::models::{Manager, Output, Window, WindowHandle, Xyhw};

    fn dual() -> Vec<Output> {
        vec![
            Output::new("left", Xyhw::new(0, 0, 1920, 1080)),
            Output::new("right", Xyhw::new(1920, 0, 1280, 1024)),
        ]
    }

    #[test]
    fn parameters_survive_reenumeration_by_output_name() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.outputs_changed_handler(dual());
        manager.state.monitors[1].set_master_factor(0.7);
        manager.state.monitors[1].layout = LayoutMode::HorizontalScroll;

        let mut swapped = dual();
        swapped.reverse();
        manager.outputs_changed_handler(swapped);
        assert_eq!(manager.state.monitors[0].output, "right");
        assert!((manager.state.monitors[0].master_factor - 0.7).abs() < f32::EPSILON);
        assert_eq!(manager.state.monitors[0].layout, LayoutMode::HorizontalScroll);
        assert_eq!(manager.state.monitors[1].layout, LayoutMode::MasterStack);
    }

    #[test]
    fn windows_on_a_removed_monitor_move_to_the_primary() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.outputs_changed_handler(dual());
        let mut window = Window::new(WindowHandle(1), None);
        window.monitor = 1;
        manager.state.insert_window(window);
        let mut kept = Window::new(WindowHandle(2), None);
        kept.monitor = 0;
        manager.state.insert_window(kept);

        manager.outputs_changed_handler(vec![Output::new("left", Xyhw::new(0, 0, 1920, 1080))]);
        assert_eq!(manager.state.monitors.len(), 1);
        assert!(manager.state.windows().all(|w| w.monitor == 0));
    }

    #[test]
    fn monitor_at_falls_back_to_the_primary() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.outputs_changed_handler(dual());
        assert_eq!(manager.state.monitor_at(2000, 10), 1);
        assert_eq!(manager.state.monitor_at(100, 10), 0);
        assert_eq!(manager.state.monitor_at(-50, 5000), 0);
    }

    #[test]
    fn current_monitor_follows_the_focused_window() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.outputs_changed_handler(dual());
        assert_eq!(manager.state.current_monitor(), 0);
        let mut window = Window::new(WindowHandle(1), None);
        window.monitor = 1;
        manager.state.insert_window(window);
        manager.state.workspace_mut().focused = Some(WindowHandle(1));
        assert_eq!(manager.state.current_monitor(), 1);
    }
}
