use crate::DisplayAction;
use crate::models::{Handle, WindowHandle};
use crate::state::State;

impl<H: Handle> State<H> {
    /// The draw order of everything visible, bottom first.
    ///
    /// Tiled windows of every monitor come first, then floating and fullscreen windows with the
    /// focused one of those last. A window being dragged sits above all managed windows, and the
    /// always-on-top specials end the list.
    #[must_use]
    pub fn stacking_order(&self) -> Vec<WindowHandle<H>> {
        let ws = self.workspace();
        let mut order: Vec<WindowHandle<H>> = Vec::with_capacity(ws.windows.len());
        for monitor in &self.monitors {
            order.extend(ws.tiled_on(monitor.id).map(|w| w.handle));
        }
        // tiled windows whose monitor is gone still need a place
        let orphans: Vec<WindowHandle<H>> = ws
            .windows
            .iter()
            .filter(|w| w.is_tiled() && !order.contains(&w.handle))
            .map(|w| w.handle)
            .collect();
        order.extend(orphans);

        let mut raised: Vec<WindowHandle<H>> = ws
            .windows
            .iter()
            .filter(|w| !w.is_tiled())
            .map(|w| w.handle)
            .collect();
        if let Some(focused) = self.focused().filter(|w| !w.is_tiled()) {
            raised.retain(|h| h != &focused.handle);
            raised.push(focused.handle);
        }
        order.append(&mut raised);

        if let Some(target) = self.mode.target() {
            if let Some(index) = order.iter().position(|h| h == &target) {
                let dragged = order.remove(index);
                order.push(dragged);
            }
        }

        order.extend(self.specials.iter().copied());
        order
    }

    /// Queues one atomic restack of the whole visible set.
    pub fn restack(&mut self) {
        let order = self.stacking_order();
        self.actions.push_back(DisplayAction::SetWindowOrder(order));
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Drag, Manager, Mode, Window, WindowHandle, Xyhw};
    use crate::utils::modmask_lookup::Button;

    fn floating(handle: i32) -> Window<i32> {
        let mut window = Window::new(WindowHandle(handle), None);
        window.set_floating(true);
        window
    }

    #[test]
    fn floating_windows_sit_above_tiled_ones() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.state.insert_window(floating(1));
        manager.state.insert_window(Window::new(WindowHandle(2), None));
        manager.state.insert_window(floating(3));
        manager.state.insert_window(Window::new(WindowHandle(4), None));
        let order = manager.state.stacking_order();
        assert_eq!(
            order,
            vec![WindowHandle(2), WindowHandle(4), WindowHandle(1), WindowHandle(3)]
        );
    }

    #[test]
    fn focused_floating_window_is_topmost_below_specials() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.state.insert_window(floating(1));
        manager.state.insert_window(floating(2));
        manager.state.insert_window(Window::new(WindowHandle(3), None));
        manager.state.specials.push(WindowHandle(9));
        manager.state.workspace_mut().focused = Some(WindowHandle(1));
        let order = manager.state.stacking_order();
        assert_eq!(
            order,
            vec![WindowHandle(3), WindowHandle(2), WindowHandle(1), WindowHandle(9)]
        );
    }

    #[test]
    fn focused_tiled_window_does_not_jump_over_floating_ones() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.state.insert_window(Window::new(WindowHandle(1), None));
        manager.state.insert_window(floating(2));
        manager.state.workspace_mut().focused = Some(WindowHandle(1));
        let order = manager.state.stacking_order();
        assert_eq!(order, vec![WindowHandle(1), WindowHandle(2)]);
    }

    #[test]
    fn tiled_windows_without_a_monitor_are_stacked_once() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.state.insert_window(Window::new(WindowHandle(1), None));
        manager.state.insert_window(Window::new(WindowHandle(2), None));
        manager.state.insert_window(floating(3));
        manager.state.workspace_mut().windows[1].monitor = 7;
        let order = manager.state.stacking_order();
        assert_eq!(order, vec![WindowHandle(1), WindowHandle(2), WindowHandle(3)]);
    }

    #[test]
    fn dragged_window_is_raised_over_managed_windows() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.state.insert_window(Window::new(WindowHandle(1), None));
        manager.state.insert_window(floating(2));
        manager.state.mode = Mode::MovingWindow(Drag {
            handle: WindowHandle(1),
            button: Button::Button1,
            pointer: (0, 0),
            origin: Xyhw::default(),
        });
        let order = manager.state.stacking_order();
        assert_eq!(order, vec![WindowHandle(2), WindowHandle(1)]);
    }
}
