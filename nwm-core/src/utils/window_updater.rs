use crate::layouts::{self, LayoutMode, TileArea};
use crate::models::Handle;
use crate::state::State;

impl<H: Handle> State<H> {
    /*
     * step over every monitor and retile the active workspace's windows on it,
     * based on the new state of the WM
     */
    pub fn update_windows(&mut self) {
        let active = self.active_workspace;
        for ws in &mut self.workspaces {
            let visible = ws.id == active;
            ws.windows.iter_mut().for_each(|w| w.set_visible(visible));
        }

        let current = self.current_monitor();
        let border = self.settings.border_width;
        for monitor in self.monitors.clone() {
            let area = TileArea::new(monitor.bbox, &self.settings);
            let row = self.row(active, monitor.id);
            let ws = &mut self.workspaces[active];
            let count = ws.tiled_on(monitor.id).count();

            let rects = match monitor.layout {
                LayoutMode::MasterStack => layouts::master_stack(&area, monitor.master_factor, count),
                LayoutMode::HorizontalScroll => {
                    let (rects, offset) = layouts::horizontal_scroll(&area, row, count);
                    if monitor.id == current {
                        ws.scroll_offset = offset;
                    }
                    rects
                }
            };

            let tiled = ws
                .windows
                .iter_mut()
                .filter(|w| w.monitor == monitor.id && w.is_tiled());
            for (window, rect) in tiled.zip(rects) {
                window.geometry = rect;
                window.border = border;
            }

            // fullscreen windows cover the whole monitor, bar included
            ws.windows
                .iter_mut()
                .filter(|w| w.monitor == monitor.id && w.is_fullscreen())
                .for_each(|w| {
                    w.geometry = monitor.bbox;
                    w.border = 0;
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Manager, Output, Window, WindowHandle, Xyhw};

    #[test]
    fn tiling_twice_gives_identical_rectangles() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.outputs_changed_handler(vec![Output::new("A", Xyhw::new(0, 0, 1920, 1080))]);
        manager.state.settings.gaps_enabled = true;
        manager.state.settings.gap_size = 6;
        manager.state.settings.border_width = 3;
        for handle in 1..=4 {
            manager.state.insert_window(Window::new(WindowHandle(handle), None));
        }
        manager.state.update_windows();
        let first: Vec<Xyhw> = manager.state.windows().map(|w| w.geometry).collect();
        manager.state.update_windows();
        let second: Vec<Xyhw> = manager.state.windows().map(|w| w.geometry).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn bar_inset_is_taken_from_the_top() {
        let mut manager = Manager::new_test(vec!["1".to_owned()]);
        manager.outputs_changed_handler(vec![Output::new("A", Xyhw::new(0, 0, 1920, 1080))]);
        manager.state.settings.bar_visible = true;
        manager.state.settings.bar_height = 20;
        manager.state.insert_window(Window::new(WindowHandle(1), None));
        manager.state.update_windows();
        let window = manager.state.find_window(&WindowHandle(1)).map(|w| w.geometry);
        assert_eq!(window, Some(Xyhw::new(0, 20, 1920, 1060)));
    }

    #[test]
    fn windows_on_other_workspaces_are_hidden() {
        let mut manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned()]);
        let mut window = Window::new(WindowHandle(1), None);
        window.workspace = 1;
        manager.state.insert_window(window);
        manager.state.insert_window(Window::new(WindowHandle(2), None));
        manager.state.update_windows();
        let visible = |h| manager.state.find_window(&WindowHandle(h)).map(Window::visible);
        assert_eq!(visible(1), Some(false));
        assert_eq!(visible(2), Some(true));
    }
}
