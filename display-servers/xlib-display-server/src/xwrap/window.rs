//! Per-window requests: adopting, showing, hiding, focusing and closing clients.
use super::{
    ICONIC_STATE, NORMAL_STATE, ROOT_EVENT_MASK, WITHDRAWN_STATE, on_error_from_xlib,
    on_error_from_xlib_dummy,
};
use crate::{XWrap, XlibWindowHandle};
use nwm_core::models::{Window, WindowHandle, Xyhw};
use std::os::raw::{c_long, c_ulong};
use x11_dl::xlib;

impl XWrap {
    /// Reads what placement needs to know about a new client. Override-redirect windows and
    /// windows we already manage give `None`.
    #[must_use]
    pub fn setup_window(&self, window: xlib::Window) -> Option<Window<XlibWindowHandle>> {
        let attrs = self.get_window_attrs(window).ok()?;
        if attrs.override_redirect != 0 || self.managed_windows.contains(&window) {
            return None;
        }
        let mut client = Window::new(
            WindowHandle(XlibWindowHandle(window)),
            self.get_window_name(window),
        );
        client.r#type = self.get_window_type(window);
        client.transient = self
            .get_transient_for(window)
            .map(|parent| WindowHandle(XlibWindowHandle(parent)));
        client.never_focus = self.get_never_focus(window);
        client.fixed_size = self.get_fixed_size(window);
        // where the client asked to be, floating windows keep it
        client.geometry = Xyhw::new(attrs.x, attrs.y, attrs.width, attrs.height);
        Some(client)
    }

    /// Starts managing a window the core accepted.
    pub fn setup_managed_window(&mut self, handle: xlib::Window, floating: bool) {
        self.subscribe_to_window_events(handle);
        if !self.managed_windows.contains(&handle) {
            self.managed_windows.push(handle);
        }
        self.append_property_long(
            self.root,
            self.atoms.NetClientList,
            xlib::XA_WINDOW,
            &[handle as c_long],
        );

        // Pagers expect `_NET_WM_STATE` on every managed window, even an empty one.
        let states = self.get_window_states_atoms(handle);
        self.set_window_states_atoms(handle, &states);

        let pixel = if floating {
            self.colors.floating
        } else {
            self.colors.normal
        };
        self.set_window_border_color(handle, pixel);
        self.grab_mouse_clicks(handle, handle == self.focused_window);
    }

    pub fn map_unmanaged(&self, handle: xlib::Window) {
        unsafe { (self.xlib.XMapWindow)(self.display, handle) };
    }

    /// Forgets a window. An unmapped one still exists, so its grabs go and it is marked
    /// withdrawn. A destroyed one can't be touched anymore.
    pub fn teardown_managed_window(&mut self, handle: xlib::Window, destroyed: bool) {
        let was_managed = self.managed_windows.contains(&handle);
        self.managed_windows.retain(|&w| w != handle);
        if self.focused_window == handle {
            self.focused_window = self.root;
        }
        if !was_managed {
            return;
        }
        if !destroyed {
            unsafe {
                (self.xlib.XGrabServer)(self.display);
                (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib_dummy));
            }
            self.ungrab_buttons(handle);
            self.set_wm_states(handle, &[WITHDRAWN_STATE]);
            self.sync();
            unsafe {
                (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib));
                (self.xlib.XUngrabServer)(self.display);
            }
        }
        self.set_client_list();
    }

    /// Pushes geometry, border and visibility of a window to the server.
    pub fn update_window(&self, window: &Window<XlibWindowHandle>) {
        let WindowHandle(XlibWindowHandle(handle)) = window.handle;
        let visible = window.visible();
        if visible {
            let changes = xlib::XWindowChanges {
                x: window.x(),
                y: window.y(),
                width: window.width(),
                height: window.height(),
                border_width: window.border(),
                sibling: 0,
                stack_mode: 0,
            };
            let mask = xlib::CWX | xlib::CWY | xlib::CWWidth | xlib::CWHeight | xlib::CWBorderWidth;
            self.set_window_config(handle, changes, u32::from(mask));
            self.configure_window(window);
            self.set_window_border_color(handle, self.border_color(window));
        }
        // Remapping what is already mapped makes task bars flicker.
        let wanted = if visible { NORMAL_STATE } else { ICONIC_STATE };
        if self.get_wm_state(handle) != Some(wanted) {
            self.toggle_window_visibility(handle, visible);
        }
    }

    fn border_color(&self, window: &Window<XlibWindowHandle>) -> c_ulong {
        let WindowHandle(XlibWindowHandle(handle)) = window.handle;
        match (handle == self.focused_window, window.is_floating()) {
            (true, _) => self.colors.active,
            (false, true) => self.colors.floating,
            (false, false) => self.colors.normal,
        }
    }

    /// Maps or unmaps a window and records it in `WM_STATE`. Workspaces that aren't shown
    /// keep their windows iconic.
    pub fn toggle_window_visibility(&self, window: xlib::Window, visible: bool) {
        // The unmap we cause must not look like the client withdrawing.
        self.select_root_input(ROOT_EVENT_MASK & !xlib::SubstructureNotifyMask);
        if visible {
            self.set_wm_states(window, &[NORMAL_STATE]);
            unsafe { (self.xlib.XMapWindow)(self.display, window) };
            self.grab_mouse_clicks(window, window == self.focused_window);
        } else {
            self.ungrab_buttons(window);
            unsafe { (self.xlib.XUnmapWindow)(self.display, window) };
            self.set_wm_states(window, &[ICONIC_STATE]);
        }
        self.select_root_input(ROOT_EVENT_MASK);
    }

    fn select_root_input(&self, mask: c_long) {
        let mut attrs: xlib::XSetWindowAttributes = unsafe { std::mem::zeroed() };
        attrs.event_mask = mask;
        self.change_window_attributes(self.root, xlib::CWEventMask, attrs);
    }

    /// Moves the input focus to `window`, restoring the border and click grabs of the window
    /// that had it.
    pub fn window_take_focus(
        &mut self,
        window: &Window<XlibWindowHandle>,
        previous: Option<&Window<XlibWindowHandle>>,
    ) {
        let WindowHandle(XlibWindowHandle(handle)) = window.handle;
        self.focused_window = handle;
        if let Some(previous) = previous.filter(|p| p.handle != window.handle) {
            let WindowHandle(XlibWindowHandle(previous_handle)) = previous.handle;
            self.set_window_border_color(previous_handle, self.border_color(previous));
            self.grab_mouse_clicks(previous_handle, false);
        }
        self.grab_mouse_clicks(handle, true);
        self.set_window_border_color(handle, self.colors.active);
        self.focus(handle, window.never_focus);
        self.sync();
    }

    /// Gives `window` the input focus unless it refuses input, then offers `WM_TAKE_FOCUS`.
    pub fn focus(&self, window: xlib::Window, never_focus: bool) {
        if !never_focus {
            unsafe {
                (self.xlib.XSetInputFocus)(
                    self.display,
                    window,
                    xlib::RevertToPointerRoot,
                    xlib::CurrentTime,
                );
            }
            self.set_active_window(Some(window));
        }
        self.send_xevent_atom(window, self.atoms.WMTakeFocus);
    }

    /// Parks the focus on the root window.
    pub fn unfocus(&mut self, handle: Option<xlib::Window>, floating: bool) {
        if let Some(window) = handle {
            let pixel = if floating {
                self.colors.floating
            } else {
                self.colors.normal
            };
            self.set_window_border_color(window, pixel);
            self.grab_mouse_clicks(window, false);
        }
        self.focused_window = self.root;
        unsafe {
            (self.xlib.XSetInputFocus)(
                self.display,
                self.root,
                xlib::RevertToPointerRoot,
                xlib::CurrentTime,
            );
        }
        self.set_active_window(None);
    }

    /// Tells a client the geometry it ended up with, as ICCCM asks of a window manager that
    /// changed or refused a configure request.
    pub fn configure_window(&self, window: &Window<XlibWindowHandle>) {
        let WindowHandle(XlibWindowHandle(handle)) = window.handle;
        let mut notify: xlib::XConfigureEvent = unsafe { std::mem::zeroed() };
        notify.type_ = xlib::ConfigureNotify;
        notify.display = self.display;
        notify.event = handle;
        notify.window = handle;
        notify.x = window.x();
        notify.y = window.y();
        notify.width = window.width();
        notify.height = window.height();
        notify.border_width = window.border();
        let mut event: xlib::XEvent = notify.into();
        self.send_xevent(handle, 0, xlib::StructureNotifyMask, &mut event);
    }

    pub fn change_window_attributes(
        &self,
        window: xlib::Window,
        mask: c_ulong,
        mut attrs: xlib::XSetWindowAttributes,
    ) {
        unsafe {
            (self.xlib.XChangeWindowAttributes)(self.display, window, mask, &mut attrs);
        }
    }

    /// Restacks siblings, the first one ends up on top.
    pub fn restack(&self, mut windows: Vec<xlib::Window>) {
        if windows.is_empty() {
            return;
        }
        let count = windows.len() as i32;
        unsafe {
            (self.xlib.XRestackWindows)(self.display, windows.as_mut_ptr(), count);
        }
    }

    /// Asks a window to close through `WM_DELETE_WINDOW`. Clients that don't speak the
    /// protocol are left running.
    pub fn kill_window(&self, window: xlib::Window) {
        if !self.send_xevent_atom(window, self.atoms.WMDelete) {
            tracing::debug!("Window {} does not support WM_DELETE_WINDOW", window);
        }
    }

    /// Whether a window is an unmanaged one that belongs above everything else, like an
    /// override-redirect popup.
    pub fn is_override_redirect(&self, window: xlib::Window) -> bool {
        self.get_window_attrs(window)
            .is_ok_and(|attrs| attrs.override_redirect != 0 && attrs.map_state == xlib::IsViewable)
    }

    pub fn subscribe_to_event(&self, window: xlib::Window, mask: c_long) {
        unsafe { (self.xlib.XSelectInput)(self.display, window, mask) };
    }

    /// Pointer crossings, focus changes and property updates of a managed window.
    pub fn subscribe_to_window_events(&self, window: xlib::Window) {
        self.subscribe_to_event(
            window,
            xlib::EnterWindowMask | xlib::FocusChangeMask | xlib::PropertyChangeMask,
        );
    }
}
