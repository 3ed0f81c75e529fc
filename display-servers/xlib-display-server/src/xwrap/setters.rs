//! Writes to window properties and window configuration.
use crate::XWrap;
use std::ffi::CString;
use std::os::raw::{c_long, c_ulong};
use x11_dl::xlib;

impl XWrap {
    fn change_property_long(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
        mode: i32,
        data: &[c_long],
    ) {
        unsafe {
            (self.xlib.XChangeProperty)(
                self.display,
                window,
                property,
                r#type,
                32,
                mode,
                data.as_ptr().cast::<u8>(),
                data.len() as i32,
            );
        }
    }

    pub fn append_property_long(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
        data: &[c_long],
    ) {
        self.change_property_long(window, property, r#type, xlib::PropModeAppend, data);
    }

    pub fn replace_property_long(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
        data: &[c_long],
    ) {
        self.change_property_long(window, property, r#type, xlib::PropModeReplace, data);
    }

    pub fn delete_property(&self, window: xlib::Window, property: xlib::Atom) {
        unsafe { (self.xlib.XDeleteProperty)(self.display, window, property) };
    }

    /// Rewrites `_NET_CLIENT_LIST` from the windows we manage.
    pub fn set_client_list(&self) {
        let clients: Vec<c_long> = self.managed_windows.iter().map(|&w| w as c_long).collect();
        self.replace_property_long(self.root, self.atoms.NetClientList, xlib::XA_WINDOW, &clients);
    }

    pub fn set_current_desktop(&self, index: usize) {
        self.set_desktop_prop(&[index as u32], self.atoms.NetCurrentDesktop);
    }

    /// Writes CARDINALs on the root window.
    pub fn set_desktop_prop(&self, data: &[u32], atom: c_ulong) {
        let values: Vec<c_long> = data.iter().map(|&v| v as c_long).collect();
        self.replace_property_long(self.root, atom, xlib::XA_CARDINAL, &values);
    }

    pub fn set_desktop_prop_c_ulong(&self, value: c_ulong, atom: c_ulong, r#type: c_ulong) {
        self.replace_property_long(self.root, atom, r#type, &[value as c_long]);
    }

    /// Writes an 8 bit string property on the root window. Strings with interior nul
    /// bytes are skipped.
    pub fn set_desktop_prop_string(&self, value: &str, atom: c_ulong, encoding: xlib::Atom) {
        let Ok(text) = CString::new(value) else {
            return;
        };
        unsafe {
            (self.xlib.XChangeProperty)(
                self.display,
                self.root,
                atom,
                encoding,
                8,
                xlib::PropModeReplace,
                text.as_ptr().cast::<u8>(),
                value.len() as i32,
            );
        }
    }

    /// `_NET_ACTIVE_WINDOW`, zero when nothing has the focus.
    pub fn set_active_window(&self, window: Option<xlib::Window>) {
        let value = window.map_or(0, |w| w as c_long);
        self.replace_property_long(self.root, self.atoms.NetActiveWindow, xlib::XA_WINDOW, &[value]);
    }

    /// Adds `atom` to `_NET_WM_STATE` of a window or takes it out.
    pub fn set_state(&self, window: xlib::Window, present: bool, atom: xlib::Atom) {
        let mut states = self.get_window_states_atoms(window);
        if states.contains(&atom) == present {
            return;
        }
        if present {
            states.push(atom);
        } else {
            states.retain(|&s| s != atom);
        }
        self.set_window_states_atoms(window, &states);
    }

    /// Borders are always drawn opaque.
    pub fn set_window_border_color(&self, window: xlib::Window, color: c_ulong) {
        let opaque = color | 0xff00_0000;
        unsafe { (self.xlib.XSetWindowBorder)(self.display, window, opaque) };
    }

    pub fn set_window_config(
        &self,
        window: xlib::Window,
        mut changes: xlib::XWindowChanges,
        value_mask: u32,
    ) {
        unsafe { (self.xlib.XConfigureWindow)(self.display, window, value_mask, &mut changes) };
    }

    /// `_NET_WM_DESKTOP` of a window.
    pub fn set_window_desktop(&self, window: xlib::Window, index: usize) {
        self.replace_property_long(
            window,
            self.atoms.NetWMDesktop,
            xlib::XA_CARDINAL,
            &[index as c_long],
        );
    }

    pub fn set_window_states_atoms(&self, window: xlib::Window, states: &[xlib::Atom]) {
        let values: Vec<c_long> = states.iter().map(|&a| a as c_long).collect();
        self.replace_property_long(window, self.atoms.NetWMState, xlib::XA_ATOM, &values);
    }

    /// ICCCM `WM_STATE`, the property is its own type.
    pub fn set_wm_states(&self, window: xlib::Window, states: &[c_long]) {
        self.replace_property_long(window, self.atoms.WMState, self.atoms.WMState, states);
    }
}
