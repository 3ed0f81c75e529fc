//! Session values live in `_NWM_*` properties, so they outlast the process that wrote them.
use crate::{XlibDisplayServer, XlibWindowHandle};
use nwm_core::models::WindowHandle;
use nwm_core::{PropertyStore, SessionKey};
use std::os::raw::c_long;
use x11_dl::xlib;

// Format 32 properties only carry 32 bits, which is plenty for the session encoding.
fn to_longs(values: &[i64]) -> Vec<c_long> {
    values.iter().map(|&v| c_long::from(v as i32)).collect()
}

fn from_longs(values: Vec<c_long>) -> Vec<i64> {
    values.into_iter().map(|v| i64::from(v as i32)).collect()
}

impl XlibDisplayServer {
    fn read(&self, window: xlib::Window, key: SessionKey) -> Option<Vec<i64>> {
        let atom = self.xw.atoms.session(key);
        self.xw
            .get_property_longs(window, atom, xlib::XA_INTEGER)
            .map(from_longs)
    }

    fn write(&self, window: xlib::Window, key: SessionKey, values: &[i64]) {
        let atom = self.xw.atoms.session(key);
        let data = to_longs(values);
        self.xw
            .replace_property_long(window, atom, xlib::XA_INTEGER, &data);
    }
}

impl PropertyStore<XlibWindowHandle> for XlibDisplayServer {
    fn read_root(&self, key: SessionKey) -> Option<Vec<i64>> {
        self.read(self.root, key)
    }

    fn write_root(&mut self, key: SessionKey, values: &[i64]) {
        self.write(self.root, key, values);
    }

    fn delete_root(&mut self, key: SessionKey) {
        self.xw.delete_property(self.root, self.xw.atoms.session(key));
    }

    fn read_window(
        &self,
        handle: WindowHandle<XlibWindowHandle>,
        key: SessionKey,
    ) -> Option<Vec<i64>> {
        let WindowHandle(XlibWindowHandle(window)) = handle;
        self.read(window, key)
    }

    fn write_window(
        &mut self,
        handle: WindowHandle<XlibWindowHandle>,
        key: SessionKey,
        values: &[i64],
    ) {
        let WindowHandle(XlibWindowHandle(window)) = handle;
        self.write(window, key, values);
    }

    fn delete_window(&mut self, handle: WindowHandle<XlibWindowHandle>, key: SessionKey) {
        let WindowHandle(XlibWindowHandle(window)) = handle;
        self.xw.delete_property(window, self.xw.atoms.session(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_values_survive_the_32_bit_trip() {
        let stored = to_longs(&[-1, 0, 42, -300]);
        // What the server hands back for a 32 bit item is not sign extended.
        let fetched: Vec<c_long> = stored.iter().map(|&v| c_long::from(v as u32)).collect();
        assert_eq!(from_longs(fetched), vec![-1, 0, 42, -300]);
    }
}
