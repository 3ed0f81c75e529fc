//! Xlib calls related to a keyboard.
use super::XlibError;
use crate::XWrap;
use std::ffi::{CStr, CString};
use std::os::raw::{c_uint, c_ulong};
use x11_dl::xlib;

impl XWrap {
    /// Grabs the keysym with the modifier for a window.
    // `XKeysymToKeycode`: https://tronche.com/gui/x/xlib/utilities/keyboard/XKeysymToKeycode.html
    // `XGrabKey`: https://tronche.com/gui/x/xlib/input/XGrabKey.html
    pub fn grab_keys(&self, root: xlib::Window, keysym: c_ulong, modifiers: c_uint) {
        let code = unsafe { (self.xlib.XKeysymToKeycode)(self.display, keysym) };
        if code == 0 {
            return;
        }
        // Grab the keys with and without numlock (Mod2).
        let mods = [
            modifiers,
            modifiers | xlib::Mod2Mask,
            modifiers | xlib::LockMask,
            modifiers | xlib::Mod2Mask | xlib::LockMask,
        ];
        for m in &mods {
            unsafe {
                (self.xlib.XGrabKey)(
                    self.display,
                    i32::from(code),
                    *m,
                    root,
                    1,
                    xlib::GrabModeAsync,
                    xlib::GrabModeAsync,
                );
            }
        }
    }

    /// Drops every key grab and grabs the configured chords again.
    // `XUngrabKey`: https://tronche.com/gui/x/xlib/input/XUngrabKey.html
    pub fn reset_grabs(&self) {
        unsafe {
            (self.xlib.XUngrabKey)(self.display, xlib::AnyKey, xlib::AnyModifier, self.root);
        }

        for kb in &self.keybinds {
            match self.string_to_keysym(&kb.key) {
                Some(keysym) => {
                    self.grab_keys(self.root, keysym, c_uint::from(kb.modifier.bits()));
                }
                None => tracing::warn!("Unknown key {:?} in a binding", kb.key),
            }
        }
    }

    /// Updates the keyboard mapping.
    /// # Errors
    ///
    /// Will error if updating the keyboard failed.
    // `XRefreshKeyboardMapping`: https://tronche.com/gui/x/xlib/utilities/keyboard/XRefreshKeyboardMapping.html
    pub fn refresh_keyboard(&self, evt: &mut xlib::XMappingEvent) -> Result<(), XlibError> {
        let status = unsafe { (self.xlib.XRefreshKeyboardMapping)(evt) };
        if status == 0 {
            Err(XlibError::FailedStatus)
        } else {
            Ok(())
        }
    }

    /// The name of the unshifted keysym on a keycode, as `XKeysymToString` spells it.
    // `XkbKeycodeToKeysym`: https://linux.die.net/man/3/xkbkeycodetokeysym
    // `XKeysymToString`: https://tronche.com/gui/x/xlib/utilities/keyboard/XKeysymToString.html
    #[must_use]
    pub fn keycode_to_name(&self, keycode: c_uint) -> Option<String> {
        // Not using XKeycodeToKeysym because deprecated.
        let sym = unsafe { (self.xlib.XkbKeycodeToKeysym)(self.display, keycode as u8, 0, 0) };
        if sym == 0 {
            return None;
        }
        let name = unsafe { (self.xlib.XKeysymToString)(sym) };
        if name.is_null() {
            return None;
        }
        Some(unsafe { CStr::from_ptr(name) }.to_string_lossy().into_owned())
    }

    // `XStringToKeysym`: https://tronche.com/gui/x/xlib/utilities/keyboard/XStringToKeysym.html
    fn string_to_keysym(&self, name: &str) -> Option<c_ulong> {
        let name = CString::new(name).ok()?;
        let sym = unsafe { (self.xlib.XStringToKeysym)(name.as_ptr()) };
        (sym != 0).then_some(sym)
    }
}
