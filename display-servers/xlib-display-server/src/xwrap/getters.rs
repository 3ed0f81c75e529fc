//! Queries against the server: window properties, the window tree, the pointer and outputs.
use super::{MAX_PROPERTY_VALUE_LEN, XlibError};
use crate::{XWrap, XlibWindowHandle};
use nwm_core::models::{Output, WindowHandle, WindowType, Xyhw};
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_long, c_uchar, c_uint, c_ulong};
use std::{ptr, slice};
use x11_dl::xlib;
use x11_dl::xrandr::Xrandr;

impl XWrap {
    /// Top level windows, bottom of the stack first.
    ///
    /// # Errors
    ///
    /// Errors when the server refuses the tree query.
    pub fn get_all_windows(&self) -> Result<Vec<xlib::Window>, XlibError> {
        let (mut root, mut parent): (xlib::Window, xlib::Window) = (0, 0);
        let mut children: *mut xlib::Window = ptr::null_mut();
        let mut count: c_uint = 0;
        let status = unsafe {
            (self.xlib.XQueryTree)(
                self.display,
                self.root,
                &mut root,
                &mut parent,
                &mut children,
                &mut count,
            )
        };
        if status == 0 {
            return Err(XlibError::FailedStatus);
        }
        if children.is_null() {
            return Ok(Vec::new());
        }
        let windows = unsafe { slice::from_raw_parts(children, count as usize) }.to_vec();
        unsafe { (self.xlib.XFree)(children.cast()) };
        Ok(windows)
    }

    /// Returns the pixel value of a named or `#rrggbb` color.
    #[must_use]
    pub fn get_color(&self, color: &str) -> c_ulong {
        let name = CString::new(color).unwrap_or_default();
        unsafe {
            let screen = (self.xlib.XDefaultScreen)(self.display);
            let cmap: xlib::Colormap = (self.xlib.XDefaultColormap)(self.display, screen);
            let mut color: xlib::XColor = std::mem::zeroed();
            let mut exact: xlib::XColor = std::mem::zeroed();
            if (self.xlib.XAllocNamedColor)(self.display, cmap, name.as_ptr(), &mut color, &mut exact)
                == 0
            {
                tracing::warn!("Unable to allocate color {:?}", name);
            }
            color.pixel
        }
    }

    /// Returns the current position of the cursor in root coordinates.
    /// # Errors
    ///
    /// Will error if the pointer is not on the root window's screen.
    pub fn get_cursor_point(&self) -> Result<(i32, i32), XlibError> {
        let (mut root, mut child): (xlib::Window, xlib::Window) = (0, 0);
        let (mut x, mut y): (c_int, c_int) = (0, 0);
        let (mut local_x, mut local_y): (c_int, c_int) = (0, 0);
        let mut buttons: c_uint = 0;
        let same_screen = unsafe {
            (self.xlib.XQueryPointer)(
                self.display,
                self.root,
                &mut root,
                &mut child,
                &mut x,
                &mut y,
                &mut local_x,
                &mut local_y,
                &mut buttons,
            )
        };
        if same_screen == xlib::False {
            return Err(XlibError::RootWindowNotFound);
        }
        Ok((x, y))
    }

    #[must_use]
    pub const fn get_default_root_handle(&self) -> WindowHandle<XlibWindowHandle> {
        WindowHandle(XlibWindowHandle(self.root))
    }

    #[must_use]
    pub const fn get_default_root(&self) -> xlib::Window {
        self.root
    }

    /// Blocks until an event is queued. Callers check `queue_len` first.
    #[must_use]
    pub fn get_next_event(&self) -> xlib::XEvent {
        let mut event: xlib::XEvent = unsafe { std::mem::zeroed() };
        unsafe { (self.xlib.XNextEvent)(self.display, &mut event) };
        event
    }

    /// Returns the connected outputs.
    ///
    /// RandR is preferred since only it names outputs, then Xinerama, then the root window
    /// itself.
    #[must_use]
    pub fn get_outputs(&self) -> Vec<Output> {
        let randr = Xrandr::open()
            .map(|xrandr| unsafe { self.get_randr_outputs(&xrandr) })
            .unwrap_or_default();
        if !randr.is_empty() {
            return randr;
        }
        let xinerama = self.get_xinerama_outputs();
        if !xinerama.is_empty() {
            return xinerama;
        }
        self.get_window_attrs(self.root)
            .map(|root| {
                let bbox = Xyhw::new(root.x, root.y, root.width, root.height);
                vec![Output::new("default", bbox)]
            })
            .unwrap_or_default()
    }

    fn get_xinerama_outputs(&self) -> Vec<Output> {
        let Ok(xinerama) = x11_dl::xinerama::Xlib::open() else {
            return Vec::new();
        };
        if unsafe { (xinerama.XineramaIsActive)(self.display) } == 0 {
            return Vec::new();
        }
        let mut count = 0;
        let screens = unsafe { (xinerama.XineramaQueryScreens)(self.display, &mut count) };
        if screens.is_null() {
            return Vec::new();
        }
        let outputs = unsafe { slice::from_raw_parts(screens, count as usize) }
            .iter()
            .map(|screen| {
                let bbox = Xyhw::new(
                    screen.x_org.into(),
                    screen.y_org.into(),
                    screen.width.into(),
                    screen.height.into(),
                );
                Output::new(format!("xinerama-{}", screen.screen_number), bbox)
            })
            .collect();
        unsafe { (self.xlib.XFree)(screens.cast()) };
        outputs
    }

    /// `WM_TRANSIENT_FOR`, the window a dialog belongs to.
    #[must_use]
    pub fn get_transient_for(&self, window: xlib::Window) -> Option<xlib::Window> {
        let mut parent: xlib::Window = 0;
        let status =
            unsafe { (self.xlib.XGetTransientForHint)(self.display, window, &mut parent) };
        (status != 0 && parent != 0).then_some(parent)
    }

    /// # Errors
    ///
    /// Errors when the window is gone.
    pub fn get_window_attrs(
        &self,
        window: xlib::Window,
    ) -> Result<xlib::XWindowAttributes, XlibError> {
        let mut attrs: xlib::XWindowAttributes = unsafe { std::mem::zeroed() };
        let status = unsafe { (self.xlib.XGetWindowAttributes)(self.display, window, &mut attrs) };
        if status == 0 {
            return Err(XlibError::FailedStatus);
        }
        Ok(attrs)
    }

    /// `_NET_WM_NAME`, falling back to the ICCCM `WM_NAME`.
    #[must_use]
    pub fn get_window_name(&self, window: xlib::Window) -> Option<String> {
        self.get_text_prop(window, self.atoms.NetWMName)
            .or_else(|_| self.get_text_prop(window, xlib::XA_WM_NAME))
            .ok()
    }

    /// The atoms in `_NET_WM_STATE`, empty when unset.
    #[must_use]
    pub fn get_window_states_atoms(&self, window: xlib::Window) -> Vec<xlib::Atom> {
        self.get_property_longs(window, self.atoms.NetWMState, xlib::XA_ATOM)
            .map(|values| values.into_iter().map(|atom| atom as xlib::Atom).collect())
            .unwrap_or_default()
    }

    /// The first `_NET_WM_WINDOW_TYPE` we know, `Normal` otherwise.
    #[must_use]
    pub fn get_window_type(&self, window: xlib::Window) -> WindowType {
        let atom = self
            .get_property_longs(window, self.atoms.NetWMWindowType, xlib::XA_ATOM)
            .and_then(|values| values.first().copied())
            .map(|atom| atom as xlib::Atom);
        let Some(atom) = atom else {
            return WindowType::Normal;
        };
        let atoms = &self.atoms;
        match atom {
            x if x == atoms.NetWMWindowTypeDesktop => WindowType::Desktop,
            x if x == atoms.NetWMWindowTypeDock => WindowType::Dock,
            x if x == atoms.NetWMWindowTypeToolbar => WindowType::Toolbar,
            x if x == atoms.NetWMWindowTypeMenu => WindowType::Menu,
            x if x == atoms.NetWMWindowTypeUtility => WindowType::Utility,
            x if x == atoms.NetWMWindowTypeSplash => WindowType::Splash,
            x if x == atoms.NetWMWindowTypeDialog => WindowType::Dialog,
            x if x == atoms.NetWMWindowTypeDropdownMenu => WindowType::DropdownMenu,
            x if x == atoms.NetWMWindowTypePopupMenu => WindowType::PopupMenu,
            x if x == atoms.NetWMWindowTypeTooltip => WindowType::Tooltip,
            x if x == atoms.NetWMWindowTypeNotification => WindowType::Notification,
            x if x == atoms.NetWMWindowTypeCombo => WindowType::Combo,
            x if x == atoms.NetWMWindowTypeDnd => WindowType::Dnd,
            _ => WindowType::Normal,
        }
    }

    #[must_use]
    pub fn get_wmhints(&self, window: xlib::Window) -> Option<xlib::XWMHints> {
        let raw = unsafe { (self.xlib.XGetWMHints)(self.display, window) };
        if raw.is_null() {
            return None;
        }
        let hints = unsafe { *raw };
        unsafe { (self.xlib.XFree)(raw.cast()) };
        Some(hints)
    }

    /// Whether the client refuses input focus through `WM_HINTS`.
    #[must_use]
    pub fn get_never_focus(&self, window: xlib::Window) -> bool {
        self.get_wmhints(window)
            .is_some_and(|hint| hint.flags & xlib::InputHint != 0 && hint.input == 0)
    }

    /// Whether `WM_NORMAL_HINTS` pin the minimum and maximum size to the same value.
    #[must_use]
    pub fn get_fixed_size(&self, window: xlib::Window) -> bool {
        let mut size: xlib::XSizeHints = unsafe { std::mem::zeroed() };
        let mut supplied: c_long = 0;
        let status =
            unsafe { (self.xlib.XGetWMNormalHints)(self.display, window, &mut size, &mut supplied) };
        if status == 0 {
            return false;
        }
        let has_min = size.flags & xlib::PMinSize != 0;
        let has_max = size.flags & xlib::PMaxSize != 0;
        has_min
            && has_max
            && size.max_width > 0
            && size.max_height > 0
            && size.max_width == size.min_width
            && size.max_height == size.min_height
    }

    /// The ICCCM `WM_STATE`, `None` for windows we never mapped.
    #[must_use]
    pub fn get_wm_state(&self, window: xlib::Window) -> Option<c_long> {
        self.get_property_longs(window, self.atoms.WMState, self.atoms.WMState)
            .and_then(|values| values.first().copied())
    }

    /// Returns a 32 bit property of a window. Xlib hands format 32 data back as longs.
    #[must_use]
    pub fn get_property_longs(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
    ) -> Option<Vec<c_long>> {
        let mut actual_type: xlib::Atom = 0;
        let mut format: c_int = 0;
        let mut count: c_ulong = 0;
        let mut remaining: c_ulong = 0;
        let mut data: *mut c_uchar = ptr::null_mut();
        let status = unsafe {
            (self.xlib.XGetWindowProperty)(
                self.display,
                window,
                property,
                0,
                MAX_PROPERTY_VALUE_LEN / 4,
                xlib::False,
                r#type,
                &mut actual_type,
                &mut format,
                &mut count,
                &mut remaining,
                &mut data,
            )
        };
        if status != c_int::from(xlib::Success) || data.is_null() {
            return None;
        }
        let values = (format == 32 && actual_type == r#type).then(|| {
            #[allow(clippy::cast_ptr_alignment)]
            let longs = data.cast::<c_long>();
            unsafe { slice::from_raw_parts(longs, count as usize) }.to_vec()
        });
        unsafe { (self.xlib.XFree)(data.cast()) };
        values
    }

    /// Names and geometries of the outputs driving a CRTC.
    unsafe fn get_randr_outputs(&self, xrandr: &Xrandr) -> Vec<Output> {
        unsafe {
            let resources = (xrandr.XRRGetScreenResources)(self.display, self.root);
            if resources.is_null() {
                return Vec::new();
            }
            let ids = slice::from_raw_parts((*resources).outputs, (*resources).noutput as usize);
            let mut found = Vec::with_capacity(ids.len());
            for &id in ids {
                let output = (xrandr.XRRGetOutputInfo)(self.display, resources, id);
                if output.is_null() {
                    continue;
                }
                if (*output).crtc != 0 {
                    let crtc = (xrandr.XRRGetCrtcInfo)(self.display, resources, (*output).crtc);
                    if !crtc.is_null() {
                        let name = CStr::from_ptr((*output).name).to_string_lossy().into_owned();
                        let bbox = Xyhw::new(
                            (*crtc).x,
                            (*crtc).y,
                            (*crtc).width as i32,
                            (*crtc).height as i32,
                        );
                        found.push(Output::new(name, bbox));
                        (xrandr.XRRFreeCrtcInfo)(crtc);
                    }
                }
                (xrandr.XRRFreeOutputInfo)(output);
            }
            (xrandr.XRRFreeScreenResources)(resources);
            found
        }
    }

    /// A text property as UTF-8, lossy.
    ///
    /// # Errors
    ///
    /// Errors when the window has no such property.
    fn get_text_prop(&self, window: xlib::Window, atom: xlib::Atom) -> Result<String, XlibError> {
        let mut property: xlib::XTextProperty = unsafe { std::mem::zeroed() };
        let status =
            unsafe { (self.xlib.XGetTextProperty)(self.display, window, &mut property, atom) };
        if status == 0 || property.value.is_null() {
            return Err(XlibError::FailedStatus);
        }
        let text = unsafe { CStr::from_ptr(property.value.cast::<c_char>()) }
            .to_string_lossy()
            .into_owned();
        unsafe { (self.xlib.XFree)(property.value.cast()) };
        Ok(text)
    }
}
