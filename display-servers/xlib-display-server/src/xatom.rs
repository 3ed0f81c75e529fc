use nwm_core::SessionKey;
use std::ffi::CString;
use x11_dl::xlib;

/// Atoms interned once at startup: ICCCM, the EWMH subset we advertise, and our own
/// `_NWM_*` properties.
#[derive(Clone, Debug)]
#[allow(non_snake_case)]
pub struct XAtom {
    pub WMProtocols: xlib::Atom,
    pub WMDelete: xlib::Atom,
    pub WMState: xlib::Atom,
    pub WMTakeFocus: xlib::Atom,
    pub NetActiveWindow: xlib::Atom,
    pub NetSupported: xlib::Atom,
    pub NetWMName: xlib::Atom,
    pub NetWMState: xlib::Atom,
    pub NetWMStateFullscreen: xlib::Atom,
    pub NetCloseWindow: xlib::Atom,

    pub NetWMWindowType: xlib::Atom,
    pub NetWMWindowTypeDesktop: xlib::Atom,
    pub NetWMWindowTypeDock: xlib::Atom,
    pub NetWMWindowTypeToolbar: xlib::Atom,
    pub NetWMWindowTypeMenu: xlib::Atom,
    pub NetWMWindowTypeUtility: xlib::Atom,
    pub NetWMWindowTypeSplash: xlib::Atom,
    pub NetWMWindowTypeDialog: xlib::Atom,
    pub NetWMWindowTypeDropdownMenu: xlib::Atom,
    pub NetWMWindowTypePopupMenu: xlib::Atom,
    pub NetWMWindowTypeTooltip: xlib::Atom,
    pub NetWMWindowTypeNotification: xlib::Atom,
    pub NetWMWindowTypeCombo: xlib::Atom,
    pub NetWMWindowTypeDnd: xlib::Atom,

    pub NetSupportingWmCheck: xlib::Atom,
    pub NetClientList: xlib::Atom,
    pub NetNumberOfDesktops: xlib::Atom,
    pub NetCurrentDesktop: xlib::Atom,
    pub NetDesktopNames: xlib::Atom,
    pub NetWMDesktop: xlib::Atom,

    pub UTF8String: xlib::Atom,

    pub NwmLayout: xlib::Atom,
    pub NwmRestart: xlib::Atom,
    pub NwmGapsEnabled: xlib::Atom,
    pub NwmMasterFactor: xlib::Atom,
    pub NwmCurrentWorkspace: xlib::Atom,
    pub NwmLayouts: xlib::Atom,
    pub NwmScrollOffsets: xlib::Atom,
    pub NwmWorkspace: xlib::Atom,
    pub NwmFloating: xlib::Atom,
    pub NwmFullscreen: xlib::Atom,
}

impl XAtom {
    pub fn net_supported(&self) -> Vec<xlib::Atom> {
        vec![
            self.NetActiveWindow,
            self.NetSupported,
            self.NetWMName,
            self.NetWMState,
            self.NetWMStateFullscreen,
            self.NetCloseWindow,
            self.NetWMWindowType,
            self.NetWMWindowTypeDesktop,
            self.NetWMWindowTypeDock,
            self.NetWMWindowTypeToolbar,
            self.NetWMWindowTypeMenu,
            self.NetWMWindowTypeUtility,
            self.NetWMWindowTypeSplash,
            self.NetWMWindowTypeDialog,
            self.NetWMWindowTypeDropdownMenu,
            self.NetWMWindowTypePopupMenu,
            self.NetWMWindowTypeTooltip,
            self.NetWMWindowTypeNotification,
            self.NetWMWindowTypeCombo,
            self.NetWMWindowTypeDnd,
            self.NetSupportingWmCheck,
            self.NetClientList,
            self.NetNumberOfDesktops,
            self.NetCurrentDesktop,
            self.NetDesktopNames,
            self.NetWMDesktop,
        ]
    }

    /// The atom a saved session value is kept under.
    pub const fn session(&self, key: SessionKey) -> xlib::Atom {
        match key {
            SessionKey::Restart => self.NwmRestart,
            SessionKey::GapsEnabled => self.NwmGapsEnabled,
            SessionKey::MasterFactor => self.NwmMasterFactor,
            SessionKey::CurrentWorkspace => self.NwmCurrentWorkspace,
            SessionKey::Layouts => self.NwmLayouts,
            SessionKey::ScrollOffsets => self.NwmScrollOffsets,
            SessionKey::Workspace => self.NwmWorkspace,
            SessionKey::Floating => self.NwmFloating,
            SessionKey::Fullscreen => self.NwmFullscreen,
        }
    }

    pub const fn get_name(&self, atom: xlib::Atom) -> &str {
        match atom {
            a if a == self.WMProtocols => "WM_PROTOCOLS",
            a if a == self.WMDelete => "WM_DELETE_WINDOW",
            a if a == self.WMState => "WM_STATE",
            a if a == self.WMTakeFocus => "WM_TAKE_FOCUS",
            a if a == self.NetActiveWindow => "_NET_ACTIVE_WINDOW",
            a if a == self.NetSupported => "_NET_SUPPORTED",
            a if a == self.NetWMName => "_NET_WM_NAME",
            a if a == self.NetWMState => "_NET_WM_STATE",
            a if a == self.NetWMStateFullscreen => "_NET_WM_STATE_FULLSCREEN",
            a if a == self.NetCloseWindow => "_NET_CLOSE_WINDOW",
            a if a == self.NetWMWindowType => "_NET_WM_WINDOW_TYPE",
            a if a == self.NetClientList => "_NET_CLIENT_LIST",
            a if a == self.NetNumberOfDesktops => "_NET_NUMBER_OF_DESKTOPS",
            a if a == self.NetCurrentDesktop => "_NET_CURRENT_DESKTOP",
            a if a == self.NetDesktopNames => "_NET_DESKTOP_NAMES",
            a if a == self.NetWMDesktop => "_NET_WM_DESKTOP",
            a if a == self.UTF8String => "UTF8_STRING",
            a if a == self.NwmLayout => "_NWM_LAYOUT",
            _ => "(UNKNOWN)",
        }
    }

    pub fn new(xlib: &xlib::Xlib, dpy: *mut xlib::Display) -> Self {
        Self {
            WMProtocols: intern(xlib, dpy, "WM_PROTOCOLS"),
            WMDelete: intern(xlib, dpy, "WM_DELETE_WINDOW"),
            WMState: intern(xlib, dpy, "WM_STATE"),
            WMTakeFocus: intern(xlib, dpy, "WM_TAKE_FOCUS"),
            NetActiveWindow: intern(xlib, dpy, "_NET_ACTIVE_WINDOW"),
            NetSupported: intern(xlib, dpy, "_NET_SUPPORTED"),
            NetWMName: intern(xlib, dpy, "_NET_WM_NAME"),
            NetWMState: intern(xlib, dpy, "_NET_WM_STATE"),
            NetWMStateFullscreen: intern(xlib, dpy, "_NET_WM_STATE_FULLSCREEN"),
            NetCloseWindow: intern(xlib, dpy, "_NET_CLOSE_WINDOW"),

            NetWMWindowType: intern(xlib, dpy, "_NET_WM_WINDOW_TYPE"),
            NetWMWindowTypeDesktop: intern(xlib, dpy, "_NET_WM_WINDOW_TYPE_DESKTOP"),
            NetWMWindowTypeDock: intern(xlib, dpy, "_NET_WM_WINDOW_TYPE_DOCK"),
            NetWMWindowTypeToolbar: intern(xlib, dpy, "_NET_WM_WINDOW_TYPE_TOOLBAR"),
            NetWMWindowTypeMenu: intern(xlib, dpy, "_NET_WM_WINDOW_TYPE_MENU"),
            NetWMWindowTypeUtility: intern(xlib, dpy, "_NET_WM_WINDOW_TYPE_UTILITY"),
            NetWMWindowTypeSplash: intern(xlib, dpy, "_NET_WM_WINDOW_TYPE_SPLASH"),
            NetWMWindowTypeDialog: intern(xlib, dpy, "_NET_WM_WINDOW_TYPE_DIALOG"),
            NetWMWindowTypeDropdownMenu: intern(xlib, dpy, "_NET_WM_WINDOW_TYPE_DROPDOWN_MENU"),
            NetWMWindowTypePopupMenu: intern(xlib, dpy, "_NET_WM_WINDOW_TYPE_POPUP_MENU"),
            NetWMWindowTypeTooltip: intern(xlib, dpy, "_NET_WM_WINDOW_TYPE_TOOLTIP"),
            NetWMWindowTypeNotification: intern(xlib, dpy, "_NET_WM_WINDOW_TYPE_NOTIFICATION"),
            NetWMWindowTypeCombo: intern(xlib, dpy, "_NET_WM_WINDOW_TYPE_COMBO"),
            NetWMWindowTypeDnd: intern(xlib, dpy, "_NET_WM_WINDOW_TYPE_DND"),

            NetSupportingWmCheck: intern(xlib, dpy, "_NET_SUPPORTING_WM_CHECK"),
            NetClientList: intern(xlib, dpy, "_NET_CLIENT_LIST"),
            NetNumberOfDesktops: intern(xlib, dpy, "_NET_NUMBER_OF_DESKTOPS"),
            NetCurrentDesktop: intern(xlib, dpy, "_NET_CURRENT_DESKTOP"),
            NetDesktopNames: intern(xlib, dpy, "_NET_DESKTOP_NAMES"),
            NetWMDesktop: intern(xlib, dpy, "_NET_WM_DESKTOP"),

            UTF8String: intern(xlib, dpy, "UTF8_STRING"),

            NwmLayout: intern(xlib, dpy, "_NWM_LAYOUT"),
            NwmRestart: intern(xlib, dpy, SessionKey::Restart.atom_name()),
            NwmGapsEnabled: intern(xlib, dpy, SessionKey::GapsEnabled.atom_name()),
            NwmMasterFactor: intern(xlib, dpy, SessionKey::MasterFactor.atom_name()),
            NwmCurrentWorkspace: intern(xlib, dpy, SessionKey::CurrentWorkspace.atom_name()),
            NwmLayouts: intern(xlib, dpy, SessionKey::Layouts.atom_name()),
            NwmScrollOffsets: intern(xlib, dpy, SessionKey::ScrollOffsets.atom_name()),
            NwmWorkspace: intern(xlib, dpy, SessionKey::Workspace.atom_name()),
            NwmFloating: intern(xlib, dpy, SessionKey::Floating.atom_name()),
            NwmFullscreen: intern(xlib, dpy, SessionKey::Fullscreen.atom_name()),
        }
    }
}

fn intern(xlib: &xlib::Xlib, dpy: *mut xlib::Display, name: &str) -> xlib::Atom {
    let name = CString::new(name).unwrap_or_default();
    unsafe { (xlib.XInternAtom)(dpy, name.as_ptr(), xlib::False) }
}
