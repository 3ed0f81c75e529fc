//! Session state that survives replacing the process.
//!
//! Everything is stored as integer arrays in properties the display server keeps for us: the
//! globals on the root window and a few tags on every managed window. [`SessionSnapshot`] and
//! [`WindowTags`] are the only places that know the encoding.
use crate::errors::{NwmError, Result};
use crate::layouts::LayoutMode;
use crate::models::{Handle, Window, WindowHandle, WorkspaceId};
use crate::state::State;

/// Bumped whenever the encoding below changes. A marker with another version is ignored.
pub const SCHEMA_VERSION: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Restart,
    GapsEnabled,
    MasterFactor,
    CurrentWorkspace,
    Layouts,
    ScrollOffsets,
    Workspace,
    Floating,
    Fullscreen,
}

impl SessionKey {
    pub const ROOT: [Self; 6] = [
        Self::Restart,
        Self::GapsEnabled,
        Self::MasterFactor,
        Self::CurrentWorkspace,
        Self::Layouts,
        Self::ScrollOffsets,
    ];
    pub const WINDOW: [Self; 3] = [Self::Workspace, Self::Floating, Self::Fullscreen];

    #[must_use]
    pub const fn atom_name(self) -> &'static str {
        match self {
            Self::Restart => "_NWM_RESTART",
            Self::GapsEnabled => "_NWM_GAPS_ENABLED",
            Self::MasterFactor => "_NWM_MASTER_FACTOR",
            Self::CurrentWorkspace => "_NWM_CURRENT_WORKSPACE",
            Self::Layouts => "_NWM_LAYOUTS",
            Self::ScrollOffsets => "_NWM_SCROLL_OFFSETS",
            Self::Workspace => "_NWM_WORKSPACE",
            Self::Floating => "_NWM_FLOATING",
            Self::Fullscreen => "_NWM_FULLSCREEN",
        }
    }
}

/// An integer key/value store held outside the process, on the root window and on client
/// windows.
pub trait PropertyStore<H: Handle> {
    fn read_root(&self, key: SessionKey) -> Option<Vec<i64>>;
    fn write_root(&mut self, key: SessionKey, values: &[i64]);
    fn delete_root(&mut self, key: SessionKey);

    fn read_window(&self, handle: WindowHandle<H>, key: SessionKey) -> Option<Vec<i64>>;
    fn write_window(&mut self, handle: WindowHandle<H>, key: SessionKey, values: &[i64]);
    fn delete_window(&mut self, handle: WindowHandle<H>, key: SessionKey);
}

fn malformed(key: SessionKey, reason: impl Into<String>) -> NwmError {
    NwmError::MalformedProperty {
        key: key.atom_name(),
        reason: reason.into(),
    }
}

fn scalar(key: SessionKey, values: Option<Vec<i64>>) -> Result<i64> {
    match values.as_deref() {
        Some([value]) => Ok(*value),
        Some(other) => Err(malformed(key, format!("expected 1 value, found {}", other.len()))),
        None => Err(malformed(key, "missing")),
    }
}

fn array(key: SessionKey, values: Option<Vec<i64>>, len: usize) -> Result<Vec<i64>> {
    match values {
        Some(values) if values.len() == len => Ok(values),
        Some(values) => Err(malformed(
            key,
            format!("expected {len} values, found {}", values.len()),
        )),
        None => Err(malformed(key, "missing")),
    }
}

fn workspace_index(key: SessionKey, value: i64, count: usize) -> Result<WorkspaceId> {
    usize::try_from(value)
        .ok()
        .filter(|index| *index < count)
        .ok_or_else(|| malformed(key, format!("workspace {value} out of range")))
}

/// Logs a decoding failure and drops the value, so it falls back to its default.
fn or_default<T>(value: Result<T>) -> Option<T> {
    value
        .map_err(|err| tracing::warn!("Not restoring: {err}"))
        .ok()
}

/// The global part of a session. A `None` field was missing or malformed and keeps its default.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub version: i64,
    pub gaps_enabled: Option<bool>,
    pub master_factor_milli: Option<i64>,
    pub current_workspace: Option<WorkspaceId>,
    pub layouts: Option<Vec<LayoutMode>>,
    pub scroll_offsets: Option<Vec<i32>>,
}

impl SessionSnapshot {
    pub fn capture<H: Handle>(state: &State<H>) -> Self {
        let monitor = state.current_monitor();
        Self {
            version: SCHEMA_VERSION,
            gaps_enabled: Some(state.settings.gaps_enabled),
            master_factor_milli: Some(
                (state.monitors[monitor].master_factor * 1000.0).round() as i64,
            ),
            current_workspace: Some(state.active_workspace),
            layouts: Some(state.workspaces.iter().map(|ws| ws.layout).collect()),
            scroll_offsets: Some(state.workspaces.iter().map(|ws| ws.scroll_offset).collect()),
        }
    }

    /// Writes the marker and every present field.
    pub fn write<H: Handle>(&self, store: &mut impl PropertyStore<H>) {
        store.write_root(SessionKey::Restart, &[self.version]);
        if let Some(gaps) = self.gaps_enabled {
            store.write_root(SessionKey::GapsEnabled, &[i64::from(gaps)]);
        }
        if let Some(milli) = self.master_factor_milli {
            store.write_root(SessionKey::MasterFactor, &[milli]);
        }
        if let Some(current) = self.current_workspace {
            store.write_root(SessionKey::CurrentWorkspace, &[current as i64]);
        }
        if let Some(layouts) = &self.layouts {
            let codes: Vec<i64> = layouts.iter().map(|l| l.code()).collect();
            store.write_root(SessionKey::Layouts, &codes);
        }
        if let Some(offsets) = &self.scroll_offsets {
            let offsets: Vec<i64> = offsets.iter().map(|o| i64::from(*o)).collect();
            store.write_root(SessionKey::ScrollOffsets, &offsets);
        }
    }

    /// Reads and deletes a saved session. `None` when there is no marker or it carries another
    /// schema version.
    pub fn take<H: Handle>(
        store: &mut impl PropertyStore<H>,
        workspace_count: usize,
    ) -> Option<Self> {
        let marker = store.read_root(SessionKey::Restart);
        let read = |key| store.read_root(key);
        let snapshot = marker.map(|marker| {
            let version = or_default(scalar(SessionKey::Restart, Some(marker)));
            Self {
                version: version.unwrap_or_default(),
                gaps_enabled: or_default(
                    scalar(SessionKey::GapsEnabled, read(SessionKey::GapsEnabled)).map(|v| v != 0),
                ),
                master_factor_milli: or_default(
                    scalar(SessionKey::MasterFactor, read(SessionKey::MasterFactor)).and_then(
                        |v| {
                            if (1..1000).contains(&v) {
                                Ok(v)
                            } else {
                                Err(malformed(SessionKey::MasterFactor, format!("{v} out of range")))
                            }
                        },
                    ),
                ),
                current_workspace: or_default(
                    scalar(SessionKey::CurrentWorkspace, read(SessionKey::CurrentWorkspace))
                        .and_then(|v| {
                            workspace_index(SessionKey::CurrentWorkspace, v, workspace_count)
                        }),
                ),
                layouts: or_default(
                    array(SessionKey::Layouts, read(SessionKey::Layouts), workspace_count)
                        .and_then(|codes| {
                            codes
                                .into_iter()
                                .map(|code| {
                                    LayoutMode::from_code(code).ok_or_else(|| {
                                        malformed(SessionKey::Layouts, format!("layout {code}"))
                                    })
                                })
                                .collect()
                        }),
                ),
                scroll_offsets: or_default(
                    array(
                        SessionKey::ScrollOffsets,
                        read(SessionKey::ScrollOffsets),
                        workspace_count,
                    )
                    .map(|offsets| {
                        offsets
                            .into_iter()
                            .map(|o| o.clamp(0, i64::from(i32::MAX)) as i32)
                            .collect()
                    }),
                ),
            }
        });

        for key in SessionKey::ROOT {
            store.delete_root(key);
        }

        let snapshot = snapshot?;
        if snapshot.version != SCHEMA_VERSION {
            tracing::warn!(
                "Ignoring saved session with schema version {}",
                snapshot.version
            );
            return None;
        }
        Some(snapshot)
    }

    /// Puts the saved globals back into a freshly built state.
    pub fn apply<H: Handle>(&self, state: &mut State<H>) {
        if let Some(gaps) = self.gaps_enabled {
            state.settings.gaps_enabled = gaps;
        }
        if let Some(milli) = self.master_factor_milli {
            let factor = milli as f32 / 1000.0;
            state.settings.master_factor = factor;
            state
                .monitors
                .iter_mut()
                .for_each(|m| m.set_master_factor(factor));
        }
        if let Some(layouts) = &self.layouts {
            for (ws, layout) in state.workspaces.iter_mut().zip(layouts) {
                ws.layout = *layout;
            }
        }
        if let Some(offsets) = &self.scroll_offsets {
            for (ws, offset) in state.workspaces.iter_mut().zip(offsets) {
                ws.scroll_offset = *offset;
            }
        }
        if let Some(current) = self.current_workspace {
            state.active_workspace = current;
        }
        let layout = state.workspace().layout;
        state.monitors.iter_mut().for_each(|m| m.layout = layout);
    }
}

/// What a window remembers about itself across a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowTags {
    pub workspace: WorkspaceId,
    pub floating: bool,
    pub fullscreen: bool,
}

impl WindowTags {
    pub fn capture<H: Handle>(window: &Window<H>) -> Self {
        // a fullscreen window goes back to whatever it was before
        let floating = match window.saved_geometry() {
            Some(saved) if window.is_fullscreen() => saved.floating,
            _ => window.is_floating(),
        };
        Self {
            workspace: window.workspace,
            floating,
            fullscreen: window.is_fullscreen(),
        }
    }

    pub fn write<H: Handle>(&self, store: &mut impl PropertyStore<H>, handle: WindowHandle<H>) {
        store.write_window(handle, SessionKey::Workspace, &[self.workspace as i64]);
        store.write_window(handle, SessionKey::Floating, &[i64::from(self.floating)]);
        store.write_window(handle, SessionKey::Fullscreen, &[i64::from(self.fullscreen)]);
    }

    /// Reads and deletes a window's tags. Without a valid workspace the window is adopted as if
    /// it were new.
    pub fn take<H: Handle>(
        store: &mut impl PropertyStore<H>,
        handle: WindowHandle<H>,
        workspace_count: usize,
    ) -> Option<Self> {
        let workspace = store.read_window(handle, SessionKey::Workspace);
        let floating = store.read_window(handle, SessionKey::Floating);
        let fullscreen = store.read_window(handle, SessionKey::Fullscreen);
        for key in SessionKey::WINDOW {
            store.delete_window(handle, key);
        }

        workspace.as_ref()?;
        let workspace = or_default(
            scalar(SessionKey::Workspace, workspace)
                .and_then(|v| workspace_index(SessionKey::Workspace, v, workspace_count)),
        )?;
        let flag = |key, values| or_default(scalar(key, values)).is_some_and(|v| v != 0);
        Some(Self {
            workspace,
            floating: flag(SessionKey::Floating, floating),
            fullscreen: flag(SessionKey::Fullscreen, fullscreen),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_servers::MockDisplayServer;
    use crate::models::Manager;

    #[test]
    fn snapshot_is_consumed_on_read() {
        let mut manager = Manager::new_test(vec!["1".to_owned(), "2".to_owned()]);
        let snapshot = SessionSnapshot::capture(&manager.state);
        snapshot.write(&mut manager.display_server);
        assert_eq!(
            SessionSnapshot::take(&mut manager.display_server, 2),
            Some(snapshot)
        );
        assert!(manager.display_server.root.is_empty());
        assert_eq!(SessionSnapshot::take(&mut manager.display_server, 2), None);
    }

    #[test]
    fn malformed_fields_fall_back_one_by_one() {
        let mut store: MockDisplayServer<i32> = MockDisplayServer::default();
        store.write_root(SessionKey::Restart, &[SCHEMA_VERSION]);
        store.write_root(SessionKey::GapsEnabled, &[0]);
        store.write_root(SessionKey::CurrentWorkspace, &[12]);
        store.write_root(SessionKey::Layouts, &[1]);
        store.write_root(SessionKey::ScrollOffsets, &[10, 20, 30]);
        let snapshot = SessionSnapshot::take(&mut store, 3);
        assert_eq!(
            snapshot,
            Some(SessionSnapshot {
                version: SCHEMA_VERSION,
                gaps_enabled: Some(false),
                master_factor_milli: None,
                current_workspace: None,
                layouts: None,
                scroll_offsets: Some(vec![10, 20, 30]),
            })
        );
    }

    #[test]
    fn other_schema_versions_are_ignored() {
        let mut store: MockDisplayServer<i32> = MockDisplayServer::default();
        store.write_root(SessionKey::Restart, &[SCHEMA_VERSION + 1]);
        store.write_root(SessionKey::GapsEnabled, &[1]);
        assert_eq!(SessionSnapshot::take(&mut store, 3), None);
        assert!(store.root.is_empty());
    }

    #[test]
    fn window_tags_need_a_valid_workspace() {
        let mut store: MockDisplayServer<i32> = MockDisplayServer::default();
        let handle = WindowHandle(7);
        store.write_window(handle, SessionKey::Workspace, &[9]);
        store.write_window(handle, SessionKey::Floating, &[1]);
        assert_eq!(WindowTags::take(&mut store, handle, 4), None);
        assert!(store.windows.is_empty());

        WindowTags {
            workspace: 3,
            floating: true,
            fullscreen: false,
        }
        .write(&mut store, handle);
        assert_eq!(
            WindowTags::take(&mut store, handle, 4),
            Some(WindowTags {
                workspace: 3,
                floating: true,
                fullscreen: false,
            })
        );
    }

    #[test]
    fn fullscreen_windows_remember_their_floating_state() {
        let mut window: Window<i32> = Window::new(WindowHandle(1), None);
        window.set_floating(true);
        window.enter_fullscreen(crate::models::Xyhw::new(0, 0, 100, 100));
        window.set_floating(false);
        let tags = WindowTags::capture(&window);
        assert!(tags.floating);
        assert!(tags.fullscreen);
    }
}
