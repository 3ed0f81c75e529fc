use super::Config;
use super::DisplayEvent;
use super::DisplayServer;
use crate::display_action::DisplayAction;
use crate::errors::Result;
use crate::models::{BarStatus, Handle, WindowHandle};
use crate::persistence::{PropertyStore, SessionKey};
use std::collections::HashMap;

/// Records what the manager asks for and keeps properties in memory, so they survive a
/// simulated restart.
#[derive(Default)]
pub struct MockDisplayServer<H: Handle> {
    pub events: Vec<DisplayEvent<H>>,
    pub actions: Vec<DisplayAction<H>>,
    pub bar: Option<BarStatus>,
    pub root: HashMap<SessionKey, Vec<i64>>,
    pub windows: HashMap<(WindowHandle<H>, SessionKey), Vec<i64>>,
}

impl<H: Handle> DisplayServer<H> for MockDisplayServer<H> {
    fn new(_: &impl Config) -> Result<Self> {
        Ok(Self {
            events: vec![],
            actions: vec![],
            bar: None,
            root: HashMap::new(),
            windows: HashMap::new(),
        })
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent<H>> {
        std::mem::take(&mut self.events)
    }

    fn update_bar(&mut self, status: &BarStatus) {
        self.bar = Some(status.clone());
    }

    fn execute_action(&mut self, act: DisplayAction<H>) -> Option<DisplayEvent<H>> {
        self.actions.push(act);
        None
    }

    fn wait_readable(&self) -> std::pin::Pin<Box<dyn std::future::Future<Output = ()>>> {
        Box::pin(std::future::pending())
    }

    fn flush(&self) {}
}

impl<H: Handle> PropertyStore<H> for MockDisplayServer<H> {
    fn read_root(&self, key: SessionKey) -> Option<Vec<i64>> {
        self.root.get(&key).cloned()
    }

    fn write_root(&mut self, key: SessionKey, values: &[i64]) {
        self.root.insert(key, values.to_vec());
    }

    fn delete_root(&mut self, key: SessionKey) {
        self.root.remove(&key);
    }

    fn read_window(&self, handle: WindowHandle<H>, key: SessionKey) -> Option<Vec<i64>> {
        self.windows.get(&(handle, key)).cloned()
    }

    fn write_window(&mut self, handle: WindowHandle<H>, key: SessionKey, values: &[i64]) {
        self.windows.insert((handle, key), values.to_vec());
    }

    fn delete_window(&mut self, handle: WindowHandle<H>, key: SessionKey) {
        self.windows.remove(&(handle, key));
    }
}
