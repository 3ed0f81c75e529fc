#[cfg(test)]
mod mock_display_server;

use crate::DisplayEvent;
use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::errors::Result;
use crate::models::BarStatus;
use crate::models::Handle;
use crate::models::Window;
use crate::persistence::PropertyStore;

use futures::prelude::*;
use std::pin::Pin;

#[cfg(test)]
pub use self::mock_display_server::MockDisplayServer;

pub trait DisplayServer<H: Handle>: PropertyStore<H> {
    /// Connects and takes over window management.
    ///
    /// # Errors
    ///
    /// Fails when there is no display to connect to or another window manager owns it.
    fn new(config: &impl Config) -> Result<Self>
    where
        Self: Sized;

    /// Everything that arrived since the last call, without blocking.
    fn get_next_events(&mut self) -> Vec<DisplayEvent<H>>;

    fn update_windows(&self, _windows: Vec<&Window<H>>) {}

    fn update_bar(&mut self, _status: &BarStatus) {}

    fn execute_action(&mut self, _act: DisplayAction<H>) -> Option<DisplayEvent<H>> {
        None
    }

    /// Resolves once there may be events to read.
    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>>;

    fn flush(&self);
}
