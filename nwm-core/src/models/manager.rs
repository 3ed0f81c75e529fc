use crate::config::{Config, Keybind};
use crate::display_servers::DisplayServer;
use crate::errors::Result;
use crate::event_loop::ExitReason;
use crate::models::Handle;
use crate::state::State;
use crate::utils::child_process::Children;
use std::sync::{Arc, atomic::AtomicBool};

/// Maintains current program state.
#[derive(Debug)]
pub struct Manager<H: Handle, C, SERVER> {
    pub state: State<H>,
    pub config: C,
    pub(crate) keybinds: Vec<Keybind>,

    pub(crate) children: Children,
    pub(crate) reap_requested: Arc<AtomicBool>,
    pub(crate) exit: Option<ExitReason>,
    pub display_server: SERVER,
}

impl<H: Handle, C, SERVER> Manager<H, C, SERVER>
where
    C: Config,
    SERVER: DisplayServer<H>,
{
    /// Connects to the display server and restores the previous session if one was saved.
    ///
    /// # Errors
    ///
    /// Fails when the display server cannot be set up.
    pub fn new(config: C) -> Result<Self> {
        let display_server = SERVER::new(&config)?;
        Ok(Self::with_display_server(config, display_server))
    }

    pub(crate) fn with_display_server(config: C, display_server: SERVER) -> Self {
        let mut manager = Self {
            state: State::new(&config),
            keybinds: config.mapped_bindings(),
            config,
            children: Default::default(),
            reap_requested: Default::default(),
            exit: None,
            display_server,
        };
        manager.restore_session();
        manager
    }

    pub fn register_child_hook(&self) {
        crate::child_process::register_child_hook(self.reap_requested.clone());
    }

    /// Leaves the event loop after the current batch of events.
    pub fn quit(&mut self, restart: bool) {
        self.exit = Some(if restart {
            ExitReason::Restart
        } else {
            ExitReason::Quit
        });
    }
}

/// The manager every test drives: mock handles, mock display server, test config.
#[cfg(test)]
pub(crate) type TestManager = Manager<
    crate::models::MockHandle,
    crate::config::tests::TestConfig,
    crate::display_servers::MockDisplayServer<crate::models::MockHandle>,
>;

#[cfg(test)]
impl TestManager {
    pub fn new_test(tags: Vec<String>) -> Self {
        Self::new(crate::config::tests::TestConfig {
            tags,
            ..Default::default()
        })
        .expect("the mock display server always connects")
    }

    /// Starts a fresh manager on the display server a previous one left behind.
    pub fn restarted(self) -> Self {
        Self::with_display_server(self.config, self.display_server)
    }
}
