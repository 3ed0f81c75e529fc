//! Objects (such as windows, workspaces and monitors) used by nwm.
mod bar_status;
mod focus_behaviour;
mod manager;
mod mode;
mod monitor;
mod placement;
mod window;
mod window_type;
mod workspace;
mod xyhw;
mod xyhw_change;

pub use bar_status::BarStatus;
pub use focus_behaviour::FocusBehaviour;
pub use manager::Manager;
#[cfg(test)]
pub(crate) use manager::TestManager;
pub use mode::{Drag, Mode};
pub use monitor::{Monitor, Output};
pub use placement::{Placement, classify};
pub use window::{Handle, SavedGeometry, Window, WindowHandle};
#[cfg(test)]
pub(crate) use window::MockHandle;
pub use window_type::WindowType;
pub use workspace::Workspace;
pub use xyhw::Xyhw;
pub use xyhw_change::XyhwChange;

pub type WorkspaceId = usize;
pub type MonitorId = usize;
