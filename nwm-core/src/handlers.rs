mod command_handler;
mod display_event_handler;
mod focus_handler;
mod mouse_combo_handler;
mod session_handler;
mod window_handler;
mod window_move_handler;
mod window_resize_handler;
mod workspace_handler;

use super::DisplayEvent;
use super::command::Command;
use super::config::Config;
use super::models::{Handle, Manager, Mode, Window, WindowHandle};
