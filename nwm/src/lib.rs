mod command;
mod config;
pub mod utils;

pub use command::*;
pub use config::*;
