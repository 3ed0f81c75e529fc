use thiserror::Error;

pub type Result<T> = std::result::Result<T, NwmError>;

#[derive(Debug, Error)]
pub enum NwmError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Unable to open a connection to the display server: {0}")]
    DisplayConnection(String),
    #[error("Another window manager is already running")]
    OtherWindowManager,
    #[error("Malformed saved property {key}: {reason}")]
    MalformedProperty { key: &'static str, reason: String },
}
