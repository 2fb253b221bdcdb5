//! Error types for the filmstrip core library.

use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for filmstrip
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Failed to start '{0}': {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("'{0}' exited with status {1}")]
    CommandFailed(String, ExitStatus),

    #[error("Frame feeder stopped before the frame could be queued")]
    FeederStopped,

    #[error("Render was cancelled")]
    Cancelled,

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for filmstrip operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Creates a `Configuration` error with a formatted message.
pub fn config_error(msg: impl Into<String>) -> CoreError {
    CoreError::Configuration(msg.into())
}

/// Creates a `CommandStart` error carrying the tool name.
pub fn command_start_error(tool: &str, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(tool.to_string(), err)
}

/// Creates a `CommandFailed` error from a tool name and its exit status.
pub fn command_failed_error(tool: &str, status: ExitStatus) -> CoreError {
    CoreError::CommandFailed(tool.to_string(), status)
}
